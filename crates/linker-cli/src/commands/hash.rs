//! Privacy hash computation.

use linker_crypto::{SaltResolver, SaltSource, Sha256Hasher, ValueHasher};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{output_single, warning, OutputFormat};

/// Hash result for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct HashDisplay {
    /// Privacy hash of the value.
    pub hash: String,
    /// Where the salt came from.
    #[tabled(rename = "Salt Source")]
    pub salt_source: &'static str,
}

/// Runs the hash command.
pub fn run_hash(value: &str, salt: Option<&str>, format: OutputFormat) -> crate::CliResult<()> {
    let salt = SaltResolver::default().resolve(salt);
    if salt.source() == SaltSource::Fallback {
        warning("No salt configured; hashing with the built-in fallback salt.");
    }

    let display = HashDisplay {
        hash: Sha256Hasher.hash(value, salt.expose())?,
        salt_source: salt.source().as_str(),
    };
    output_single(&display, format)
}
