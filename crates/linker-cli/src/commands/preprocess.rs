//! Hash-on-ingest preview.

use std::path::Path;

use linker_broker::{IdentityPreprocessor, IdpIdHashMapper};
use linker_model::BrokeredIdentity;
use serde::Serialize;
use tabled::Tabled;

use crate::config::{load_identity, preprocessor_config};
use crate::output::{output_single, OutputFormat};

use super::NONE;

/// Brokered identity for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct IdentityDisplay {
    /// Identity provider alias.
    #[tabled(rename = "Provider")]
    pub identity_provider: String,
    /// Subject identifier.
    pub subject: String,
    /// Username.
    pub username: String,
}

impl From<&BrokeredIdentity> for IdentityDisplay {
    fn from(identity: &BrokeredIdentity) -> Self {
        Self {
            identity_provider: identity.identity_provider.clone(),
            subject: identity.id.clone().unwrap_or_else(|| NONE.to_string()),
            username: identity.username.clone().unwrap_or_else(|| NONE.to_string()),
        }
    }
}

/// Runs the preprocess command.
pub fn run_preprocess(
    identity_path: &Path,
    salt: Option<&str>,
    verbose: bool,
    format: OutputFormat,
) -> crate::CliResult<()> {
    let mut identity = load_identity(identity_path)?;
    let config = preprocessor_config(salt, verbose);

    IdpIdHashMapper::default().preprocess_identity(&config, &mut identity);

    match format {
        OutputFormat::Table => output_single(&IdentityDisplay::from(&identity), format),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&identity)?);
            Ok(())
        }
    }
}
