//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// An input file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Offending path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// An input file is not valid JSON for its purpose.
    #[error("invalid {what} in {path}: {source}")]
    Parse {
        /// What the file was expected to hold.
        what: &'static str,
        /// Offending path.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Linker configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] linker_core::ConfigError),

    /// Directory error.
    #[error("directory error: {0}")]
    Storage(#[from] linker_storage::StorageError),

    /// Hashing error.
    #[error("hash error: {0}")]
    Hash(#[from] linker_crypto::HashError),

    /// JSON output error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Creates a parse error.
    #[must_use]
    pub fn parse(what: &'static str, path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Parse {
            what,
            path: path.into(),
            source,
        }
    }
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
