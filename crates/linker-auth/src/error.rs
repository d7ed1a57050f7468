//! Rule evaluation error types.
//!
//! These errors never cross the evaluation boundary: the authenticator
//! resolves every one of them into an [`Outcome`](crate::Outcome).

use linker_core::ConfigError;
use linker_crypto::HashError;
use linker_storage::StorageError;
use thiserror::Error;

/// Errors that abort a rule evaluation.
#[derive(Debug, Error)]
pub enum LinkError {
    /// Missing or malformed rule specification.
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// The privacy hash of an IdP value could not be computed.
    #[error("privacy hash failed for attribute '{attribute}': {source}")]
    Hash {
        /// IdP attribute being hashed.
        attribute: String,
        /// Underlying hash error.
        #[source]
        source: HashError,
    },

    /// The user directory failed.
    #[error("directory lookup failed: {0}")]
    Directory(#[from] StorageError),
}

impl LinkError {
    /// Creates a hash error for the given attribute.
    #[must_use]
    pub fn hash(attribute: impl Into<String>, source: HashError) -> Self {
        Self::Hash {
            attribute: attribute.into(),
            source,
        }
    }

    /// Checks if this is a configuration error.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

/// Result type for rule evaluation.
pub type LinkResult<T> = Result<T, LinkError>;
