//! Hashing error types.

use thiserror::Error;

/// Errors raised while computing a privacy hash.
///
/// These are internal conditions (an unavailable digest implementation),
/// never business errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    /// The digest algorithm is not available.
    #[error("digest algorithm unavailable: {0}")]
    Unavailable(String),
}

impl HashError {
    /// Creates an unavailable algorithm error.
    #[must_use]
    pub fn unavailable(algorithm: impl Into<String>) -> Self {
        Self::Unavailable(algorithm.into())
    }
}

/// Result type for hashing operations.
pub type HashResult<T> = Result<T, HashError>;
