//! Configuration error types.
//!
//! Configuration errors are server-side problems: an operator saved an
//! authenticator without rules, or with an entry the parser cannot read.
//! They are never attributable to the end user and are surfaced as a
//! generic internal failure.

use thiserror::Error;

/// Result type alias for configuration handling.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Errors raised while validating linker configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required configuration value is not set.
    #[error("configuration value '{0}' is not set")]
    Missing(&'static str),

    /// A rule entry has fewer than two `:`-separated fields.
    #[error("malformed rule entry '{0}': expected 'idp:user:hash'")]
    MalformedRule(String),

    /// A rule entry has an empty IdP or user attribute key.
    #[error("rule entry '{0}' has an empty attribute key")]
    EmptyKey(String),
}

impl ConfigError {
    /// Creates a malformed rule error.
    #[must_use]
    pub fn malformed_rule(entry: impl Into<String>) -> Self {
        Self::MalformedRule(entry.into())
    }

    /// Creates an empty key error.
    #[must_use]
    pub fn empty_key(entry: impl Into<String>) -> Self {
        Self::EmptyKey(entry.into())
    }

    /// Returns true if the error concerns an individual rule entry.
    #[must_use]
    pub const fn is_rule_error(&self) -> bool {
        matches!(self, Self::MalformedRule(_) | Self::EmptyKey(_))
    }
}
