//! Typed linker configuration.
//!
//! The host stores authenticator and mapper settings as string key/value
//! pairs. [`LinkerConfig`] and [`PreprocessorConfig`] are built from those
//! maps once per request, so salt rotation or rule edits are picked up by
//! the next login attempt without any restart.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::{ConfigError, ConfigResult};

/// Config key for the matching rules.
pub const CONF_MATCHING_RULES: &str = "matching.rules";

/// Config key for the per-instance hash salt.
pub const CONF_HASH_SALT: &str = "idp.hash.salt";

/// Config key for verbose comparison tracing.
pub const CONF_DEBUG_LOG: &str = "debug.logging.enabled";

/// Default rule specification offered to operators.
pub const DEFAULT_MATCHING_RULES: &str = "identification_no:identification_no:true";

/// A secret string value.
///
/// `Debug` and `Serialize` never reveal the wrapped value.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    /// Wraps a secret value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Exposes the secret value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns true if the secret is the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(**********)")
    }
}

impl Serialize for Secret {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str("**********")
    }
}

/// Parses a boolean flag the way the host's config store does: only a
/// case-insensitive `true` enables it.
fn parse_flag(value: Option<&String>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

/// Configuration of the attribute-match authenticator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkerConfig {
    /// Raw rule specification (`idp:user:hash` entries).
    ///
    /// `None` means the authenticator was never configured.
    #[serde(default)]
    pub rules: Option<String>,

    /// Per-instance salt. Empty or absent falls through to the environment.
    #[serde(default)]
    pub salt: Option<Secret>,

    /// Enables verbose tracing of comparisons.
    #[serde(default)]
    pub debug: bool,
}

impl LinkerConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> LinkerConfigBuilder {
        LinkerConfigBuilder::default()
    }

    /// Builds the configuration from the host's string map.
    #[must_use]
    pub fn from_map(config: &HashMap<String, String>) -> Self {
        Self {
            rules: config.get(CONF_MATCHING_RULES).cloned(),
            salt: config.get(CONF_HASH_SALT).map(Secret::new),
            debug: parse_flag(config.get(CONF_DEBUG_LOG)),
        }
    }

    /// Returns the configured salt, if set and non-empty.
    #[must_use]
    pub fn configured_salt(&self) -> Option<&str> {
        self.salt
            .as_ref()
            .filter(|s| !s.is_empty())
            .map(Secret::expose)
    }

    /// Returns the raw rule specification.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if no rules are configured.
    pub fn require_rules(&self) -> ConfigResult<&str> {
        self.rules
            .as_deref()
            .ok_or(ConfigError::Missing(CONF_MATCHING_RULES))
    }
}

/// Builder for [`LinkerConfig`].
#[derive(Debug, Default)]
pub struct LinkerConfigBuilder {
    rules: Option<String>,
    salt: Option<Secret>,
    debug: bool,
}

impl LinkerConfigBuilder {
    /// Sets the rule specification.
    #[must_use]
    pub fn rules(mut self, rules: impl Into<String>) -> Self {
        self.rules = Some(rules.into());
        self
    }

    /// Sets the per-instance salt.
    #[must_use]
    pub fn salt(mut self, salt: impl Into<String>) -> Self {
        self.salt = Some(Secret::new(salt));
        self
    }

    /// Enables or disables debug tracing.
    #[must_use]
    pub const fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> LinkerConfig {
        LinkerConfig {
            rules: self.rules,
            salt: self.salt,
            debug: self.debug,
        }
    }
}

/// Configuration of the identity preprocessing mapper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreprocessorConfig {
    /// Per-mapper salt. Must match the authenticator's salt for hashed
    /// rules to line up with hashed subjects.
    #[serde(default)]
    pub salt: Option<Secret>,

    /// Enables verbose tracing of the hashed subject.
    #[serde(default)]
    pub debug: bool,
}

impl PreprocessorConfig {
    /// Builds the configuration from the host's string map.
    #[must_use]
    pub fn from_map(config: &HashMap<String, String>) -> Self {
        Self {
            salt: config.get(CONF_HASH_SALT).map(Secret::new),
            debug: parse_flag(config.get(CONF_DEBUG_LOG)),
        }
    }

    /// Creates a configuration with the given salt.
    #[must_use]
    pub fn with_salt(salt: impl Into<String>) -> Self {
        Self {
            salt: Some(Secret::new(salt)),
            debug: false,
        }
    }

    /// Returns the configured salt, if set and non-empty.
    #[must_use]
    pub fn configured_salt(&self) -> Option<&str> {
        self.salt
            .as_ref()
            .filter(|s| !s.is_empty())
            .map(Secret::expose)
    }
}
