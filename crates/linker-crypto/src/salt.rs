//! Salt resolution.
//!
//! The active salt is resolved fresh for every evaluation, in order:
//!
//! 1. the salt configured on the authenticator or mapper instance;
//! 2. the process-wide `IDP_LINKER_HASH_SALT` environment variable;
//! 3. a publicly known fallback constant.
//!
//! Nothing is cached, so a rotated salt takes effect on the next request.

use std::fmt;

/// Environment variable holding the process-wide salt.
pub const SALT_ENV_VAR: &str = "IDP_LINKER_HASH_SALT";

/// Fallback salt used when nothing is configured. Provides no secrecy.
pub const FALLBACK_SALT: &str = "DEFAULT_UNSAFE_SALT_CHANGE_ME";

/// Where the active salt came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaltSource {
    /// Per-instance configuration.
    Configured,
    /// Process environment.
    Environment,
    /// Hardcoded fallback.
    Fallback,
}

impl SaltSource {
    /// Returns a short label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Configured => "configured",
            Self::Environment => "environment",
            Self::Fallback => "fallback",
        }
    }
}

/// The salt active for one evaluation.
#[derive(Clone, PartialEq, Eq)]
pub struct Salt {
    value: String,
    source: SaltSource,
}

impl Salt {
    /// Returns the salt value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.value
    }

    /// Returns where the salt came from.
    #[must_use]
    pub const fn source(&self) -> SaltSource {
        self.source
    }

    /// Returns true if the insecure fallback is in use.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self.source, SaltSource::Fallback)
    }
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Salt")
            .field("value", &"**********")
            .field("source", &self.source)
            .finish()
    }
}

/// Resolves the active salt.
#[derive(Debug, Clone, Copy)]
pub struct SaltResolver {
    env_var: &'static str,
}

impl Default for SaltResolver {
    fn default() -> Self {
        Self::new(SALT_ENV_VAR)
    }
}

impl SaltResolver {
    /// Creates a resolver reading the given environment variable.
    #[must_use]
    pub const fn new(env_var: &'static str) -> Self {
        Self { env_var }
    }

    /// Environment variable this resolver reads.
    #[must_use]
    pub const fn env_var(&self) -> &'static str {
        self.env_var
    }

    /// Resolves the salt, reading the environment at call time.
    #[must_use]
    pub fn resolve(&self, configured: Option<&str>) -> Salt {
        let env_value = std::env::var(self.env_var).ok();
        self.resolve_with(configured, env_value.as_deref())
    }

    /// Resolves the salt from explicit inputs.
    ///
    /// `env_value` stands in for this resolver's environment variable.
    /// Taking the fallback is logged at error level on every call.
    #[must_use]
    pub fn resolve_with(&self, configured: Option<&str>, env_value: Option<&str>) -> Salt {
        if let Some(value) = configured.filter(|v| !v.is_empty()) {
            return Salt {
                value: value.to_string(),
                source: SaltSource::Configured,
            };
        }

        if let Some(value) = env_value.filter(|v| !v.is_empty()) {
            return Salt {
                value: value.to_string(),
                source: SaltSource::Environment,
            };
        }

        tracing::error!(
            env_var = self.env_var,
            "hash salt is not configured, using the insecure fallback salt"
        );
        Salt {
            value: FALLBACK_SALT.to_string(),
            source: SaltSource::Fallback,
        }
    }
}
