//! Linking outcomes.
//!
//! Every evaluation ends in exactly one [`Outcome`]. The decision resolver
//! only looks at the size of the final candidate set: it never picks one
//! user out of several.

use linker_core::ConfigError;
use linker_model::User;

use crate::engine::CandidateSet;

/// Why no user was linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// The first rule (or the final set) matched nobody.
    NoUserFound,
    /// A narrowing rule removed every remaining candidate.
    DataMismatch,
}

impl NotFoundReason {
    /// Message key of the error page shown to the end user.
    #[must_use]
    pub const fn error_key(self) -> &'static str {
        match self {
            Self::NoUserFound => "idp-linker-no-user-found",
            Self::DataMismatch => "idp-linker-data-mismatch",
        }
    }
}

/// Terminal result of one evaluation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Exactly one local user matched every rule.
    Linked(User),

    /// Several users matched every rule. Signals duplicated data upstream.
    Ambiguous {
        /// Number of matching users.
        count: usize,
    },

    /// No user matched.
    NotFound {
        /// Which step emptied the candidate set.
        reason: NotFoundReason,
    },

    /// The rule specification is missing or malformed.
    ConfigurationError(ConfigError),

    /// The identity provider did not assert an attribute a rule needs.
    AttributeMissing {
        /// The missing IdP attribute.
        attribute: String,
    },

    /// Directory or hashing failure.
    InternalError(String),
}

impl Outcome {
    /// Returns the linked user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        match self {
            Self::Linked(user) => Some(user),
            _ => None,
        }
    }

    /// Checks if a user was linked.
    #[must_use]
    pub const fn is_linked(&self) -> bool {
        matches!(self, Self::Linked(_))
    }

    /// Checks if the attempt was inconclusive rather than failed.
    #[must_use]
    pub const fn is_inconclusive(&self) -> bool {
        matches!(self, Self::AttributeMissing { .. })
    }

    /// Short label for logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Linked(_) => "linked",
            Self::Ambiguous { .. } => "ambiguous",
            Self::NotFound { .. } => "not_found",
            Self::ConfigurationError(_) => "configuration_error",
            Self::AttributeMissing { .. } => "attribute_missing",
            Self::InternalError(_) => "internal_error",
        }
    }
}

/// Resolves the final candidate set into an outcome.
#[must_use]
pub fn resolve(candidates: CandidateSet) -> Outcome {
    let mut users = match candidates {
        CandidateSet::Unevaluated => {
            return Outcome::NotFound {
                reason: NotFoundReason::NoUserFound,
            }
        }
        CandidateSet::Narrowed(users) => users,
    };

    match users.len() {
        0 => Outcome::NotFound {
            reason: NotFoundReason::NoUserFound,
        },
        1 => Outcome::Linked(users.remove(0)),
        count => {
            tracing::error!(
                count,
                "multiple users matched every linking rule, possible data inconsistency"
            );
            Outcome::Ambiguous { count }
        }
    }
}
