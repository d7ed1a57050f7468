//! Sequential narrowing rule engine.
//!
//! The first rule is the only one that touches the directory. It is
//! expected to be the most selective, indexed attribute; every later rule
//! filters the first rule's result in memory, so a specification with N
//! rules costs at most two directory round-trips.

use linker_crypto::{Salt, ValueHasher};
use linker_model::{FederatedAttributes, User};
use linker_storage::UserDirectory;

use crate::decision::{NotFoundReason, Outcome};
use crate::error::{LinkError, LinkResult};
use crate::rule::{IndexedKey, MatchRule, RuleSpecification};

/// Users still consistent with every rule evaluated so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CandidateSet {
    /// No rule has been evaluated yet.
    #[default]
    Unevaluated,
    /// Result of the first rule, narrowed by every later rule.
    Narrowed(Vec<User>),
}

impl CandidateSet {
    /// Number of candidates, or `None` before the first rule.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Unevaluated => None,
            Self::Narrowed(users) => Some(users.len()),
        }
    }

    /// Checks if no rule has been evaluated yet.
    #[must_use]
    pub const fn is_unevaluated(&self) -> bool {
        matches!(self, Self::Unevaluated)
    }
}

/// Result of running the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// Every rule ran; the decision resolver takes over.
    Complete(CandidateSet),
    /// A rule stopped the evaluation early.
    Stopped(Outcome),
}

/// Evaluates a rule specification against one directory.
pub struct RuleEngine<'a> {
    directory: &'a dyn UserDirectory,
    hasher: &'a dyn ValueHasher,
    salt: &'a Salt,
    debug: bool,
}

impl<'a> RuleEngine<'a> {
    /// Creates an engine for one evaluation.
    #[must_use]
    pub fn new(directory: &'a dyn UserDirectory, hasher: &'a dyn ValueHasher, salt: &'a Salt) -> Self {
        Self {
            directory,
            hasher,
            salt,
            debug: false,
        }
    }

    /// Enables verbose tracing of each comparison.
    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Runs every rule in order.
    ///
    /// # Errors
    ///
    /// Returns `LinkError::Hash` if a hashed rule cannot be hashed and
    /// `LinkError::Directory` if the directory fails.
    pub async fn run(
        &self,
        rules: &RuleSpecification,
        attributes: &FederatedAttributes,
    ) -> LinkResult<Evaluation> {
        let mut candidates = CandidateSet::Unevaluated;

        for rule in rules {
            let Some(idp_value) = attributes
                .first(rule.idp_attribute())
                .filter(|v| !v.is_empty())
            else {
                if self.debug {
                    tracing::info!(
                        attribute = rule.idp_attribute(),
                        "attribute not asserted by the identity provider, skipping"
                    );
                }
                return Ok(Evaluation::Stopped(Outcome::AttributeMissing {
                    attribute: rule.idp_attribute().to_string(),
                }));
            };

            let match_value = self.comparison_value(rule, idp_value)?;

            candidates = match candidates {
                CandidateSet::Unevaluated => {
                    let found = self.lookup(rule, &match_value).await?;
                    if found.is_empty() {
                        if self.debug {
                            tracing::info!(
                                attribute = rule.user_attribute(),
                                value = %match_value,
                                "no user found, stopping"
                            );
                        }
                        return Ok(Evaluation::Stopped(Outcome::NotFound {
                            reason: NotFoundReason::NoUserFound,
                        }));
                    }
                    CandidateSet::Narrowed(found)
                }
                CandidateSet::Narrowed(users) => {
                    let before = users.len();
                    let kept = narrow(users, rule.user_attribute(), &match_value);
                    if self.debug {
                        tracing::info!(
                            attribute = rule.user_attribute(),
                            value = %match_value,
                            before,
                            after = kept.len(),
                            "narrowed candidates"
                        );
                    }
                    if kept.is_empty() {
                        return Ok(Evaluation::Stopped(Outcome::NotFound {
                            reason: NotFoundReason::DataMismatch,
                        }));
                    }
                    CandidateSet::Narrowed(kept)
                }
            };
        }

        Ok(Evaluation::Complete(candidates))
    }

    /// Returns the value compared against the user attribute.
    fn comparison_value(&self, rule: &MatchRule, idp_value: &str) -> LinkResult<String> {
        if !rule.hash() {
            if self.debug {
                tracing::info!(
                    attribute = rule.idp_attribute(),
                    value = idp_value,
                    "comparing raw IdP value"
                );
            }
            return Ok(idp_value.to_string());
        }

        let hashed = self
            .hasher
            .hash(idp_value, self.salt.expose())
            .map_err(|e| LinkError::hash(rule.idp_attribute(), e))?;
        if self.debug {
            tracing::info!(
                attribute = rule.idp_attribute(),
                hash = %hashed,
                salt_source = self.salt.source().as_str(),
                "comparing hashed IdP value"
            );
        }
        Ok(hashed)
    }

    /// Queries the directory for the first rule.
    ///
    /// `email` and `username` go through the indexed lookup first; a miss
    /// there, or any other attribute, falls back to attribute search.
    async fn lookup(&self, rule: &MatchRule, value: &str) -> LinkResult<Vec<User>> {
        let indexed = match rule.indexed_key() {
            Some(IndexedKey::Email) => self.directory.get_by_email(value).await?,
            Some(IndexedKey::Username) => self.directory.get_by_username(value).await?,
            None => None,
        };

        if let Some(user) = indexed {
            return Ok(vec![user]);
        }

        Ok(self
            .directory
            .search_by_attribute(rule.user_attribute(), value)
            .await?)
    }
}

/// Keeps the users whose first value of `attribute` equals `value`.
///
/// The comparison is case-sensitive.
#[must_use]
pub fn narrow(users: Vec<User>, attribute: &str, value: &str) -> Vec<User> {
    users
        .into_iter()
        .filter(|u| u.first_attribute(attribute) == Some(value))
        .collect()
}
