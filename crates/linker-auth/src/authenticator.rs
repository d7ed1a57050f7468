//! Attribute-match authenticator.
//!
//! Runs inside the host's first-broker-login flow, after the identity
//! provider has returned a federated identity. It either links the identity
//! to exactly one existing local account, or reports why it could not.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use linker_core::LinkerConfig;
use linker_crypto::{SaltResolver, Sha256Hasher, ValueHasher};
use linker_model::{BrokeredIdentity, FederatedAttributes, User};
use linker_storage::UserDirectory;

use crate::decision::{self, Outcome};
use crate::engine::{Evaluation, RuleEngine};
use crate::error::{LinkError, LinkResult};
use crate::rule::RuleSpecification;

/// Auth note telling the host that the broker login is already
/// authenticated.
pub const POST_BROKER_LOGIN_AUTHENTICATED: &str = "POST_BROKER_LOGIN_AUTHENTICATED";

/// Flow error reported to the host on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowError {
    /// No local account could be identified.
    UnknownUser,
    /// Server-side problem.
    InternalError,
}

/// Error page rendered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPage {
    /// Message key of the localized error text.
    pub message_key: &'static str,
    /// HTTP status of the page.
    pub status: u16,
}

impl ErrorPage {
    /// Creates an error page.
    #[must_use]
    pub const fn new(message_key: &'static str, status: u16) -> Self {
        Self {
            message_key,
            status,
        }
    }
}

/// Result of an authenticator execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticatorResult {
    /// A user was identified and the flow can continue as that user.
    Success,
    /// The authenticator could not decide; the flow moves on to
    /// alternative executions.
    Attempted,
    /// Authentication failed.
    Failure {
        /// Flow error.
        error: FlowError,
        /// Page to show, if any.
        page: Option<ErrorPage>,
    },
}

impl AuthenticatorResult {
    /// Creates a failure result.
    #[must_use]
    pub const fn failure(error: FlowError, page: Option<ErrorPage>) -> Self {
        Self::Failure { error, page }
    }

    /// Checks if this is a success result.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Checks if this is a failed result.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }
}

impl From<&Outcome> for AuthenticatorResult {
    fn from(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Linked(_) => Self::Success,
            Outcome::AttributeMissing { .. } => Self::Attempted,
            Outcome::NotFound { reason } => Self::failure(
                FlowError::UnknownUser,
                Some(ErrorPage::new(reason.error_key(), 403)),
            ),
            Outcome::Ambiguous { .. } => Self::failure(
                FlowError::InternalError,
                Some(ErrorPage::new("idp-linker-multiple-users-found", 500)),
            ),
            Outcome::ConfigurationError(_) | Outcome::InternalError(_) => {
                Self::failure(FlowError::InternalError, None)
            }
        }
    }
}

/// Authentication context passed to authenticators.
pub struct AuthContext<'a> {
    /// Authenticator configuration, if the execution was configured.
    pub config: Option<LinkerConfig>,
    /// Federated identity of this login attempt.
    pub identity: &'a BrokeredIdentity,
    /// The host's user directory.
    pub directory: &'a dyn UserDirectory,
    /// User identified by the flow.
    pub user: Option<User>,
    /// Authentication session notes.
    pub notes: HashMap<String, String>,
}

impl<'a> AuthContext<'a> {
    /// Creates a new authentication context.
    #[must_use]
    pub fn new(identity: &'a BrokeredIdentity, directory: &'a dyn UserDirectory) -> Self {
        Self {
            config: None,
            identity,
            directory,
            user: None,
            notes: HashMap::new(),
        }
    }

    /// Sets the authenticator configuration.
    #[must_use]
    pub fn with_config(mut self, config: LinkerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Gets a note value.
    #[must_use]
    pub fn note(&self, key: &str) -> Option<&str> {
        self.notes.get(key).map(String::as_str)
    }

    /// Sets a note value.
    pub fn set_note(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.notes.insert(key.into(), value.into());
    }
}

/// Authenticator trait.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Returns the authenticator ID.
    fn id(&self) -> &'static str;

    /// Checks if this authenticator requires a user to be set.
    fn requires_user(&self) -> bool {
        true
    }

    /// Authenticates the user.
    async fn authenticate(&self, context: &mut AuthContext<'_>) -> AuthenticatorResult;
}

/// Capability to link federated attributes to one local user.
#[async_trait]
pub trait IdentityLinker: Send + Sync {
    /// Evaluates the configured rules and returns the outcome.
    ///
    /// Never fails: every error is resolved into an [`Outcome`].
    async fn evaluate(
        &self,
        config: &LinkerConfig,
        attributes: &FederatedAttributes,
        directory: &dyn UserDirectory,
    ) -> Outcome;
}

/// Links IdP users to local users by matching several attributes.
///
/// Every rule must match (logical AND).
#[derive(Clone)]
pub struct AttributeMatchAuthenticator {
    hasher: Arc<dyn ValueHasher>,
    salt_resolver: SaltResolver,
}

impl Default for AttributeMatchAuthenticator {
    fn default() -> Self {
        Self::new(Arc::new(Sha256Hasher), SaltResolver::default())
    }
}

impl AttributeMatchAuthenticator {
    /// Authenticator ID.
    pub const ID: &'static str = "idp-attribute-match-authenticator";

    /// Creates an authenticator with the given hasher and salt resolver.
    #[must_use]
    pub fn new(hasher: Arc<dyn ValueHasher>, salt_resolver: SaltResolver) -> Self {
        Self {
            hasher,
            salt_resolver,
        }
    }

    async fn try_evaluate(
        &self,
        config: &LinkerConfig,
        attributes: &FederatedAttributes,
        directory: &dyn UserDirectory,
    ) -> LinkResult<Outcome> {
        let rules = RuleSpecification::parse(config.require_rules()?)?;
        let salt = self.salt_resolver.resolve(config.configured_salt());

        let engine = RuleEngine::new(directory, self.hasher.as_ref(), &salt).with_debug(config.debug);
        let outcome = match engine.run(&rules, attributes).await? {
            Evaluation::Stopped(outcome) => outcome,
            Evaluation::Complete(candidates) => decision::resolve(candidates),
        };
        Ok(outcome)
    }
}

#[async_trait]
impl IdentityLinker for AttributeMatchAuthenticator {
    async fn evaluate(
        &self,
        config: &LinkerConfig,
        attributes: &FederatedAttributes,
        directory: &dyn UserDirectory,
    ) -> Outcome {
        match self.try_evaluate(config, attributes, directory).await {
            Ok(outcome) => outcome,
            Err(LinkError::Configuration(e)) => {
                tracing::error!(error = %e, "invalid linker configuration");
                Outcome::ConfigurationError(e)
            }
            Err(e) => {
                tracing::error!(error = %e, "unexpected error during attribute matching");
                Outcome::InternalError(e.to_string())
            }
        }
    }
}

#[async_trait]
impl Authenticator for AttributeMatchAuthenticator {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn requires_user(&self) -> bool {
        false
    }

    async fn authenticate(&self, context: &mut AuthContext<'_>) -> AuthenticatorResult {
        let Some(config) = context.config.clone().filter(|c| c.rules.is_some()) else {
            tracing::warn!("no matching rules configured, skipping authenticator");
            return AuthenticatorResult::Attempted;
        };

        let outcome = self
            .evaluate(&config, &context.identity.attributes, context.directory)
            .await;
        let result = AuthenticatorResult::from(&outcome);

        if config.debug {
            tracing::info!(
                identity_provider = %context.identity.identity_provider,
                outcome = outcome.label(),
                "attribute matching finished"
            );
        }

        if let Outcome::Linked(user) = outcome {
            if config.debug {
                tracing::info!(username = %user.username, "exactly one user matched");
            }
            context.user = Some(user);
            context.set_note(POST_BROKER_LOGIN_AUTHENTICATED, "true");
        }

        result
    }
}
