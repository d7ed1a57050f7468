//! Hash-on-ingest identity preprocessing.
//!
//! The salt configured here must match the authenticator's salt, otherwise
//! hashed subjects and hashed matching rules will never line up.

use std::sync::Arc;

use linker_core::config::{CONF_DEBUG_LOG, CONF_HASH_SALT};
use linker_core::{ConfigProperty, PreprocessorConfig, PropertyType, ProviderMetadata};
use linker_crypto::{Salt, SaltResolver, Sha256Hasher, ValueHasher};
use linker_model::BrokeredIdentity;

use crate::mapper::IdentityProviderMapper;

/// Capability to rewrite a federated identity before it is imported.
pub trait IdentityPreprocessor: Send + Sync {
    /// Rewrites the identity in place.
    fn preprocess_identity(&self, config: &PreprocessorConfig, identity: &mut BrokeredIdentity);
}

/// Hashes the IdP subject and username with the resolved salt.
///
/// Hash failures never abort the import: the original value is kept and
/// the failure is logged.
#[derive(Clone)]
pub struct IdpIdHashMapper {
    hasher: Arc<dyn ValueHasher>,
    salt_resolver: SaltResolver,
}

impl Default for IdpIdHashMapper {
    fn default() -> Self {
        Self::new(Arc::new(Sha256Hasher), SaltResolver::default())
    }
}

impl IdpIdHashMapper {
    /// Mapper ID.
    pub const ID: &'static str = "idp-id-privacy-hash-mapper";

    /// Creates a mapper with the given hasher and salt resolver.
    #[must_use]
    pub fn new(hasher: Arc<dyn ValueHasher>, salt_resolver: SaltResolver) -> Self {
        Self {
            hasher,
            salt_resolver,
        }
    }

    /// Returns the identity with its subject and username hashed.
    ///
    /// An identity without a subject is returned unchanged.
    #[must_use]
    pub fn hash_identity(&self, mut identity: BrokeredIdentity, salt: &Salt) -> BrokeredIdentity {
        let Some(subject) = identity.id.take() else {
            return identity;
        };

        identity.id = Some(self.hash_or_keep(subject, salt, "subject"));
        identity.username = identity
            .username
            .take()
            .map(|username| self.hash_or_keep(username, salt, "username"));
        identity
    }

    fn hash_or_keep(&self, value: String, salt: &Salt, field: &'static str) -> String {
        match self.hasher.hash(&value, salt.expose()) {
            Ok(hashed) => hashed,
            Err(e) => {
                tracing::error!(field, error = %e, "failed to hash IdP identity, keeping original value");
                value
            }
        }
    }
}

impl IdentityPreprocessor for IdpIdHashMapper {
    fn preprocess_identity(&self, config: &PreprocessorConfig, identity: &mut BrokeredIdentity) {
        let Some(original) = identity.id.clone() else {
            return;
        };

        if config.debug {
            tracing::info!(subject = %original, "processing original IdP subject");
        }

        let salt = self.salt_resolver.resolve(config.configured_salt());
        *identity = self.hash_identity(std::mem::take(identity), &salt);

        if config.debug {
            if let Some(hashed) = identity.id.as_deref() {
                tracing::info!(subject = %hashed, "hashed IdP subject");
            }
        }
    }
}

impl IdentityProviderMapper for IdpIdHashMapper {
    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            id: Self::ID,
            display_type: "IdP ID Privacy Hasher",
            category: "Preprocessor",
            help_text: "Hashes the IdP Subject (sub) to protect PII in the federated identity \
                        table for PDPA compliance.",
        }
    }

    fn compatible_providers(&self) -> &'static [&'static str] {
        &["*"]
    }

    fn config_properties(&self) -> Vec<ConfigProperty> {
        vec![
            ConfigProperty::new(
                CONF_HASH_SALT,
                "Hash Salt",
                "Secret salt for hashing. Must match the salt in Authenticator. \
                 If empty, IDP_LINKER_HASH_SALT env will be used.",
                PropertyType::Password,
            ),
            ConfigProperty::new(
                CONF_DEBUG_LOG,
                "Enable Debug Logging",
                "Print debug information to the server log.",
                PropertyType::Boolean,
            )
            .with_default("false"),
        ]
    }
}
