//! Authenticator factory.

use linker_core::config::{
    CONF_DEBUG_LOG, CONF_HASH_SALT, CONF_MATCHING_RULES, DEFAULT_MATCHING_RULES,
};
use linker_core::{ConfigProperty, PropertyType, ProviderMetadata};

use crate::authenticator::{AttributeMatchAuthenticator, Authenticator};

/// Requirement levels an execution may be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// The execution must succeed.
    Required,
    /// One of the alternative executions must succeed.
    Alternative,
    /// The execution is skipped.
    Disabled,
}

/// Authenticator factory trait.
pub trait AuthenticatorFactory: Send + Sync {
    /// Returns the provider metadata.
    fn metadata(&self) -> ProviderMetadata;

    /// Returns the requirement levels offered to operators.
    fn requirement_choices(&self) -> &'static [Requirement];

    /// Returns whether the execution takes a configuration.
    fn is_configurable(&self) -> bool;

    /// Returns whether users may set this authenticator up themselves.
    fn is_user_setup_allowed(&self) -> bool {
        false
    }

    /// Returns the configuration properties.
    fn config_properties(&self) -> Vec<ConfigProperty>;

    /// Creates an authenticator instance.
    fn create(&self) -> Box<dyn Authenticator>;
}

/// Factory for [`AttributeMatchAuthenticator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeMatchAuthenticatorFactory;

impl AuthenticatorFactory for AttributeMatchAuthenticatorFactory {
    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            id: AttributeMatchAuthenticator::ID,
            display_type: "IdP Attribute Match Authenticator (Multi-Field)",
            category: "idp-link",
            help_text: "Automatically links an IdP user to local user using multiple attributes. \
                        Logic: AND (All fields must match).",
        }
    }

    fn requirement_choices(&self) -> &'static [Requirement] {
        &[
            Requirement::Required,
            Requirement::Alternative,
            Requirement::Disabled,
        ]
    }

    fn is_configurable(&self) -> bool {
        true
    }

    fn config_properties(&self) -> Vec<ConfigProperty> {
        vec![
            ConfigProperty::new(
                CONF_MATCHING_RULES,
                "Matching Rules (CSV or Newline)",
                "Format: 'idp_attr:user_attr:hash'. Example: 'citizen_id:cid:true, email:email'. \
                 Default hash is false if not specified.",
                PropertyType::String,
            )
            .with_default(DEFAULT_MATCHING_RULES),
            ConfigProperty::new(
                CONF_HASH_SALT,
                "Hash Salt",
                "Secret salt for hashing. If empty, system environment IDP_LINKER_HASH_SALT will be used.",
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

    fn create(&self) -> Box<dyn Authenticator> {
        Box::new(AttributeMatchAuthenticator::default())
    }
}
