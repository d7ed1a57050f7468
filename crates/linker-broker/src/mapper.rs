//! Identity-provider mapper descriptors.

use linker_core::{ConfigProperty, ProviderMetadata};

/// Base trait for identity-provider mappers.
pub trait IdentityProviderMapper: Send + Sync {
    /// Returns the provider metadata.
    fn metadata(&self) -> ProviderMetadata;

    /// Returns the identity-provider types this mapper can be attached to.
    ///
    /// `"*"` means every provider.
    fn compatible_providers(&self) -> &'static [&'static str];

    /// Returns the configuration properties.
    fn config_properties(&self) -> Vec<ConfigProperty>;

    /// Checks if the mapper can be attached to the given provider type.
    fn is_compatible_with(&self, provider_type: &str) -> bool {
        self.compatible_providers()
            .iter()
            .any(|p| *p == "*" || *p == provider_type)
    }
}
