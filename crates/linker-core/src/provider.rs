//! Provider descriptors.
//!
//! The host's admin console renders a configuration form for every
//! installed provider. These types describe the providers shipped by the
//! linker and the properties an operator can set on them.

use serde::Serialize;

/// Type of a configuration property, as rendered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyType {
    /// Free-form text.
    String,
    /// Secret text, masked in the console.
    Password,
    /// Checkbox.
    Boolean,
}

/// A configuration property offered to operators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigProperty {
    /// Config key.
    pub name: &'static str,
    /// Form label.
    pub label: &'static str,
    /// Help text shown next to the field.
    pub help_text: &'static str,
    /// Property type.
    pub property_type: PropertyType,
    /// Default value, if any.
    pub default_value: Option<&'static str>,
}

impl ConfigProperty {
    /// Creates a property without a default value.
    #[must_use]
    pub const fn new(
        name: &'static str,
        label: &'static str,
        help_text: &'static str,
        property_type: PropertyType,
    ) -> Self {
        Self {
            name,
            label,
            help_text,
            property_type,
            default_value: None,
        }
    }

    /// Sets the default value.
    #[must_use]
    pub const fn with_default(mut self, value: &'static str) -> Self {
        self.default_value = Some(value);
        self
    }
}

/// Metadata about a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderMetadata {
    /// Unique identifier for this provider.
    pub id: &'static str,

    /// Human-readable name.
    pub display_type: &'static str,

    /// Category the provider is listed under.
    pub category: &'static str,

    /// Description of what this provider does.
    pub help_text: &'static str,
}
