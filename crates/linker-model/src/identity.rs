//! Federated identity model.
//!
//! A [`BrokeredIdentity`] is everything the external identity provider
//! asserted for one login attempt: a subject identifier, an optional
//! username and a bag of multi-valued attributes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Attributes asserted by the identity provider.
///
/// Only the first value per key is ever consulted by the linker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FederatedAttributes(HashMap<String, Vec<String>>);

impl FederatedAttributes {
    /// Creates an empty attribute bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single-valued attribute.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), vec![value.into()]);
        self
    }

    /// Sets all values of an attribute.
    pub fn set(&mut self, key: impl Into<String>, values: Vec<String>) {
        self.0.insert(key.into(), values);
    }

    /// Returns the first value of an attribute, if present.
    #[must_use]
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.first()).map(String::as_str)
    }

    /// Returns all values of an attribute.
    #[must_use]
    pub fn values(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    /// Returns the number of attribute keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no attribute is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, Vec<String>>> for FederatedAttributes {
    fn from(map: HashMap<String, Vec<String>>) -> Self {
        Self(map)
    }
}

/// The identity received from an external identity provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokeredIdentity {
    /// Alias of the identity provider (e.g. "thaid", "google").
    #[serde(default, rename = "identityProvider")]
    pub identity_provider: String,
    /// Subject identifier at the identity provider.
    #[serde(default)]
    pub id: Option<String>,
    /// Username at the identity provider.
    #[serde(default)]
    pub username: Option<String>,
    /// Email asserted by the identity provider.
    #[serde(default)]
    pub email: Option<String>,
    /// Asserted attributes.
    #[serde(default)]
    pub attributes: FederatedAttributes,
}

impl BrokeredIdentity {
    /// Creates an identity for the given provider and subject.
    #[must_use]
    pub fn new(identity_provider: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            identity_provider: identity_provider.into(),
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Sets the username.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the attributes.
    #[must_use]
    pub fn with_attributes(mut self, attributes: FederatedAttributes) -> Self {
        self.attributes = attributes;
        self
    }
}
