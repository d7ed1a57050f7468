//! Local user model.
//!
//! Users are the local accounts a federated identity is linked to. The
//! linker only ever reads them: profile fields and custom attributes are
//! compared against values asserted by the identity provider.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Names of the built-in user attributes.
pub mod attributes {
    /// Username attribute.
    pub const USERNAME: &str = "username";
    /// Email attribute.
    pub const EMAIL: &str = "email";
    /// First name attribute.
    pub const FIRST_NAME: &str = "firstName";
    /// Last name attribute.
    pub const LAST_NAME: &str = "lastName";
}

/// A local user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    #[serde(default = "Uuid::now_v7")]
    pub id: Uuid,
    /// Unique username.
    pub username: String,
    /// Whether the account is enabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// First name.
    #[serde(default, rename = "firstName")]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(default, rename = "lastName")]
    pub last_name: Option<String>,
    /// Custom attributes (multi-valued).
    #[serde(default)]
    pub attributes: HashMap<String, Vec<String>>,
}

const fn default_enabled() -> bool {
    true
}

impl User {
    /// Creates a new enabled user with the given username.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            username: username.into(),
            enabled: true,
            email: None,
            first_name: None,
            last_name: None,
            attributes: HashMap::new(),
        }
    }

    /// Sets the user's email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the user's first name.
    #[must_use]
    pub fn with_first_name(mut self, name: impl Into<String>) -> Self {
        self.first_name = Some(name.into());
        self
    }

    /// Sets the user's last name.
    #[must_use]
    pub fn with_last_name(mut self, name: impl Into<String>) -> Self {
        self.last_name = Some(name.into());
        self
    }

    /// Sets a single-valued custom attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), vec![value.into()]);
        self
    }

    /// Sets a custom attribute.
    pub fn set_attribute(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.attributes.insert(name.into(), values);
    }

    /// Gets all values of a custom attribute.
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&[String]> {
        self.attributes.get(name).map(Vec::as_slice)
    }

    /// Gets the first value of an attribute.
    ///
    /// Built-in profile fields are resolved by their attribute name before
    /// custom attributes are consulted.
    #[must_use]
    pub fn first_attribute(&self, name: &str) -> Option<&str> {
        match name {
            attributes::USERNAME => Some(self.username.as_str()),
            attributes::EMAIL => self.email.as_deref(),
            attributes::FIRST_NAME => self.first_name.as_deref(),
            attributes::LAST_NAME => self.last_name.as_deref(),
            _ => self
                .attributes
                .get(name)
                .and_then(|v| v.first())
                .map(String::as_str),
        }
    }
}
