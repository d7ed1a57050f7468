//! In-memory user directory.

use async_trait::async_trait;
use linker_model::User;
use parking_lot::RwLock;

use crate::directory::UserDirectory;
use crate::error::{StorageError, StorageResult};

/// A user directory held in memory.
///
/// Email and username lookups are case-insensitive, as host directories
/// store both normalised to lower case. Attribute search is an exact match
/// against any value of a custom attribute.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    users: RwLock<Vec<User>>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory from a list of users.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Duplicate` if two users share a username.
    pub fn from_users(users: impl IntoIterator<Item = User>) -> StorageResult<Self> {
        let directory = Self::new();
        for user in users {
            directory.insert(user)?;
        }
        Ok(directory)
    }

    /// Loads a directory from a JSON array of users.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or usernames collide.
    pub fn from_json(json: &str) -> StorageResult<Self> {
        let users: Vec<User> = serde_json::from_str(json)?;
        Self::from_users(users)
    }

    /// Adds a user.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Duplicate` if the username is taken.
    pub fn insert(&self, user: User) -> StorageResult<()> {
        let mut users = self.users.write();
        if users
            .iter()
            .any(|u| u.username.eq_ignore_ascii_case(&user.username))
        {
            return Err(StorageError::duplicate("User", "username", user.username));
        }
        users.push(user);
        Ok(())
    }

    /// Returns the number of users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    /// Returns true if the directory holds no users.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

#[async_trait]
impl UserDirectory for InMemoryDirectory {
    async fn get_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        let users = self.users.read();
        Ok(users
            .iter()
            .find(|u| {
                u.email
                    .as_deref()
                    .is_some_and(|e| e.eq_ignore_ascii_case(email))
            })
            .cloned())
    }

    async fn get_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        let users = self.users.read();
        Ok(users
            .iter()
            .find(|u| u.username.eq_ignore_ascii_case(username))
            .cloned())
    }

    async fn search_by_attribute(&self, name: &str, value: &str) -> StorageResult<Vec<User>> {
        let users = self.users.read();
        let found: Vec<User> = users
            .iter()
            .filter(|u| {
                u.get_attribute(name)
                    .is_some_and(|values| values.iter().any(|v| v == value))
            })
            .cloned()
            .collect();
        tracing::trace!(attribute = name, count = found.len(), "attribute search");
        Ok(found)
    }
}
