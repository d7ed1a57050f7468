//! User directory capability.

use async_trait::async_trait;
use linker_model::User;

use crate::error::StorageResult;

/// Read-only view of the host's user directory.
///
/// Implementations must be thread-safe; the linker calls them sequentially
/// within one request but a host shares one directory across requests.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Gets a user by email (indexed exact match).
    async fn get_by_email(&self, email: &str) -> StorageResult<Option<User>>;

    /// Gets a user by username (indexed exact match).
    async fn get_by_username(&self, username: &str) -> StorageResult<Option<User>>;

    /// Searches for users having an attribute with the given value.
    async fn search_by_attribute(&self, name: &str, value: &str) -> StorageResult<Vec<User>>;
}
