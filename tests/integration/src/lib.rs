//! Support code for the end-to-end linking tests.
//!
//! The tests themselves live under `tests/`; this crate only provides a
//! directory decorator that records which lookups the linker performed.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use linker_model::User;
use linker_storage::{StorageResult, UserDirectory};

/// Wraps a directory and counts every call made through it.
#[derive(Debug)]
pub struct CountingDirectory<D> {
    inner: D,
    email_lookups: AtomicUsize,
    username_lookups: AtomicUsize,
    attribute_searches: AtomicUsize,
}

impl<D> CountingDirectory<D> {
    /// Wraps a directory.
    pub const fn new(inner: D) -> Self {
        Self {
            inner,
            email_lookups: AtomicUsize::new(0),
            username_lookups: AtomicUsize::new(0),
            attribute_searches: AtomicUsize::new(0),
        }
    }

    /// Number of `get_by_email` calls.
    pub fn email_lookups(&self) -> usize {
        self.email_lookups.load(Ordering::SeqCst)
    }

    /// Number of `get_by_username` calls.
    pub fn username_lookups(&self) -> usize {
        self.username_lookups.load(Ordering::SeqCst)
    }

    /// Number of `search_by_attribute` calls.
    pub fn attribute_searches(&self) -> usize {
        self.attribute_searches.load(Ordering::SeqCst)
    }

    /// Total number of directory calls.
    pub fn total_calls(&self) -> usize {
        self.email_lookups() + self.username_lookups() + self.attribute_searches()
    }
}

#[async_trait]
impl<D: UserDirectory> UserDirectory for CountingDirectory<D> {
    async fn get_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        self.email_lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.get_by_email(email).await
    }

    async fn get_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        self.username_lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.get_by_username(username).await
    }

    async fn search_by_attribute(&self, name: &str, value: &str) -> StorageResult<Vec<User>> {
        self.attribute_searches.fetch_add(1, Ordering::SeqCst);
        self.inner.search_by_attribute(name, value).await
    }
}
