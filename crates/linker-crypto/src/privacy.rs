//! Salted privacy hashing.
//!
//! `hash(value, salt) = base64url_nopad(SHA-256(utf8(value + salt)))`
//!
//! The salt is appended as a suffix with no delimiter. The output is always
//! 43 characters from the URL-safe alphabet, so it can be stored in any
//! attribute or identifier column without escaping.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

use crate::error::HashResult;
use crate::hash::sha256;

/// Computes privacy hashes of attribute values.
///
/// The engine and the identity preprocessor take a `ValueHasher` so that
/// their failure policies (strict and lenient respectively) can be
/// exercised with an implementation that fails.
pub trait ValueHasher: Send + Sync {
    /// Hashes `value` with `salt` appended.
    ///
    /// # Errors
    ///
    /// Returns `HashError` if the digest cannot be computed.
    fn hash(&self, value: &str, salt: &str) -> HashResult<String>;
}

/// SHA-256 value hasher backed by aws-lc-rs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl ValueHasher for Sha256Hasher {
    fn hash(&self, value: &str, salt: &str) -> HashResult<String> {
        Ok(hash_value(value, salt))
    }
}

/// Hashes `value` with `salt` appended using SHA-256 and encodes the digest
/// as URL-safe base64 without padding.
#[must_use]
pub fn hash_value(value: &str, salt: &str) -> String {
    let mut input = String::with_capacity(value.len() + salt.len());
    input.push_str(value);
    input.push_str(salt);
    URL_SAFE_NO_PAD.encode(sha256(input.as_bytes()))
}
