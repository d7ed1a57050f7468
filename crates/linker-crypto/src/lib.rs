//! # linker-crypto
//!
//! Privacy hashing for the IdP linker using aws-lc-rs.
//!
//! Identifiers asserted by an identity provider (national ID numbers,
//! subject identifiers) are personal data. Before they are compared against
//! local accounts or persisted, they can be pseudonymised with a salted
//! SHA-256 digest encoded as URL-safe base64.
//!
//! - [`privacy`]: the salted value hasher
//! - [`salt`]: the salt precedence chain (config, environment, fallback)
//!
//! This is pseudonymisation, not encryption: the hash is one-way and the
//! salt is the only secret.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod hash;
pub mod privacy;
pub mod salt;

pub use error::{HashError, HashResult};
pub use hash::sha256;
pub use privacy::{hash_value, Sha256Hasher, ValueHasher};
pub use salt::{Salt, SaltResolver, SaltSource, FALLBACK_SALT, SALT_ENV_VAR};
