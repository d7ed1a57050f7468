//! # linker-storage
//!
//! User directory abstraction for the IdP linker.
//!
//! The linker never writes to the directory. It needs exactly three read
//! capabilities from the host's user store:
//!
//! - an indexed exact-match lookup by email,
//! - an indexed exact-match lookup by username,
//! - a generic search by attribute value.
//!
//! [`UserDirectory`] captures those capabilities; [`InMemoryDirectory`] is
//! a simple backend used by the CLI and the test suites.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod directory;
pub mod error;
pub mod memory;

pub use directory::UserDirectory;
pub use error::{StorageError, StorageResult};
pub use memory::InMemoryDirectory;
