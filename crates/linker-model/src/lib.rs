//! # linker-model
//!
//! Domain models for the IdP linker: local user accounts and the federated
//! identity received from an external identity provider.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod identity;
pub mod user;

pub use identity::{BrokeredIdentity, FederatedAttributes};
pub use user::{attributes, User};
