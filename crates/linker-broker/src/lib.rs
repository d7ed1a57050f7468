//! # linker-broker
//!
//! Identity-provider mappers for the IdP linker.
//!
//! Mappers run while the host imports a federated identity, before any
//! authenticator sees it. The [`IdpIdHashMapper`] replaces the subject
//! identifier and username asserted by the identity provider with their
//! salted privacy hash, so raw personal identifiers are never persisted in
//! the local federated-identity link.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod mapper;
pub mod preprocessor;

pub use mapper::IdentityProviderMapper;
pub use preprocessor::{IdentityPreprocessor, IdpIdHashMapper};
