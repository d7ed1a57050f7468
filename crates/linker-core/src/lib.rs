//! # linker-core
//!
//! Configuration and error types shared by the IdP linker crates.
//!
//! The host hands the linker a flat string map per authenticator (or per
//! mapper) instance. This crate turns that map into typed structures once,
//! at the evaluation boundary, so the rest of the workspace never touches
//! magic string keys.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod provider;

pub use config::{LinkerConfig, PreprocessorConfig, Secret};
pub use error::{ConfigError, ConfigResult};
pub use provider::{ConfigProperty, PropertyType, ProviderMetadata};
