//! # linker-cli
//!
//! Operator tooling for the IdP linker.
//!
//! This crate provides command-line utilities for:
//! - Dry-running a linking attempt against a JSON user directory
//! - Validating a matching-rule specification
//! - Computing privacy hashes with the production salt chain
//! - Previewing hash-on-ingest of a federated identity

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::uninlined_format_args)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::Cli;
pub use error::{CliError, CliResult};
