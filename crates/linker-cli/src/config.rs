//! Loading of CLI input files.
//!
//! Authenticator and mapper configs are read in the host's storage form: a
//! flat JSON object of string keys to string values.

use std::collections::HashMap;
use std::path::Path;

use linker_core::{LinkerConfig, PreprocessorConfig};
use linker_model::{BrokeredIdentity, FederatedAttributes};
use linker_storage::InMemoryDirectory;
use serde::de::DeserializeOwned;

use crate::error::{CliError, CliResult};

fn read(path: &Path) -> CliResult<String> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn load_json<T: DeserializeOwned>(path: &Path, what: &'static str) -> CliResult<T> {
    let content = read(path)?;
    serde_json::from_str(&content).map_err(|e| CliError::parse(what, path, e))
}

/// Loads an authenticator config.
pub fn load_linker_config(path: &Path) -> CliResult<LinkerConfig> {
    let map: HashMap<String, String> = load_json(path, "authenticator config")?;
    Ok(LinkerConfig::from_map(&map))
}

/// Builds a mapper config from an optional command-line salt.
#[must_use]
pub fn preprocessor_config(salt: Option<&str>, debug: bool) -> PreprocessorConfig {
    let mut config = salt.map(PreprocessorConfig::with_salt).unwrap_or_default();
    config.debug = debug;
    config
}

/// Loads IdP attributes.
pub fn load_attributes(path: &Path) -> CliResult<FederatedAttributes> {
    load_json(path, "IdP attributes")
}

/// Loads a brokered identity.
pub fn load_identity(path: &Path) -> CliResult<BrokeredIdentity> {
    load_json(path, "brokered identity")
}

/// Loads a user directory.
pub fn load_directory(path: &Path) -> CliResult<InMemoryDirectory> {
    let content = read(path)?;
    Ok(InMemoryDirectory::from_json(&content)?)
}
