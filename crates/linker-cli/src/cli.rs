//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

/// IdP linker - dry-run and inspect federated identity linking.
#[derive(Debug, Parser)]
#[command(name = "idp-linker")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format.
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub output: OutputFormat,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Dry-run a linking attempt and print the outcome.
    Evaluate(EvaluateArgs),

    /// Parse a rule specification and print the resulting rules.
    ParseRules {
        /// Rule specification, e.g. `citizen_id:cid:true, email:email`.
        rules: String,
    },

    /// Print the privacy hash of a value.
    Hash {
        /// Value to hash.
        value: String,

        /// Salt (falls back to IDP_LINKER_HASH_SALT, then the built-in default).
        #[arg(long)]
        salt: Option<String>,
    },

    /// Print a federated identity after hash-on-ingest.
    Preprocess {
        /// JSON file holding the brokered identity.
        #[arg(long)]
        identity: PathBuf,

        /// Salt (falls back to IDP_LINKER_HASH_SALT, then the built-in default).
        #[arg(long)]
        salt: Option<String>,
    },
}

/// Arguments of the `evaluate` command.
#[derive(Debug, clap::Args)]
pub struct EvaluateArgs {
    /// JSON object of authenticator config keys (`matching.rules`, `idp.hash.salt`, ...).
    #[arg(long)]
    pub config: PathBuf,

    /// JSON object of IdP attributes (name to list of values).
    #[arg(long)]
    pub attributes: PathBuf,

    /// JSON array of local users.
    #[arg(long)]
    pub directory: PathBuf,
}
