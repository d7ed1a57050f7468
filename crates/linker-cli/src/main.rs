//! # idp-linker
//!
//! Operator CLI for the IdP linker.

#![forbid(unsafe_code)]

use clap::Parser;
use linker_cli::{
    cli::{Cli, Command},
    commands::{run_evaluate, run_hash, run_parse_rules, run_preprocess},
    output::error,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match cli.command {
        Command::Evaluate(args) => run_evaluate(args, cli.output).await,
        Command::ParseRules { rules } => run_parse_rules(&rules, cli.output),
        Command::Hash { value, salt } => run_hash(&value, salt.as_deref(), cli.output),
        Command::Preprocess { identity, salt } => {
            run_preprocess(&identity, salt.as_deref(), cli.verbose, cli.output)
        }
    };

    if let Err(e) = result {
        error(&e.to_string());
        std::process::exit(1);
    }
}
