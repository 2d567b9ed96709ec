mod cli;
mod commands;
mod error;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use coinpulse_core::Analytics;
use coinpulse_store::{SqliteStore, StoreConfig};

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    init_logging();
    if let Err(error) = run().await {
        eprintln!("error: {error}");
        std::process::exit(error.exit_code());
    }
}

/// Diagnostics go to stderr so stdout stays valid JSON.
fn init_logging() {
    let filter =
        EnvFilter::try_from_env("COINPULSE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), CliError> {
    let cli = Cli::parse();

    let config = match &cli.db {
        Some(path) => StoreConfig::at(path),
        None => StoreConfig::default(),
    };
    let store = SqliteStore::open(config).await?;
    let engine = Analytics::new(Arc::new(store));

    let value = commands::run(&cli, &engine).await?;
    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    println!("{rendered}");

    Ok(())
}
