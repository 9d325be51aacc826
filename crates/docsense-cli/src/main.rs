//! docsense CLI application
//!
//! Scores document classifier output against ground truth and prepares
//! the datasets those runs use.
//!
//! # Installation
//!
//! ```bash
//! cargo install --path crates/docsense-cli
//! ```
//!
//! Set `RUST_LOG=debug` or pass `--verbose` for detailed logging. A `.env`
//! file in the working directory is loaded before the configuration, so
//! `DOCSENSE_*` overrides can live there.

mod args;
mod commands;
mod console;
mod router;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

pub use args::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // RUST_LOG wins; --verbose only raises the default level
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    router::route(cli).await
}
