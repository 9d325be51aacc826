//! Command routing logic for CLI

use anyhow::{Context, Result};
use docsense_eval::EvalConfig;

use crate::args::{Cli, Commands};
use crate::commands;
use crate::console::CliConsole;

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli) -> Result<()> {
    let console = CliConsole::new(cli.verbose);

    let config = EvalConfig::load(&cli.config)
        .and_then(EvalConfig::with_env_overrides)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    console.info(&format!("Using configuration from {}", cli.config.display()));

    match cli.command {
        Commands::Evaluate {
            ground_truth,
            predictions,
            format,
            output,
        } => {
            commands::evaluate::labels(
                &console,
                config,
                &ground_truth,
                &predictions,
                &format,
                output.as_deref(),
            )
            .await
        }
        Commands::Fields {
            ground_truth,
            predictions,
            format,
            output,
        } => {
            commands::evaluate::fields(
                &console,
                config,
                &ground_truth,
                &predictions,
                &format,
                output.as_deref(),
            )
            .await
        }
        Commands::Split {
            base_path,
            test_percentage,
            seed,
            limit,
            output,
        } => {
            let mut config = config;
            if let Some(pct) = test_percentage {
                config = config.with_test_percentage(pct);
            }
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            commands::split::run(&console, &config, &base_path, limit, output.as_deref()).await
        }
        Commands::ParseResponse { file, lenient } => {
            commands::response::run(&console, &file, lenient).await
        }
        Commands::Report { input, format } => {
            commands::evaluate::report(&console, &input, &format).await
        }
        Commands::Schema { document_type } => {
            commands::schema::show(&console, document_type.as_deref())
        }
    }
}
