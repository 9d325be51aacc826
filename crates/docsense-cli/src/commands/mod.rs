//! CLI commands

pub mod evaluate;
pub mod response;
pub mod schema;
pub mod split;

use std::path::Path;

use anyhow::{Context, Result};
use docsense_eval::ReportFormat;

use crate::console::CliConsole;

/// Parse a `--format` value, falling back to the table layout
pub(crate) fn report_format(console: &CliConsole, format: &str) -> ReportFormat {
    format.parse().unwrap_or_else(|e: String| {
        tracing::warn!("Falling back to table output: {}", e);
        console.warn(&format!("{}, using table", e));
        ReportFormat::Table
    })
}

/// Print a rendered report or write it to `output`
pub(crate) async fn emit(
    console: &CliConsole,
    rendered: &str,
    output: Option<&Path>,
) -> Result<()> {
    match output {
        Some(path) => {
            tokio::fs::write(path, rendered)
                .await
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            console.success(&format!("Report written to {}", path.display()));
        }
        None => println!("{}", rendered),
    }
    Ok(())
}
