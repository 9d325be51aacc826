//! Raw response parsing command

use std::path::Path;

use anyhow::{Context, Result};
use docsense_eval::ResponseParser;

use crate::console::CliConsole;

/// Parse a raw model response file and print the recovered JSON
pub async fn run(console: &CliConsole, file: &Path, lenient: bool) -> Result<()> {
    let raw = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let parser = if lenient {
        ResponseParser::lenient()
    } else {
        ResponseParser::strict()
    };

    let (value, strategy) = parser
        .parse_with_strategy(&raw)
        .with_context(|| format!("No JSON could be recovered from {}", file.display()))?;
    console.info(&format!("Recovered with strategy {:?}", strategy));

    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
