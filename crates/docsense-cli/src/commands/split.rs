//! Dataset split command

use std::path::Path;

use anyhow::{Context, Result};
use docsense_eval::{DatasetSplitter, EvalConfig};

use crate::console::CliConsole;

/// Split the dataset and optionally write the test set as ground truth
pub async fn run(
    console: &CliConsole,
    config: &EvalConfig,
    base_path: &Path,
    limit: Option<usize>,
    output: Option<&Path>,
) -> Result<()> {
    let splitter = DatasetSplitter::new(config).context("Invalid split settings")?;
    let mut split = splitter
        .split(base_path)
        .with_context(|| format!("Failed to split dataset at {}", base_path.display()))?;

    if let Some(limit) = limit {
        split.truncate_test(limit);
        console.info(&format!("Limited test set to {} images", split.test.len()));
    }

    console.print_header("Dataset Split");
    console.print_metric("Train", &split.train.len().to_string());
    console.print_metric("Test", &split.test.len().to_string());
    console.print_metric("Seed", &config.seed.to_string());

    println!("\nTest distribution:");
    for (label, count) in &split.test_distribution {
        println!("  {}: {}", label, count);
    }

    if let Some(path) = output {
        let yaml = serde_yaml::to_string(&split.test_records())
            .context("Failed to serialize test set")?;
        tokio::fs::write(path, yaml)
            .await
            .with_context(|| format!("Failed to write test set to {}", path.display()))?;
        console.success(&format!("Test set written to {}", path.display()));
    }

    Ok(())
}
