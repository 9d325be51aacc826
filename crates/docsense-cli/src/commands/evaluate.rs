//! Evaluation commands for scoring classifier output

use std::path::Path;

use anyhow::{Context, Result};
use docsense_eval::metrics::{FieldEvaluator, MetricsReport};
use docsense_eval::report::{generate_field_report, generate_report};
use docsense_eval::{EvalConfig, Evaluator, ReportFormat, SampleLoader};

use super::{emit, report_format};
use crate::console::CliConsole;

/// Score predicted labels against ground truth
pub async fn labels(
    console: &CliConsole,
    config: EvalConfig,
    ground_truth: &Path,
    predictions: &Path,
    format: &str,
    output: Option<&Path>,
) -> Result<()> {
    let format = report_format(console, format);
    let loader = SampleLoader::new(config);

    let samples = loader
        .load_labeled(ground_truth, predictions)
        .context("Failed to load evaluation samples")?;
    console.info(&format!("Loaded {} samples", samples.len()));

    let metrics = Evaluator::new()
        .evaluate(&samples)
        .context("Evaluation failed")?;

    let rendered = generate_report(&metrics, format)?;
    emit(console, &rendered, output).await?;

    if format == ReportFormat::Table || output.is_some() {
        print_summary(console, &metrics);
    }

    Ok(())
}

/// Score extracted field values against ground truth
pub async fn fields(
    console: &CliConsole,
    config: EvalConfig,
    ground_truth: &Path,
    predictions: &Path,
    format: &str,
    output: Option<&Path>,
) -> Result<()> {
    let format = report_format(console, format);
    let loader = SampleLoader::new(config);

    let comparisons = loader
        .load_fields(ground_truth, predictions)
        .context("Failed to load field comparisons")?;
    console.info(&format!("Loaded {} field comparisons", comparisons.len()));

    let report = FieldEvaluator::new()
        .evaluate(&comparisons)
        .context("Field evaluation failed")?;

    let rendered = generate_field_report(&report, format)?;
    emit(console, &rendered, output).await?;

    if output.is_some() {
        console.success(&format!(
            "Field accuracy: {}/{} ({:.1}%)",
            report.matched,
            report.total,
            report.accuracy * 100.0
        ));
    }

    Ok(())
}

/// Show evaluation report from a previous run
pub async fn report(console: &CliConsole, input: &Path, format: &str) -> Result<()> {
    let content = tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let metrics: MetricsReport = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a metrics JSON report", input.display()))?;

    let report = generate_report(&metrics, report_format(console, format))?;
    println!("{}", report);

    Ok(())
}

fn print_summary(console: &CliConsole, metrics: &MetricsReport) {
    console.print_separator();
    console.success(&format!(
        "Evaluation complete: {}/{} correct ({})",
        metrics.overall.correct,
        metrics.overall.total,
        metrics.overall.accuracy_percentage()
    ));
    if !metrics.misclassified.is_empty() {
        console.warn(&format!(
            "{} documents misclassified",
            metrics.misclassified.len()
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsense_eval::LabeledSample;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_report_renders_saved_metrics() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("metrics.json");
        let metrics = docsense_eval::evaluate(&[LabeledSample::new("1.jpg", "check", "check")])
            .unwrap();
        std::fs::write(&input, serde_json::to_string(&metrics).unwrap()).unwrap();

        let console = CliConsole::new(false);
        assert!(report(&console, &input, "markdown").await.is_ok());
        assert!(report(&console, &input, "html").await.is_ok());
    }

    #[tokio::test]
    async fn test_report_rejects_ragged_confusion_matrix() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("metrics.json");
        let metrics = docsense_eval::evaluate(&[LabeledSample::new("1.jpg", "check", "itr")])
            .unwrap();
        let mut value = serde_json::to_value(&metrics).unwrap();
        value["confusion"] = serde_json::json!({"labels": ["a", "b"], "counts": [[1]]});
        std::fs::write(&input, value.to_string()).unwrap();

        let err = report(&CliConsole::new(false), &input, "table")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("is not a metrics JSON report"));
    }
}
