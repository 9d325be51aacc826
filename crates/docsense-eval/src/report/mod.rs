//! Report generation for evaluation results
//!
//! Generates reports in various formats (table, JSON, Markdown). Renderers
//! return strings; printing or writing them is up to the caller.

mod json;
mod markdown;

pub use json::JsonReporter;
pub use markdown::MarkdownReporter;

use std::str::FromStr;

use crate::error::EvalResult;
use crate::metrics::{FieldReport, MetricsReport};

/// Number of off-diagonal confusion cells shown in text reports
const TOP_CONFUSIONS: usize = 5;

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Markdown,
    Table,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "table" | "text" => Ok(ReportFormat::Table),
            other => Err(format!("Unknown report format: {}", other)),
        }
    }
}

/// Generate a label report in the specified format
pub fn generate_report(report: &MetricsReport, format: ReportFormat) -> EvalResult<String> {
    match format {
        ReportFormat::Json => JsonReporter::generate(report),
        ReportFormat::Markdown => Ok(MarkdownReporter::generate(report)),
        ReportFormat::Table => Ok(generate_table(report)),
    }
}

/// Generate a field report in the specified format
pub fn generate_field_report(report: &FieldReport, format: ReportFormat) -> EvalResult<String> {
    match format {
        ReportFormat::Json => JsonReporter::generate(report),
        ReportFormat::Markdown => Ok(MarkdownReporter::generate_fields(report)),
        ReportFormat::Table => Ok(generate_field_table(report)),
    }
}

/// Shorten a cell to `width` characters
pub(crate) fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let head: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

/// Generate a simple table report for terminal output
fn generate_table(report: &MetricsReport) -> String {
    let mut output = String::new();
    let overall = &report.overall;

    // Header
    output.push_str(&format!("\n{:=<70}\n", "= Document Classification Results "));
    output.push_str(&format!(
        "Timestamp: {}\n",
        report.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!("{:=<70}\n\n", ""));

    // Summary
    output.push_str("SUMMARY\n");
    output.push_str(&format!("{:-<70}\n", ""));
    output.push_str(&format!(
        "Accuracy: {}/{} ({:.1}%)\n",
        overall.correct,
        overall.total,
        overall.accuracy * 100.0
    ));
    output.push_str(&format!("Incorrect: {}\n", overall.incorrect));
    output.push_str(&format!("Macro F1: {:.3}\n", overall.macro_f1));
    output.push_str(&format!("Weighted F1: {:.3}\n\n", overall.weighted_f1));

    // Per class
    output.push_str("BY CLASS\n");
    output.push_str(&format!("{:-<70}\n", ""));
    output.push_str(&format!(
        "{:<24} {:>10} {:>10} {:>10} {:>10}\n",
        "Label", "Precision", "Recall", "F1", "Support"
    ));
    output.push_str(&format!("{:-<70}\n", ""));

    for (label, metrics) in &report.per_class {
        output.push_str(&format!(
            "{:<24} {:>10.3} {:>10.3} {:>10.3} {:>10}\n",
            truncate(label, 24),
            metrics.precision,
            metrics.recall,
            metrics.f1,
            metrics.support
        ));
    }
    output.push_str(&format!("{:-<70}\n\n", ""));

    // Confusions
    let confusions = report.confusion.top_confusions(TOP_CONFUSIONS);
    if !confusions.is_empty() {
        output.push_str("TOP CONFUSIONS\n");
        output.push_str(&format!("{:-<70}\n", ""));
        for c in &confusions {
            output.push_str(&format!(
                "{:<30} -> {:<30} {:>5}\n",
                truncate(&c.true_label, 30),
                truncate(&c.predicted_label, 30),
                c.count
            ));
        }
        output.push_str(&format!("{:-<70}\n\n", ""));
    }

    // Misclassified
    output.push_str("MISCLASSIFIED\n");
    output.push_str(&format!("{:-<70}\n", ""));
    if report.misclassified.is_empty() {
        output.push_str("None\n");
    } else {
        output.push_str(&format!(
            "{:<30} {:>18} {:>18}\n",
            "Document", "True", "Predicted"
        ));
        output.push_str(&format!("{:-<70}\n", ""));
        for sample in &report.misclassified {
            output.push_str(&format!(
                "{:<30} {:>18} {:>18}\n",
                truncate(&sample.identifier, 30),
                truncate(&sample.true_label, 18),
                truncate(&sample.predicted_label, 18)
            ));
        }
    }

    output.push_str(&format!("{:=<70}\n", ""));
    output
}

/// Generate a field accuracy table for terminal output
fn generate_field_table(report: &FieldReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n{:=<70}\n", "= Field Extraction Results "));
    output.push_str(&format!(
        "Timestamp: {}\n",
        report.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!("{:=<70}\n\n", ""));

    output.push_str(&format!(
        "Field Accuracy: {}/{} ({:.1}%)\n\n",
        report.matched,
        report.total,
        report.accuracy * 100.0
    ));

    output.push_str("BY FIELD\n");
    output.push_str(&format!("{:-<70}\n", ""));
    output.push_str(&format!(
        "{:<30} {:>10} {:>10} {:>10}\n",
        "Field", "Total", "Matched", "Rate"
    ));
    output.push_str(&format!("{:-<70}\n", ""));
    for (field, acc) in &report.per_field {
        output.push_str(&format!(
            "{:<30} {:>10} {:>10} {:>9.1}%\n",
            truncate(field, 30),
            acc.total,
            acc.matched,
            acc.accuracy * 100.0
        ));
    }
    output.push_str(&format!("{:-<70}\n\n", ""));

    if !report.mismatches.is_empty() {
        output.push_str("MISMATCHES\n");
        output.push_str(&format!("{:-<70}\n", ""));
        for cmp in &report.mismatches {
            output.push_str(&format!(
                "{} / {}: expected {}, got {}\n",
                cmp.identifier, cmp.field_name, cmp.true_value, cmp.predicted_value
            ));
        }
    }

    output.push_str(&format!("{:=<70}\n", ""));
    output
}
