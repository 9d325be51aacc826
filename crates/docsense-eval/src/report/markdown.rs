//! Markdown report generation

use crate::metrics::{FieldReport, MetricsReport};

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Generate a Markdown report for label evaluation
    pub fn generate(report: &MetricsReport) -> String {
        let mut md = String::new();
        let overall = &report.overall;

        md.push_str("# Document Classification Report\n\n");
        md.push_str(&format!(
            "- **Timestamp**: {}\n\n",
            report.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        // Summary
        md.push_str("## Summary\n\n");
        md.push_str("| Metric | Value |\n|--------|-------|\n");
        md.push_str(&format!(
            "| Accuracy | {}/{} ({:.1}%) |\n",
            overall.correct,
            overall.total,
            overall.accuracy * 100.0
        ));
        md.push_str(&format!("| Incorrect | {} |\n", overall.incorrect));
        md.push_str(&format!("| Macro F1 | {:.3} |\n", overall.macro_f1));
        md.push_str(&format!("| Weighted F1 | {:.3} |\n\n", overall.weighted_f1));

        // Per class
        md.push_str("## Results by Class\n\n");
        md.push_str("| Label | Precision | Recall | F1 | Support | TP | FP | FN |\n");
        md.push_str("|-------|-----------|--------|----|---------|----|----|----|\n");
        for (label, m) in &report.per_class {
            md.push_str(&format!(
                "| {} | {:.3} | {:.3} | {:.3} | {} | {} | {} | {} |\n",
                label,
                m.precision,
                m.recall,
                m.f1,
                m.support,
                m.true_positives,
                m.false_positives,
                m.false_negatives
            ));
        }
        md.push('\n');

        // Confusion matrix
        let labels = &report.confusion.labels;
        if !labels.is_empty() {
            md.push_str("## Confusion Matrix\n\n");
            md.push_str("Rows are true labels, columns are predictions.\n\n");
            md.push_str("| |");
            for label in labels {
                md.push_str(&format!(" {} |", label));
            }
            md.push_str("\n|---|");
            for _ in labels {
                md.push_str("---|");
            }
            md.push('\n');
            for (label, row) in labels.iter().zip(&report.confusion.counts) {
                md.push_str(&format!("| **{}** |", label));
                for count in row {
                    md.push_str(&format!(" {} |", count));
                }
                md.push('\n');
            }
            md.push('\n');
        }

        // Misclassified
        if !report.misclassified.is_empty() {
            md.push_str("## Misclassified Documents\n\n");
            md.push_str("| Document | True | Predicted |\n");
            md.push_str("|----------|------|-----------|\n");
            for sample in &report.misclassified {
                md.push_str(&format!(
                    "| {} | {} | {} |\n",
                    sample.identifier, sample.true_label, sample.predicted_label
                ));
            }
            md.push('\n');
        }

        md
    }

    /// Generate a Markdown report for field extraction accuracy
    pub fn generate_fields(report: &FieldReport) -> String {
        let mut md = String::new();

        md.push_str("# Field Extraction Report\n\n");
        md.push_str(&format!(
            "- **Timestamp**: {}\n",
            report.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        md.push_str(&format!(
            "- **Field Accuracy**: {}/{} ({:.1}%)\n\n",
            report.matched,
            report.total,
            report.accuracy * 100.0
        ));

        md.push_str("## Results by Field\n\n");
        md.push_str("| Field | Total | Matched | Rate |\n");
        md.push_str("|-------|-------|---------|------|\n");
        for (field, acc) in &report.per_field {
            md.push_str(&format!(
                "| {} | {} | {} | {:.1}% |\n",
                field,
                acc.total,
                acc.matched,
                acc.accuracy * 100.0
            ));
        }
        md.push('\n');

        if !report.mismatches.is_empty() {
            md.push_str("## Mismatches\n\n");
            md.push_str("| Document | Field | Expected | Extracted |\n");
            md.push_str("|----------|-------|----------|-----------|\n");
            for cmp in &report.mismatches {
                md.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    cmp.identifier, cmp.field_name, cmp.true_value, cmp.predicted_value
                ));
            }
            md.push('\n');
        }

        md
    }
}
