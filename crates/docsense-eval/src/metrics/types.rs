//! Core metric types for evaluation
//!
//! Defines the data structures produced by the label and field evaluators.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::confusion::ConfusionMatrix;
use crate::samples::{FieldComparison, LabeledSample};

/// Divide, yielding 0 when the denominator is 0
pub(crate) fn ratio(numerator: u32, denominator: u32) -> f64 {
    if denominator > 0 {
        numerator as f64 / denominator as f64
    } else {
        0.0
    }
}

/// Precision, recall and F1 for one label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    /// TP / (TP + FP)
    pub precision: f64,

    /// TP / (TP + FN)
    pub recall: f64,

    /// Harmonic mean of precision and recall
    pub f1: f64,

    /// Number of samples whose true label is this class
    pub support: u32,

    /// Correct predictions of this class
    pub true_positives: u32,

    /// Samples wrongly predicted as this class
    pub false_positives: u32,

    /// Samples of this class predicted as something else
    pub false_negatives: u32,
}

impl ClassMetrics {
    /// Derive the rates from raw counts
    pub fn from_counts(true_positives: u32, false_positives: u32, false_negatives: u32) -> Self {
        let precision = ratio(true_positives, true_positives + false_positives);
        let recall = ratio(true_positives, true_positives + false_negatives);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        Self {
            precision,
            recall,
            f1,
            support: true_positives + false_negatives,
            true_positives,
            false_positives,
            false_negatives,
        }
    }
}

/// Run-wide summary numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallMetrics {
    /// Correct predictions / total samples
    pub accuracy: f64,

    /// Unweighted mean F1 over classes that occur as a true label
    pub macro_f1: f64,

    /// Support-weighted mean F1 over the same classes
    pub weighted_f1: f64,

    /// Number of correct predictions
    pub correct: u32,

    /// Number of samples evaluated
    pub total: u32,

    /// Number of wrong predictions
    pub incorrect: u32,
}

impl OverallMetrics {
    /// Format accuracy as percentage string
    pub fn accuracy_percentage(&self) -> String {
        format!("{:.1}%", self.accuracy * 100.0)
    }
}

/// Complete result of a label evaluation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsReport {
    /// Metrics for every label seen as predicted or true
    pub per_class: BTreeMap<String, ClassMetrics>,

    /// Summary numbers
    pub overall: OverallMetrics,

    /// Wrong predictions, in input order
    pub misclassified: Vec<LabeledSample>,

    /// True-by-predicted count matrix
    pub confusion: ConfusionMatrix,

    /// When the report was produced
    pub timestamp: DateTime<Utc>,
}

impl MetricsReport {
    /// Get overall accuracy
    pub fn accuracy(&self) -> f64 {
        self.overall.accuracy
    }

    /// Get metrics for a label
    pub fn class(&self, label: &str) -> Option<&ClassMetrics> {
        self.per_class.get(label)
    }
}

/// Accuracy of one extracted field across documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldAccuracy {
    /// Comparisons for this field
    pub total: u32,

    /// Comparisons judged equal
    pub matched: u32,

    /// matched / total
    pub accuracy: f64,
}

/// Complete result of a field evaluation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldReport {
    /// Accuracy per field name
    pub per_field: BTreeMap<String, FieldAccuracy>,

    /// matched / total over every comparison
    pub accuracy: f64,

    /// Number of comparisons
    pub total: u32,

    /// Number of matched comparisons
    pub matched: u32,

    /// Unmatched comparisons, in input order
    pub mismatches: Vec<FieldComparison>,

    /// When the report was produced
    pub timestamp: DateTime<Utc>,
}
