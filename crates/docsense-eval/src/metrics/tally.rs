//! Confusion tally
//!
//! Per-label true positive, false positive and false negative counts.

use std::collections::BTreeMap;

use super::types::ClassMetrics;
use crate::samples::LabeledSample;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Counts {
    tp: u32,
    fp: u32,
    fn_: u32,
}

/// Running TP/FP/FN counts keyed by label
#[derive(Debug, Clone, Default)]
pub struct ConfusionTally {
    counts: BTreeMap<String, Counts>,
}

impl ConfusionTally {
    /// Create an empty tally
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one sample
    pub fn record(&mut self, sample: &LabeledSample) {
        if sample.is_correct() {
            self.entry(&sample.true_label).tp += 1;
        } else {
            self.entry(&sample.predicted_label).fp += 1;
            self.entry(&sample.true_label).fn_ += 1;
        }
    }

    fn entry(&mut self, label: &str) -> &mut Counts {
        self.counts.entry(label.to_string()).or_default()
    }

    /// Labels seen so far, sorted
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// (TP, FP, FN) for a label
    pub fn counts(&self, label: &str) -> Option<(u32, u32, u32)> {
        self.counts.get(label).map(|c| (c.tp, c.fp, c.fn_))
    }

    /// Derive per-class metrics for every label
    pub fn class_metrics(&self) -> BTreeMap<String, ClassMetrics> {
        self.counts
            .iter()
            .map(|(label, c)| (label.clone(), ClassMetrics::from_counts(c.tp, c.fp, c.fn_)))
            .collect()
    }
}
