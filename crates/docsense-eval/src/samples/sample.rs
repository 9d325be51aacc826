//! Core sample types
//!
//! Defines labeled classification samples and field-level comparisons.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EvalError, EvalResult};

/// A single classified document: what the model said versus the truth
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledSample {
    /// Document id or filename
    pub identifier: String,

    /// Label returned by the classifier
    pub predicted_label: String,

    /// Ground-truth label
    pub true_label: String,
}

impl LabeledSample {
    /// Create a new labeled sample
    pub fn new(
        identifier: impl Into<String>,
        predicted_label: impl Into<String>,
        true_label: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            predicted_label: predicted_label.into(),
            true_label: true_label.into(),
        }
    }

    /// Check if the prediction matches the ground truth
    pub fn is_correct(&self) -> bool {
        self.predicted_label == self.true_label
    }

    /// Reject blank identifiers and labels
    pub fn validate(&self, index: usize) -> EvalResult<()> {
        if self.identifier.trim().is_empty() {
            return Err(EvalError::malformed(index, "missing identifier"));
        }
        if self.predicted_label.trim().is_empty() {
            return Err(EvalError::malformed(
                index,
                format!("sample '{}' has no predicted label", self.identifier),
            ));
        }
        if self.true_label.trim().is_empty() {
            return Err(EvalError::malformed(
                index,
                format!("sample '{}' has no true label", self.identifier),
            ));
        }
        Ok(())
    }
}

/// Comparison of one extracted field against its ground-truth value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldComparison {
    /// Document id or filename
    pub identifier: String,

    /// Schema field name, e.g. `account_number`
    pub field_name: String,

    /// Value extracted by the model
    #[serde(default)]
    pub predicted_value: Value,

    /// Ground-truth value
    #[serde(default)]
    pub true_value: Value,

    /// Whether the two values were judged equal
    pub matched: bool,
}

impl FieldComparison {
    /// Create a comparison with an explicit match verdict
    pub fn new(
        identifier: impl Into<String>,
        field_name: impl Into<String>,
        predicted_value: Value,
        true_value: Value,
        matched: bool,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            field_name: field_name.into(),
            predicted_value,
            true_value,
            matched,
        }
    }

    /// Reject blank identifiers and field names
    pub fn validate(&self, index: usize) -> EvalResult<()> {
        if self.identifier.trim().is_empty() {
            return Err(EvalError::malformed(index, "missing identifier"));
        }
        if self.field_name.trim().is_empty() {
            return Err(EvalError::malformed(
                index,
                format!("comparison for '{}' has no field name", self.identifier),
            ));
        }
        Ok(())
    }
}

/// Ordered collection of labeled samples with unique identifiers
#[derive(Debug, Clone, Default)]
pub struct SampleSet {
    samples: Vec<LabeledSample>,
    seen: HashSet<String>,
}

impl SampleSet {
    /// Create an empty sample set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sample, rejecting malformed entries and repeated identifiers
    pub fn push(&mut self, sample: LabeledSample) -> EvalResult<()> {
        sample.validate(self.samples.len())?;
        if !self.seen.insert(sample.identifier.clone()) {
            return Err(EvalError::duplicate(sample.identifier));
        }
        self.samples.push(sample);
        Ok(())
    }

    /// Check whether an identifier was already recorded
    pub fn contains(&self, identifier: &str) -> bool {
        self.seen.contains(identifier)
    }

    /// Samples in insertion order
    pub fn samples(&self) -> &[LabeledSample] {
        &self.samples
    }

    /// Take ownership of the recorded samples
    pub fn into_samples(self) -> Vec<LabeledSample> {
        self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
