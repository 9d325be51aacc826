//! Evaluation samples and their loading
//!
//! This module provides the sample types consumed by the evaluators and
//! the loader that builds them from ground-truth and prediction files.

mod loader;
mod sample;

pub use loader::{
    GroundTruthRecord, PredictionRecord, SampleLoader, ground_truth_from_yaml,
    predictions_from_yaml,
};
pub use sample::{FieldComparison, LabeledSample, SampleSet};
