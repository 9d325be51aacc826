//! Metrics computation for evaluation
//!
//! This module provides the confusion tally, the label and field
//! evaluators, and the report types they produce.

mod confusion;
mod evaluator;
mod fields;
mod tally;
mod types;

pub use confusion::{Confusion, ConfusionMatrix};
pub use evaluator::{Evaluator, evaluate};
pub use fields::FieldEvaluator;
pub use tally::ConfusionTally;
pub use types::{ClassMetrics, FieldAccuracy, FieldReport, MetricsReport, OverallMetrics};
