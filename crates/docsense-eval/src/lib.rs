//! Document Classification Evaluation
//!
//! This crate scores a document classifier against ground truth: per-class
//! precision, recall and F1, overall accuracy, macro-F1 and the list of
//! misclassified documents. It also covers the plumbing around an
//! evaluation run.
//!
//! # Features
//!
//! - **Label Metrics**: Per-class counts, accuracy, macro and weighted F1,
//!   confusion matrix
//! - **Field Metrics**: Per-field extraction accuracy with tolerant matching
//! - **Dataset Splitting**: Deterministic seeded train/test split of
//!   category folders
//! - **Response Parsing**: Recovers JSON from raw model output
//! - **Report Generation**: Table, JSON and Markdown output formats
//!
//! # Example
//!
//! ```rust
//! use docsense_eval::{LabeledSample, evaluate};
//!
//! let samples = vec![
//!     LabeledSample::new("1.jpg", "check", "check"),
//!     LabeledSample::new("2.jpg", "check", "utility_bill"),
//! ];
//! let report = evaluate(&samples).unwrap();
//! assert_eq!(report.overall.accuracy, 0.5);
//! assert_eq!(report.misclassified[0].identifier, "2.jpg");
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod metrics;
pub mod report;
pub mod response;
pub mod samples;
pub mod schema;

// Re-exports for convenience
pub use config::EvalConfig;
pub use dataset::{DatasetSplit, DatasetSplitter, TestSample};
pub use error::{EvalError, EvalResult};
pub use metrics::{
    ClassMetrics, ConfusionMatrix, Evaluator, FieldEvaluator, FieldReport, MetricsReport,
    OverallMetrics, evaluate,
};
pub use report::{ReportFormat, generate_field_report, generate_report};
pub use response::{ResponseParser, predicted_label};
pub use samples::{FieldComparison, LabeledSample, SampleLoader};
pub use schema::{DocumentType, FieldMatcher};
