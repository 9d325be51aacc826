//! Extraction schema
//!
//! Document types, the fields each type is expected to yield, and the
//! rules used to compare an extracted value against ground truth.

mod document;
mod matcher;

pub use document::DocumentType;
pub use matcher::FieldMatcher;

use serde_json::Value;

use crate::samples::FieldComparison;

/// Build one comparison per schema field of `doc_type`
///
/// Fields absent from either JSON object are treated as null. Extra keys
/// outside the schema are ignored.
pub fn compare_extraction(
    identifier: &str,
    doc_type: DocumentType,
    predicted: &Value,
    truth: &Value,
    matcher: &FieldMatcher,
) -> Vec<FieldComparison> {
    doc_type
        .fields()
        .iter()
        .map(|field| {
            let predicted_value = predicted.get(*field).cloned().unwrap_or(Value::Null);
            let true_value = truth.get(*field).cloned().unwrap_or(Value::Null);
            let matched = matcher.matches(&predicted_value, &true_value);
            FieldComparison::new(identifier, *field, predicted_value, true_value, matched)
        })
        .collect()
}
