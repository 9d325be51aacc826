//! Value matching for extracted fields

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Rules for deciding whether an extracted value equals the ground truth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldMatcher {
    /// Absolute tolerance for numeric values
    pub numeric_tolerance: f64,

    /// Compare strings case-sensitively
    pub case_sensitive: bool,
}

impl Default for FieldMatcher {
    fn default() -> Self {
        Self {
            numeric_tolerance: 0.01,
            case_sensitive: false,
        }
    }
}

impl FieldMatcher {
    /// Create a matcher with explicit settings
    pub fn new(numeric_tolerance: f64, case_sensitive: bool) -> Self {
        Self {
            numeric_tolerance,
            case_sensitive,
        }
    }

    /// Compare two JSON scalars
    pub fn matches(&self, predicted: &Value, truth: &Value) -> bool {
        match (predicted, truth) {
            (Value::Null, Value::Null) => true,
            (Value::Null, _) | (_, Value::Null) => false,
            _ => {
                // Two strings never compare numerically: "00123" != "123".
                if predicted.is_number() || truth.is_number() {
                    if let (Some(p), Some(t)) = (as_number(predicted), as_number(truth)) {
                        return (p - t).abs() <= self.numeric_tolerance;
                    }
                }
                match (as_text(predicted), as_text(truth)) {
                    (Some(p), Some(t)) => {
                        if self.case_sensitive {
                            p == t
                        } else {
                            p.to_lowercase() == t.to_lowercase()
                        }
                    }
                    _ => predicted == truth,
                }
            }
        }
    }
}

/// Numeric view of a value, accepting strings like "1,234.50"
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
            if cleaned.is_empty() {
                None
            } else {
                cleaned.parse().ok()
            }
        }
        _ => None,
    }
}

/// Whitespace-collapsed text view of a scalar
fn as_text(value: &Value) -> Option<String> {
    let raw = match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    Some(raw.split_whitespace().collect::<Vec<_>>().join(" "))
}
