//! JSON report generation

use serde::Serialize;

use crate::error::EvalResult;

/// JSON report generator
pub struct JsonReporter;

impl JsonReporter {
    /// Generate a JSON report
    pub fn generate<T: Serialize>(report: &T) -> EvalResult<String> {
        let json = serde_json::to_string_pretty(report)?;
        Ok(json)
    }

    /// Generate a compact JSON report (no pretty printing)
    pub fn generate_compact<T: Serialize>(report: &T) -> EvalResult<String> {
        let json = serde_json::to_string(report)?;
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{MetricsReport, evaluate};
    use crate::samples::LabeledSample;

    fn create_test_report() -> MetricsReport {
        let samples = vec![
            LabeledSample::new("a.jpg", "check", "check"),
            LabeledSample::new("b.jpg", "unknown", "itr"),
        ];
        evaluate(&samples).unwrap()
    }

    #[test]
    fn test_json_generation() {
        let json = JsonReporter::generate(&create_test_report()).unwrap();

        assert!(json.contains("macro_f1"));
        assert!(json.contains("misclassified"));
        assert!(json.contains("b.jpg"));
    }

    #[test]
    fn test_json_roundtrip_for_report_command() {
        let report = create_test_report();
        let json = JsonReporter::generate_compact(&report).unwrap();
        let back: MetricsReport = serde_json::from_str(&json).unwrap();

        assert_eq!(back.overall, report.overall);
        assert_eq!(back.misclassified, report.misclassified);
    }

    #[test]
    fn test_edited_report_with_ragged_confusion_is_rejected() {
        let mut value = serde_json::to_value(create_test_report()).unwrap();
        value["confusion"] = serde_json::json!({"labels": ["a", "b"], "counts": [[1]]});

        let result = serde_json::from_value::<MetricsReport>(value);
        assert!(result.is_err());
    }
}
