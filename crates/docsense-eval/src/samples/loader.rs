//! Ground-truth and prediction loading from YAML/JSON files
//!
//! Joins prediction records onto ground-truth records by identifier and
//! produces the samples consumed by the evaluators.

use std::collections::HashMap;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{FieldComparison, LabeledSample, SampleSet};
use crate::config::EvalConfig;
use crate::error::{EvalError, EvalResult};
use crate::response::{ResponseParser, predicted_label};
use crate::schema::{DocumentType, compare_extraction};

/// One entry of a ground-truth file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundTruthRecord {
    /// Document id or image path
    #[serde(default, alias = "identifier", alias = "image_path")]
    pub id: Option<String>,

    /// Correct document type
    #[serde(default, alias = "true_label", alias = "document_type")]
    pub label: Option<String>,

    /// Expected extraction values, keyed by schema field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Value>,
}

impl GroundTruthRecord {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            label: Some(label.into()),
            fields: None,
        }
    }
}

/// One entry of a predictions file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    /// Document id or image path
    #[serde(default, alias = "identifier", alias = "image_path")]
    pub id: Option<String>,

    /// Predicted document type, if already extracted
    #[serde(default, alias = "predicted_label", alias = "document_type")]
    pub label: Option<String>,

    /// Raw model output to parse when `label` is absent
    #[serde(default)]
    pub raw_response: Option<String>,

    /// Error reported by the classifier for this document
    #[serde(default)]
    pub error: Option<String>,

    /// Extracted values, keyed by schema field
    #[serde(default)]
    pub fields: Option<Value>,
}

/// Loader that turns dataset files into evaluator input
pub struct SampleLoader {
    config: EvalConfig,
    parser: ResponseParser,
}

impl SampleLoader {
    /// Create a loader with the given configuration
    pub fn new(config: EvalConfig) -> Self {
        Self {
            config,
            parser: ResponseParser::strict(),
        }
    }

    /// Load a ground-truth file
    pub fn load_ground_truth(&self, path: &Path) -> EvalResult<Vec<GroundTruthRecord>> {
        read_records(path)
    }

    /// Load a predictions file
    pub fn load_predictions(&self, path: &Path) -> EvalResult<Vec<PredictionRecord>> {
        read_records(path)
    }

    /// Load both files and join them into labeled samples
    pub fn load_labeled(
        &self,
        ground_truth: &Path,
        predictions: &Path,
    ) -> EvalResult<Vec<LabeledSample>> {
        let truth = self.load_ground_truth(ground_truth)?;
        let preds = self.load_predictions(predictions)?;
        self.join_labels(&truth, &preds)
    }

    /// Load both files and build field comparisons
    pub fn load_fields(
        &self,
        ground_truth: &Path,
        predictions: &Path,
    ) -> EvalResult<Vec<FieldComparison>> {
        let truth = self.load_ground_truth(ground_truth)?;
        let preds = self.load_predictions(predictions)?;
        self.join_fields(&truth, &preds)
    }

    /// Pair every ground-truth record with its prediction, in ground-truth order
    ///
    /// Documents without a usable prediction get the configured unknown
    /// label so that they count as wrong instead of disappearing.
    pub fn join_labels(
        &self,
        truth: &[GroundTruthRecord],
        preds: &[PredictionRecord],
    ) -> EvalResult<Vec<LabeledSample>> {
        let index = index_predictions(preds)?;
        let mut set = SampleSet::new();

        for (i, record) in truth.iter().enumerate() {
            let id = required(record.id.as_deref(), i, "missing identifier")?;
            let true_label = required(
                record.label.as_deref(),
                i,
                &format!("sample '{}' has no true label", id),
            )?;

            let predicted = self.resolve_label(id, index.get(id).copied());
            set.push(LabeledSample::new(
                id,
                self.config.normalize_label(&predicted),
                self.config.normalize_label(true_label),
            ))?;
        }

        let orphaned = index.keys().filter(|id| !set.contains(id)).count();
        if orphaned > 0 {
            tracing::warn!(
                "{} predictions have no ground-truth record and were ignored",
                orphaned
            );
        }

        Ok(set.into_samples())
    }

    /// Build field comparisons for every ground-truth record that has fields
    pub fn join_fields(
        &self,
        truth: &[GroundTruthRecord],
        preds: &[PredictionRecord],
    ) -> EvalResult<Vec<FieldComparison>> {
        let index = index_predictions(preds)?;
        let matcher = self.config.matcher();
        let mut comparisons = Vec::new();

        for (i, record) in truth.iter().enumerate() {
            let Some(expected) = &record.fields else {
                continue;
            };
            let id = required(record.id.as_deref(), i, "missing identifier")?;
            if !expected.is_object() {
                return Err(EvalError::malformed(
                    i,
                    format!("fields of '{}' must be an object", id),
                ));
            }

            let extracted = self.resolve_fields(id, index.get(id).copied());
            match record.label.as_deref().and_then(DocumentType::parse) {
                Some(doc_type) if doc_type != DocumentType::Unknown => {
                    comparisons.extend(compare_extraction(
                        id, doc_type, &extracted, expected, &matcher,
                    ));
                }
                _ => {
                    // No schema for this label: compare the keys the ground truth lists.
                    if let Some(object) = expected.as_object() {
                        for (field, true_value) in object {
                            let predicted_value =
                                extracted.get(field).cloned().unwrap_or(Value::Null);
                            let matched = matcher.matches(&predicted_value, true_value);
                            comparisons.push(FieldComparison::new(
                                id,
                                field.clone(),
                                predicted_value,
                                true_value.clone(),
                                matched,
                            ));
                        }
                    }
                }
            }
        }

        Ok(comparisons)
    }

    fn resolve_label(&self, id: &str, record: Option<&PredictionRecord>) -> String {
        let unknown = self.config.unknown_label.as_str();
        let Some(record) = record else {
            tracing::warn!("No prediction for {}, counting as {}", id, unknown);
            return unknown.to_string();
        };

        if let Some(error) = &record.error {
            tracing::warn!("Error processing {}: {}", id, error);
            return unknown.to_string();
        }

        if let Some(label) = record.label.as_deref().filter(|l| !l.trim().is_empty()) {
            return label.to_string();
        }

        match &record.raw_response {
            Some(raw) => match self.parser.parse(raw) {
                Ok(value) => predicted_label(&value, unknown),
                Err(e) => {
                    tracing::warn!("Unusable response for {}: {}", id, e);
                    unknown.to_string()
                }
            },
            None => unknown.to_string(),
        }
    }

    fn resolve_fields(&self, id: &str, record: Option<&PredictionRecord>) -> Value {
        let empty = Value::Object(Map::new());
        let Some(record) = record else {
            return empty;
        };
        if record.error.is_some() {
            return empty;
        }
        if let Some(fields) = &record.fields {
            return fields.clone();
        }
        match &record.raw_response {
            Some(raw) => self.parser.parse(raw).unwrap_or_else(|e| {
                tracing::warn!("Unusable extraction for {}: {}", id, e);
                empty
            }),
            None => empty,
        }
    }
}

impl Default for SampleLoader {
    fn default() -> Self {
        Self::new(EvalConfig::default())
    }
}

fn required<'a>(value: Option<&'a str>, index: usize, reason: &str) -> EvalResult<&'a str> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| EvalError::malformed(index, reason))
}

fn index_predictions(preds: &[PredictionRecord]) -> EvalResult<HashMap<&str, &PredictionRecord>> {
    let mut index = HashMap::with_capacity(preds.len());
    for (i, record) in preds.iter().enumerate() {
        let id = required(record.id.as_deref(), i, "prediction without identifier")?;
        if index.insert(id, record).is_some() {
            return Err(EvalError::duplicate(id));
        }
    }
    Ok(index)
}

/// Read a list of records from a YAML or JSON file
fn read_records<T: DeserializeOwned>(path: &Path) -> EvalResult<Vec<T>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| EvalError::io(format!("Failed to read {}: {}", path.display(), e), path))?;

    if path
        .extension()
        .is_some_and(|ext| ext == "yaml" || ext == "yml")
    {
        serde_yaml::from_str(&content)
            .map_err(|e| EvalError::parse(format!("Failed to parse YAML records: {}", e), path))
    } else {
        serde_json::from_str(&content)
            .map_err(|e| EvalError::parse(format!("Failed to parse JSON records: {}", e), path))
    }
}

/// Load ground-truth records from a YAML string (useful for testing)
pub fn ground_truth_from_yaml(yaml: &str) -> EvalResult<Vec<GroundTruthRecord>> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Load prediction records from a YAML string (useful for testing)
pub fn predictions_from_yaml(yaml: &str) -> EvalResult<Vec<PredictionRecord>> {
    Ok(serde_yaml::from_str(yaml)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    const TRUTH: &str = r#"
- id: 82.jpg
  label: Bank Statement
- id: 59.jpg
  label: Check
- id: 102.jpg
  label: Salary Slip
- id: 66.jpg
  label: Utility
"#;

    const PREDICTIONS: &str = r#"
- id: 82.jpg
  document_type: bank_statement
- id: 59.jpg
  raw_response: "```json\n{\"document_type\": \"Bank Statement\", \"confidence\": 0.6}\n```"
- id: 102.jpg
  error: "OCR timed out"
"#;

    #[test]
    fn test_join_labels() {
        let loader = SampleLoader::default();
        let truth = ground_truth_from_yaml(TRUTH).unwrap();
        let preds = predictions_from_yaml(PREDICTIONS).unwrap();

        let samples = loader.join_labels(&truth, &preds).unwrap();
        assert_eq!(
            samples,
            vec![
                LabeledSample::new("82.jpg", "bank_statement", "bank_statement"),
                LabeledSample::new("59.jpg", "bank_statement", "check"),
                LabeledSample::new("102.jpg", "unknown", "salary_slip"),
                LabeledSample::new("66.jpg", "unknown", "utility_bill"),
            ]
        );
    }

    #[test]
    fn test_join_without_normalisation() {
        let config = EvalConfig {
            normalize_labels: false,
            ..Default::default()
        };
        let loader = SampleLoader::new(config);
        let truth = ground_truth_from_yaml(TRUTH).unwrap();
        let preds = predictions_from_yaml(PREDICTIONS).unwrap();

        let samples = loader.join_labels(&truth, &preds).unwrap();
        assert_eq!(samples[0].predicted_label, "bank_statement");
        assert_eq!(samples[0].true_label, "Bank Statement");
    }

    #[test]
    fn test_missing_true_label_is_malformed() {
        let truth = ground_truth_from_yaml("- id: a.jpg\n- id: b.jpg\n  label: Check\n").unwrap();
        let err = SampleLoader::default().join_labels(&truth, &[]).unwrap_err();
        assert!(matches!(err, EvalError::MalformedSample { index: 0, .. }));
    }

    #[test]
    fn test_duplicate_ground_truth_id() {
        let yaml = "- id: a.jpg\n  label: Check\n- id: a.jpg\n  label: Utility\n";
        let truth = ground_truth_from_yaml(yaml).unwrap();
        let err = SampleLoader::default().join_labels(&truth, &[]).unwrap_err();
        assert_eq!(err, EvalError::duplicate("a.jpg"));
    }

    #[test]
    fn test_duplicate_prediction_id() {
        let yaml = "- id: a.jpg\n  label: check\n- id: a.jpg\n  label: itr\n";
        let preds = predictions_from_yaml(yaml).unwrap();
        let err = SampleLoader::default().join_labels(&[], &preds).unwrap_err();
        assert_eq!(err, EvalError::duplicate("a.jpg"));
    }

    #[test]
    fn test_join_fields() {
        let truth = vec![
            GroundTruthRecord {
                id: Some("59.jpg".into()),
                label: Some("Check".into()),
                fields: Some(json!({
                    "check_number": "000451",
                    "payee_name": "ACME Corp",
                    "amount_in_numbers": 1500.0,
                    "amount_in_words": null,
                    "bank_name": "HDFC Bank"
                })),
            },
            GroundTruthRecord::new("82.jpg", "Bank Statement"),
            GroundTruthRecord {
                id: Some("9.jpg".into()),
                label: Some("Invoice".into()),
                fields: Some(json!({"invoice_number": "INV-1"})),
            },
        ];
        let preds = vec![
            PredictionRecord {
                id: Some("59.jpg".into()),
                raw_response: Some(
                    r#"{"document_type": "check", "check_number": "000451", "payee_name": "acme corp", "amount_in_numbers": "1,500.00", "bank_name": "SBI"}"#
                        .into(),
                ),
                ..Default::default()
            },
        ];

        let comparisons = SampleLoader::default().join_fields(&truth, &preds).unwrap();
        // 5 check fields + 1 key for the schema-less label
        assert_eq!(comparisons.len(), 6);

        let matched: Vec<_> = comparisons
            .iter()
            .filter(|c| c.matched)
            .map(|c| c.field_name.as_str())
            .collect();
        assert_eq!(
            matched,
            vec!["check_number", "payee_name", "amount_in_numbers", "amount_in_words"]
        );
        assert_eq!(comparisons[5].field_name, "invoice_number");
        assert!(!comparisons[5].matched);
    }

    #[test]
    fn test_load_from_files() {
        let dir = TempDir::new().unwrap();
        let truth_path = dir.path().join("truth.yaml");
        let preds_path = dir.path().join("predictions.json");
        fs::write(&truth_path, TRUTH).unwrap();
        fs::write(
            &preds_path,
            r#"[{"id": "82.jpg", "predicted_label": "Bank Statement"}]"#,
        )
        .unwrap();

        let samples = SampleLoader::default()
            .load_labeled(&truth_path, &preds_path)
            .unwrap();
        assert_eq!(samples.len(), 4);
        assert!(samples[0].is_correct());
        assert!(samples[1..].iter().all(|s| s.predicted_label == "unknown"));
    }

    #[test]
    fn test_load_bad_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            SampleLoader::default().load_ground_truth(&path),
            Err(EvalError::Parse { .. })
        ));
        assert!(matches!(
            SampleLoader::default().load_ground_truth(&dir.path().join("absent.json")),
            Err(EvalError::Io { .. })
        ));
    }
}
