//! Field-level extraction accuracy

use std::collections::{BTreeMap, HashSet};

use chrono::Utc;

use super::types::{FieldAccuracy, FieldReport, ratio};
use crate::error::{EvalError, EvalResult};
use crate::samples::FieldComparison;

/// Evaluator for extracted field values
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldEvaluator;

impl FieldEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Compute per-field and overall match rates
    ///
    /// The pair (identifier, field_name) must be unique.
    pub fn evaluate(&self, comparisons: &[FieldComparison]) -> EvalResult<FieldReport> {
        if comparisons.is_empty() {
            return Err(EvalError::EmptyInput);
        }

        let mut seen = HashSet::with_capacity(comparisons.len());
        for (index, cmp) in comparisons.iter().enumerate() {
            cmp.validate(index)?;
            if !seen.insert((cmp.identifier.as_str(), cmp.field_name.as_str())) {
                return Err(EvalError::duplicate(format!(
                    "{}/{}",
                    cmp.identifier, cmp.field_name
                )));
            }
        }

        let mut per_field: BTreeMap<String, FieldAccuracy> = BTreeMap::new();
        for cmp in comparisons {
            let entry = per_field
                .entry(cmp.field_name.clone())
                .or_insert(FieldAccuracy {
                    total: 0,
                    matched: 0,
                    accuracy: 0.0,
                });
            entry.total += 1;
            if cmp.matched {
                entry.matched += 1;
            }
        }
        for field in per_field.values_mut() {
            field.accuracy = ratio(field.matched, field.total);
        }

        let total = comparisons.len() as u32;
        let matched = comparisons.iter().filter(|c| c.matched).count() as u32;
        let mismatches: Vec<FieldComparison> = comparisons
            .iter()
            .filter(|c| !c.matched)
            .cloned()
            .collect();

        tracing::info!(
            "Field accuracy: {:.2}% ({}/{} fields matched)",
            ratio(matched, total) * 100.0,
            matched,
            total
        );

        Ok(FieldReport {
            per_field,
            accuracy: ratio(matched, total),
            total,
            matched,
            mismatches,
            timestamp: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn cmp(id: &str, field: &str, matched: bool) -> FieldComparison {
        FieldComparison::new(id, field, json!("p"), json!("t"), matched)
    }

    #[test]
    fn test_field_accuracy() {
        let comparisons = vec![
            cmp("1.jpg", "payee_name", true),
            cmp("1.jpg", "bank_name", false),
            cmp("2.jpg", "payee_name", false),
            cmp("2.jpg", "bank_name", false),
        ];
        let report = FieldEvaluator::new().evaluate(&comparisons).unwrap();

        assert_eq!(report.total, 4);
        assert_eq!(report.matched, 1);
        assert_eq!(report.accuracy, 0.25);
        assert_eq!(report.per_field["payee_name"].accuracy, 0.5);
        assert_eq!(report.per_field["bank_name"].accuracy, 0.0);

        let order: Vec<_> = report
            .mismatches
            .iter()
            .map(|c| (c.identifier.as_str(), c.field_name.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![("1.jpg", "bank_name"), ("2.jpg", "payee_name"), ("2.jpg", "bank_name")]
        );
    }

    #[test]
    fn test_empty_and_malformed() {
        let evaluator = FieldEvaluator::new();
        assert_eq!(evaluator.evaluate(&[]).unwrap_err(), EvalError::EmptyInput);

        let bad = vec![FieldComparison::new("", "x", Value::Null, Value::Null, true)];
        assert!(matches!(
            evaluator.evaluate(&bad),
            Err(EvalError::MalformedSample { index: 0, .. })
        ));
    }

    #[test]
    fn test_duplicate_pair() {
        let comparisons = vec![cmp("1.jpg", "year", true), cmp("1.jpg", "year", false)];
        assert_eq!(
            FieldEvaluator::new().evaluate(&comparisons).unwrap_err(),
            EvalError::duplicate("1.jpg/year")
        );
    }
}
