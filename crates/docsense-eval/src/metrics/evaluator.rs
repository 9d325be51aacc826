//! Label evaluator
//!
//! Turns a sequence of labeled samples into precision, recall, F1,
//! accuracy, macro-F1 and the list of misclassified samples.

use std::collections::HashSet;

use chrono::Utc;

use super::confusion::ConfusionMatrix;
use super::tally::ConfusionTally;
use super::types::{MetricsReport, OverallMetrics, ratio};
use crate::error::{EvalError, EvalResult};
use crate::samples::LabeledSample;

/// Evaluator for document-type predictions
///
/// Stateless: the same input always yields the same report (apart from
/// the timestamp).
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator;

impl Evaluator {
    /// Create a new evaluator
    pub fn new() -> Self {
        Self
    }

    /// Evaluate predictions against ground truth
    ///
    /// Fails with [`EvalError::EmptyInput`] when `samples` is empty,
    /// [`EvalError::MalformedSample`] for a blank identifier or label, and
    /// [`EvalError::DuplicateSample`] when an identifier repeats.
    pub fn evaluate(&self, samples: &[LabeledSample]) -> EvalResult<MetricsReport> {
        if samples.is_empty() {
            return Err(EvalError::EmptyInput);
        }
        validate(samples)?;

        tracing::debug!("Evaluating {} samples", samples.len());

        let mut tally = ConfusionTally::new();
        for sample in samples {
            tally.record(sample);
        }
        let per_class = tally.class_metrics();

        let total = samples.len() as u32;
        let correct = samples.iter().filter(|s| s.is_correct()).count() as u32;

        let present: Vec<_> = per_class.values().filter(|m| m.support > 0).collect();
        let macro_f1 = present.iter().map(|m| m.f1).sum::<f64>() / present.len() as f64;
        let weighted_f1 = present
            .iter()
            .map(|m| m.f1 * m.support as f64)
            .sum::<f64>()
            / total as f64;

        let overall = OverallMetrics {
            accuracy: ratio(correct, total),
            macro_f1,
            weighted_f1,
            correct,
            total,
            incorrect: total - correct,
        };

        let misclassified: Vec<LabeledSample> = samples
            .iter()
            .filter(|s| !s.is_correct())
            .cloned()
            .collect();

        tracing::info!(
            "Accuracy: {:.2}% ({}/{} correct), macro-F1: {:.3}",
            overall.accuracy * 100.0,
            correct,
            total,
            macro_f1
        );

        Ok(MetricsReport {
            per_class,
            overall,
            misclassified,
            confusion: ConfusionMatrix::from_samples(samples),
            timestamp: Utc::now(),
        })
    }
}

/// Evaluate with a default [`Evaluator`]
pub fn evaluate(samples: &[LabeledSample]) -> EvalResult<MetricsReport> {
    Evaluator::new().evaluate(samples)
}

fn validate(samples: &[LabeledSample]) -> EvalResult<()> {
    let mut seen = HashSet::with_capacity(samples.len());
    for (index, sample) in samples.iter().enumerate() {
        sample.validate(index)?;
        if !seen.insert(sample.identifier.as_str()) {
            return Err(EvalError::duplicate(&sample.identifier));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_samples(pairs: &[(&str, &str)]) -> Vec<LabeledSample> {
        pairs
            .iter()
            .enumerate()
            .map(|(i, (predicted, truth))| {
                LabeledSample::new(format!("doc-{}", i), *predicted, *truth)
            })
            .collect()
    }

    #[test]
    fn test_reference_example() {
        let samples = make_samples(&[("A", "A"), ("B", "A"), ("A", "A"), ("B", "B")]);
        let report = evaluate(&samples).unwrap();

        assert_eq!(report.overall.accuracy, 0.75);
        assert_eq!(report.overall.correct, 3);
        assert_eq!(report.overall.incorrect, 1);

        let a = report.class("A").unwrap();
        assert_eq!((a.true_positives, a.false_positives, a.false_negatives), (2, 0, 1));
        assert_eq!(a.precision, 1.0);
        assert!((a.recall - 0.667).abs() < 0.001);
        assert!((a.f1 - 0.8).abs() < 1e-9);

        let b = report.class("B").unwrap();
        assert_eq!((b.true_positives, b.false_positives, b.false_negatives), (1, 1, 0));
        assert_eq!(b.precision, 0.5);
        assert_eq!(b.recall, 1.0);
        assert!((b.f1 - 0.667).abs() < 0.001);

        assert!((report.overall.macro_f1 - (0.8 + 2.0 / 3.0) / 2.0).abs() < 1e-9);
        assert_eq!(report.misclassified, vec![samples[1].clone()]);
    }

    #[test]
    fn test_all_correct() {
        let samples = make_samples(&[("check", "check"), ("itr", "itr")]);
        let report = evaluate(&samples).unwrap();
        assert_eq!(report.accuracy(), 1.0);
        assert!(report.misclassified.is_empty());
        assert_eq!(report.overall.macro_f1, 1.0);
    }

    #[test]
    fn test_all_wrong() {
        let samples = make_samples(&[("check", "itr"), ("itr", "utility_bill")]);
        let report = evaluate(&samples).unwrap();
        assert_eq!(report.accuracy(), 0.0);
        assert_eq!(report.overall.macro_f1, 0.0);
        assert_eq!(report.misclassified.len(), 2);
        for metrics in report.per_class.values() {
            assert_eq!(metrics.f1, 0.0);
        }
    }

    #[test]
    fn test_macro_f1_ignores_predicted_only_classes() {
        // "unknown" is only ever predicted, so it has no support
        let samples = make_samples(&[("check", "check"), ("unknown", "check")]);
        let report = evaluate(&samples).unwrap();

        assert!(report.per_class.contains_key("unknown"));
        assert_eq!(report.class("unknown").unwrap().support, 0);
        let check_f1 = report.class("check").unwrap().f1;
        assert!((report.overall.macro_f1 - check_f1).abs() < 1e-9);
    }

    #[test]
    fn test_weighted_f1() {
        let samples = make_samples(&[("A", "A"), ("B", "A"), ("A", "A"), ("B", "B")]);
        let report = evaluate(&samples).unwrap();
        let expected = (0.8 * 3.0 + (2.0 / 3.0) * 1.0) / 4.0;
        assert!((report.overall.weighted_f1 - expected).abs() < 1e-9);
    }

    #[test]
    fn test_misclassified_preserves_order() {
        let samples = make_samples(&[("x", "a"), ("a", "a"), ("y", "b"), ("z", "c")]);
        let report = evaluate(&samples).unwrap();
        let ids: Vec<_> = report
            .misclassified
            .iter()
            .map(|s| s.identifier.as_str())
            .collect();
        assert_eq!(ids, vec!["doc-0", "doc-2", "doc-3"]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(evaluate(&[]).unwrap_err(), EvalError::EmptyInput);
    }

    #[test]
    fn test_malformed_sample() {
        let samples = vec![
            LabeledSample::new("ok", "a", "a"),
            LabeledSample::new("", "a", "a"),
        ];
        assert!(matches!(
            evaluate(&samples),
            Err(EvalError::MalformedSample { index: 1, .. })
        ));
    }

    #[test]
    fn test_duplicate_identifier() {
        let samples = vec![
            LabeledSample::new("same", "a", "a"),
            LabeledSample::new("same", "b", "a"),
        ];
        assert_eq!(evaluate(&samples).unwrap_err(), EvalError::duplicate("same"));
    }

    #[test]
    fn test_confusion_matches_support() {
        let samples = make_samples(&[("A", "A"), ("B", "A"), ("A", "A"), ("B", "B")]);
        let report = evaluate(&samples).unwrap();
        for (label, metrics) in &report.per_class {
            assert_eq!(report.confusion.row_total(label), metrics.support);
        }
        assert_eq!(report.confusion.total(), report.overall.total);
    }
}
