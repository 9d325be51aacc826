//! Property-based tests for the label evaluator
//!
//! Random (predicted, true) label sequences with unique identifiers:
//! - every rate stays within [0, 1]
//! - all-correct and never-correct runs hit the accuracy bounds
//! - misclassified samples keep input order
//! - the confusion matrix agrees with per-class support

use docsense_eval::{LabeledSample, evaluate};
use proptest::prelude::*;

const LABELS: [&str; 4] = ["bank_statement", "check", "itr", "unknown"];

fn to_samples(pairs: &[(usize, usize)]) -> Vec<LabeledSample> {
    pairs
        .iter()
        .enumerate()
        .map(|(i, (predicted, truth))| {
            LabeledSample::new(format!("doc-{}.jpg", i), LABELS[*predicted], LABELS[*truth])
        })
        .collect()
}

fn label_pairs() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0..LABELS.len(), 0..LABELS.len()), 1..60)
}

fn in_unit_range(x: f64) -> bool {
    (0.0..=1.0).contains(&x)
}

/// Property: accuracy, per-class rates and both F1 averages lie in [0, 1]
#[test]
fn proptest_rates_bounded() {
    proptest!(|(pairs in label_pairs())| {
        let report = evaluate(&to_samples(&pairs)).unwrap();
        let overall = &report.overall;

        prop_assert!(in_unit_range(overall.accuracy));
        prop_assert!(in_unit_range(overall.macro_f1));
        prop_assert!(in_unit_range(overall.weighted_f1));
        prop_assert_eq!(overall.correct + overall.incorrect, overall.total);

        for metrics in report.per_class.values() {
            prop_assert!(in_unit_range(metrics.precision));
            prop_assert!(in_unit_range(metrics.recall));
            prop_assert!(in_unit_range(metrics.f1));
            if metrics.precision == 0.0 && metrics.recall == 0.0 {
                prop_assert_eq!(metrics.f1, 0.0);
            }
        }
    });
}

/// Property: predictions that always match give accuracy 1 and no misclassified samples
#[test]
fn proptest_all_correct() {
    proptest!(|(truths in prop::collection::vec(0..LABELS.len(), 1..60))| {
        let pairs: Vec<(usize, usize)> = truths.iter().map(|t| (*t, *t)).collect();
        let report = evaluate(&to_samples(&pairs)).unwrap();

        prop_assert_eq!(report.overall.accuracy, 1.0);
        prop_assert!(report.misclassified.is_empty());
    });
}

/// Property: predictions that never match give accuracy 0
#[test]
fn proptest_never_correct() {
    proptest!(|(pairs in prop::collection::vec((0..LABELS.len(), 1..LABELS.len()), 1..60))| {
        let shifted: Vec<(usize, usize)> = pairs
            .iter()
            .map(|(truth, offset)| ((truth + offset) % LABELS.len(), *truth))
            .collect();
        let samples = to_samples(&shifted);
        let report = evaluate(&samples).unwrap();

        prop_assert_eq!(report.overall.accuracy, 0.0);
        prop_assert_eq!(report.misclassified.len(), samples.len());
    });
}

/// Property: misclassified is exactly the wrong samples, in input order
#[test]
fn proptest_misclassified_keeps_order() {
    proptest!(|(pairs in label_pairs())| {
        let samples = to_samples(&pairs);
        let report = evaluate(&samples).unwrap();

        let expected: Vec<LabeledSample> =
            samples.iter().filter(|s| !s.is_correct()).cloned().collect();
        prop_assert_eq!(report.misclassified, expected);
    });
}

/// Property: confusion rows sum to support and the matrix covers every sample
#[test]
fn proptest_confusion_matches_support() {
    proptest!(|(pairs in label_pairs())| {
        let samples = to_samples(&pairs);
        let report = evaluate(&samples).unwrap();

        for (label, metrics) in &report.per_class {
            prop_assert_eq!(report.confusion.row_total(label), metrics.support);
        }
        prop_assert_eq!(report.confusion.total() as usize, samples.len());
    });
}
