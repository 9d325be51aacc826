//! Confusion matrix
//!
//! Dense true-by-predicted counts used to see which document types get
//! mistaken for which.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::samples::LabeledSample;

/// One off-diagonal cell of the matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confusion {
    pub true_label: String,
    pub predicted_label: String,
    pub count: u32,
}

/// Square matrix where `counts[i][j]` is the number of samples whose true
/// label is `labels[i]` and predicted label is `labels[j]`
///
/// Deserialization rejects unsorted or repeated labels and a `counts`
/// table that is not `labels.len()` square.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawConfusionMatrix")]
pub struct ConfusionMatrix {
    /// Every observed label, sorted
    pub labels: Vec<String>,

    /// Row = true label, column = predicted label
    pub counts: Vec<Vec<u32>>,
}

/// Unchecked wire form of [`ConfusionMatrix`]
#[derive(Deserialize)]
struct RawConfusionMatrix {
    labels: Vec<String>,
    counts: Vec<Vec<u32>>,
}

impl TryFrom<RawConfusionMatrix> for ConfusionMatrix {
    type Error = String;

    fn try_from(raw: RawConfusionMatrix) -> Result<Self, Self::Error> {
        if raw.labels.windows(2).any(|w| w[0] >= w[1]) {
            return Err("confusion labels must be sorted and unique".to_string());
        }
        let n = raw.labels.len();
        if raw.counts.len() != n || raw.counts.iter().any(|row| row.len() != n) {
            return Err(format!("confusion counts must be a {n}x{n} table for {n} labels"));
        }
        Ok(Self {
            labels: raw.labels,
            counts: raw.counts,
        })
    }
}

impl ConfusionMatrix {
    /// Build the matrix over all labels seen in either position
    pub fn from_samples(samples: &[LabeledSample]) -> Self {
        let labels: Vec<String> = samples
            .iter()
            .flat_map(|s| [s.true_label.clone(), s.predicted_label.clone()])
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut counts = vec![vec![0u32; labels.len()]; labels.len()];
        for sample in samples {
            if let (Some(row), Some(col)) = (
                index_of(&labels, &sample.true_label),
                index_of(&labels, &sample.predicted_label),
            ) {
                counts[row][col] += 1;
            }
        }

        Self { labels, counts }
    }

    /// Count for a (true, predicted) pair
    pub fn get(&self, true_label: &str, predicted_label: &str) -> u32 {
        match (
            index_of(&self.labels, true_label),
            index_of(&self.labels, predicted_label),
        ) {
            (Some(row), Some(col)) => self.cell(row, col),
            _ => 0,
        }
    }

    /// Number of samples whose true label is `label`
    pub fn row_total(&self, label: &str) -> u32 {
        index_of(&self.labels, label)
            .and_then(|row| self.counts.get(row))
            .map(|cells| cells.iter().sum())
            .unwrap_or(0)
    }

    /// Sum of all cells
    pub fn total(&self) -> u32 {
        self.counts.iter().flatten().sum()
    }

    /// Off-diagonal cells, largest first, ties broken by label order
    pub fn top_confusions(&self, limit: usize) -> Vec<Confusion> {
        let mut cells = Vec::new();
        for (row, true_label) in self.labels.iter().enumerate() {
            for (col, predicted_label) in self.labels.iter().enumerate() {
                let count = self.cell(row, col);
                if row != col && count > 0 {
                    cells.push(Confusion {
                        true_label: true_label.clone(),
                        predicted_label: predicted_label.clone(),
                        count,
                    });
                }
            }
        }
        // stable sort keeps row-major order among equal counts
        cells.sort_by(|a, b| b.count.cmp(&a.count));
        cells.truncate(limit);
        cells
    }

    fn cell(&self, row: usize, col: usize) -> u32 {
        self.counts
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .unwrap_or(0)
    }
}

fn index_of(labels: &[String], label: &str) -> Option<usize> {
    labels.binary_search_by(|l| l.as_str().cmp(label)).ok()
}
