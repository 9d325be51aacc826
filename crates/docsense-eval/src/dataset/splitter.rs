//! Seeded train/test split over category folders

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::config::EvalConfig;
use crate::error::{EvalError, EvalResult};
use crate::samples::GroundTruthRecord;

/// An image with its ground-truth label (the folder it came from)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSample {
    pub path: PathBuf,
    pub true_label: String,
}

/// Result of splitting a dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSplit {
    /// Images kept for training
    pub train: Vec<TestSample>,

    /// Held-out images
    pub test: Vec<TestSample>,

    /// Number of test images per label
    pub test_distribution: BTreeMap<String, usize>,
}

impl DatasetSplit {
    /// Keep only the first `limit` test samples
    pub fn truncate_test(&mut self, limit: usize) {
        self.test.truncate(limit);
        self.test_distribution = distribution(&self.test);
    }

    /// Test set in the ground-truth file format
    pub fn test_records(&self) -> Vec<GroundTruthRecord> {
        self.test
            .iter()
            .map(|s| GroundTruthRecord::new(s.path.display().to_string(), &s.true_label))
            .collect()
    }
}

/// Splitter for a folder-per-category image dataset
pub struct DatasetSplitter {
    categories: Vec<String>,
    extensions: Vec<String>,
    test_percentage: f64,
    seed: u64,
}

impl DatasetSplitter {
    /// Create a splitter from configuration
    pub fn new(config: &EvalConfig) -> EvalResult<Self> {
        config.validate()?;
        Ok(Self {
            categories: config.categories.clone(),
            extensions: config
                .image_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
            test_percentage: config.test_percentage,
            seed: config.seed,
        })
    }

    /// Collect every image under `base_path/<category>`, sorted by path
    pub fn scan(&self, base_path: &Path) -> EvalResult<Vec<TestSample>> {
        if !base_path.is_dir() {
            return Err(EvalError::io("Base path not found", base_path));
        }

        tracing::info!("Scanning folders in: {}", base_path.display());

        let mut all_images = Vec::new();
        for category in &self.categories {
            let category_path = base_path.join(category);
            if !category_path.is_dir() {
                tracing::warn!("Category folder not found: {}", category_path.display());
                continue;
            }

            let mut images: Vec<PathBuf> = WalkDir::new(&category_path)
                .max_depth(1)
                .into_iter()
                .filter_map(|e| e.ok())
                .map(|e| e.into_path())
                .filter(|p| self.is_image(p))
                .collect();
            images.sort();

            tracing::info!("Found {} images in {}", images.len(), category);
            all_images.extend(images.into_iter().map(|path| TestSample {
                path,
                true_label: category.clone(),
            }));
        }

        tracing::info!("Total images found: {}", all_images.len());
        Ok(all_images)
    }

    /// Scan and split into train and test parts
    pub fn split(&self, base_path: &Path) -> EvalResult<DatasetSplit> {
        let images = self.scan(base_path)?;
        Ok(self.split_samples(images))
    }

    /// Shuffle with the configured seed and cut at `n * (1 - test_percentage)`
    pub fn split_samples(&self, mut samples: Vec<TestSample>) -> DatasetSplit {
        let mut rng = StdRng::seed_from_u64(self.seed);
        samples.shuffle(&mut rng);

        let split_index = (samples.len() as f64 * (1.0 - self.test_percentage)).floor() as usize;
        let test = samples.split_off(split_index.min(samples.len()));
        let train = samples;

        tracing::info!(
            "Train set size: {} ({:.0}%), test set size: {} ({:.0}%)",
            train.len(),
            100.0 * (1.0 - self.test_percentage),
            test.len(),
            100.0 * self.test_percentage
        );

        let test_distribution = distribution(&test);
        for (label, count) in &test_distribution {
            tracing::debug!("  {}: {}", label, count);
        }

        DatasetSplit {
            train,
            test,
            test_distribution,
        }
    }

    fn is_image(&self, path: &Path) -> bool {
        path.is_file()
            && path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| self.extensions.iter().any(|x| x == &ext.to_lowercase()))
    }
}

fn distribution(samples: &[TestSample]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for sample in samples {
        *counts.entry(sample.true_label.clone()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::TempDir;

    fn make_dataset(per_category: usize) -> TempDir {
        let dir = TempDir::new().unwrap();
        for category in ["Bank Statement", "Check", "Salary Slip"] {
            let folder = dir.path().join(category);
            fs::create_dir_all(&folder).unwrap();
            for i in 0..per_category {
                fs::write(folder.join(format!("{}.jpg", i)), b"img").unwrap();
            }
            fs::write(folder.join("notes.txt"), b"ignore me").unwrap();
        }
        dir
    }

    #[test]
    fn test_scan_filters_extensions_and_missing_folders() {
        let dir = make_dataset(4);
        fs::write(dir.path().join("Check").join("UPPER.JPG"), b"img").unwrap();

        let splitter = DatasetSplitter::new(&EvalConfig::default()).unwrap();
        let images = splitter.scan(dir.path()).unwrap();

        // ITR_Form 16 and Utility folders are absent
        assert_eq!(images.len(), 13);
        assert!(images.iter().all(|s| s.path.extension().unwrap() != "txt"));
        assert_eq!(
            images.iter().filter(|s| s.true_label == "Check").count(),
            5
        );
    }

    #[test]
    fn test_missing_base_path() {
        let splitter = DatasetSplitter::new(&EvalConfig::default()).unwrap();
        let err = splitter.scan(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, EvalError::Io { .. }));
    }

    #[test]
    fn test_split_sizes_and_partition() {
        let dir = make_dataset(10);
        let splitter = DatasetSplitter::new(&EvalConfig::default()).unwrap();
        let split = splitter.split(dir.path()).unwrap();

        assert_eq!(split.train.len(), 24);
        assert_eq!(split.test.len(), 6);
        assert_eq!(split.test_distribution.values().sum::<usize>(), 6);

        let train: HashSet<_> = split.train.iter().map(|s| &s.path).collect();
        let test: HashSet<_> = split.test.iter().map(|s| &s.path).collect();
        assert!(train.is_disjoint(&test));
        assert_eq!(train.len() + test.len(), 30);
    }

    #[test]
    fn test_split_is_deterministic_for_seed() {
        let dir = make_dataset(10);
        let config = EvalConfig::default().with_seed(7);
        let a = DatasetSplitter::new(&config).unwrap().split(dir.path()).unwrap();
        let b = DatasetSplitter::new(&config).unwrap().split(dir.path()).unwrap();
        assert_eq!(a.test, b.test);
        assert_eq!(a.train, b.train);
    }

    #[test]
    fn test_truncate_and_records() {
        let dir = make_dataset(10);
        let splitter = DatasetSplitter::new(&EvalConfig::default()).unwrap();
        let mut split = splitter.split(dir.path()).unwrap();
        split.truncate_test(2);

        assert_eq!(split.test.len(), 2);
        assert_eq!(split.test_distribution.values().sum::<usize>(), 2);

        let records = split.test_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].label.as_deref(), Some(split.test[0].true_label.as_str()));
    }

    #[test]
    fn test_invalid_percentage() {
        let config = EvalConfig::default().with_test_percentage(0.0);
        assert!(DatasetSplitter::new(&config).is_err());
    }
}
