//! Test dataset preparation
//!
//! Scans one folder per document type, shuffles the images with a seeded
//! RNG and holds out a share of them as the test set.

mod splitter;

pub use splitter::{DatasetSplit, DatasetSplitter, TestSample};
