//! Evaluation configuration
//!
//! Configuration options for dataset preparation and evaluation runs.
//! Values come from an optional JSON/YAML/TOML file, then `DOCSENSE_*`
//! environment variables.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EvalError, EvalResult};
use crate::schema::{DocumentType, FieldMatcher};

/// Configuration for evaluation runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Dataset folders scanned by the splitter, one per document type
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    /// File extensions treated as document images
    #[serde(default = "default_image_extensions")]
    pub image_extensions: Vec<String>,

    /// Share of the dataset held out for testing
    #[serde(default = "default_test_percentage")]
    pub test_percentage: f64,

    /// Seed for the train/test shuffle
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Label given to documents without a usable prediction
    #[serde(default = "default_unknown_label")]
    pub unknown_label: String,

    /// Map labels like "Bank Statement" onto canonical names before comparing
    #[serde(default = "default_normalize_labels")]
    pub normalize_labels: bool,

    /// Absolute tolerance for numeric field values
    #[serde(default = "default_numeric_tolerance")]
    pub numeric_tolerance: f64,

    /// Compare string field values case-sensitively
    #[serde(default)]
    pub case_sensitive_fields: bool,
}

fn default_categories() -> Vec<String> {
    DocumentType::all()
        .iter()
        .map(|t| t.folder_name().to_string())
        .collect()
}

fn default_image_extensions() -> Vec<String> {
    vec!["jpg".to_string()]
}

fn default_test_percentage() -> f64 {
    0.2
}

fn default_seed() -> u64 {
    42
}

fn default_unknown_label() -> String {
    "unknown".to_string()
}

fn default_normalize_labels() -> bool {
    true
}

fn default_numeric_tolerance() -> f64 {
    0.01
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            image_extensions: default_image_extensions(),
            test_percentage: default_test_percentage(),
            seed: default_seed(),
            unknown_label: default_unknown_label(),
            normalize_labels: default_normalize_labels(),
            numeric_tolerance: default_numeric_tolerance(),
            case_sensitive_fields: false,
        }
    }
}

impl EvalConfig {
    /// Load configuration from a file
    ///
    /// Supports JSON, TOML, and YAML formats based on file extension.
    /// Returns default config if file doesn't exist.
    pub fn load(path: &Path) -> EvalResult<Self> {
        if !path.exists() {
            tracing::debug!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| EvalError::io(format!("Failed to read config file: {}", e), path))?;

        let config: Self = match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => toml::from_str(&content).map_err(|e| {
                EvalError::parse(format!("Failed to parse TOML config: {}", e), path)
            })?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(|e| {
                EvalError::parse(format!("Failed to parse YAML config: {}", e), path)
            })?,
            _ => serde_json::from_str(&content).map_err(|e| {
                EvalError::parse(format!("Failed to parse JSON config: {}", e), path)
            })?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Apply `DOCSENSE_*` overrides from the process environment
    pub fn with_env_overrides(self) -> EvalResult<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `DOCSENSE_*` overrides from an arbitrary lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> EvalResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = lookup("DOCSENSE_SEED") {
            self.seed = seed
                .trim()
                .parse()
                .map_err(|_| EvalError::config("Invalid DOCSENSE_SEED value"))?;
        }

        if let Some(pct) = lookup("DOCSENSE_TEST_PERCENTAGE") {
            self.test_percentage = pct
                .trim()
                .parse()
                .map_err(|_| EvalError::config("Invalid DOCSENSE_TEST_PERCENTAGE value"))?;
        }

        if let Some(label) = lookup("DOCSENSE_UNKNOWN_LABEL") {
            self.unknown_label = label;
        }

        if let Some(tolerance) = lookup("DOCSENSE_NUMERIC_TOLERANCE") {
            self.numeric_tolerance = tolerance
                .trim()
                .parse()
                .map_err(|_| EvalError::config("Invalid DOCSENSE_NUMERIC_TOLERANCE value"))?;
        }

        self.validate()?;
        Ok(self)
    }

    /// Check value ranges
    pub fn validate(&self) -> EvalResult<()> {
        if !(self.test_percentage > 0.0 && self.test_percentage <= 1.0) {
            return Err(EvalError::config(format!(
                "test_percentage must be in (0, 1], got {}",
                self.test_percentage
            )));
        }
        if self.numeric_tolerance < 0.0 || self.numeric_tolerance.is_nan() {
            return Err(EvalError::config("numeric_tolerance must be non-negative"));
        }
        if self.unknown_label.trim().is_empty() {
            return Err(EvalError::config("unknown_label must not be blank"));
        }
        Ok(())
    }

    /// Set the test split share
    pub fn with_test_percentage(mut self, test_percentage: f64) -> Self {
        self.test_percentage = test_percentage;
        self
    }

    /// Set the shuffle seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the dataset folders
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    /// Matcher built from the field comparison settings
    pub fn matcher(&self) -> FieldMatcher {
        FieldMatcher::new(self.numeric_tolerance, self.case_sensitive_fields)
    }

    /// Apply label normalisation if enabled
    pub fn normalize_label(&self, label: &str) -> String {
        if self.normalize_labels {
            DocumentType::normalize(label)
        } else {
            label.trim().to_string()
        }
    }
}
