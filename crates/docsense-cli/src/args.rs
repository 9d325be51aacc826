//! CLI argument definitions using clap
//!
//! - docsense evaluate -g truth.yaml -p predictions.yaml
//! - docsense fields -g truth.yaml -p predictions.yaml
//! - docsense split --base-path dataset/
//! - docsense parse-response response.txt
//! - docsense report --input metrics.json
//! - docsense schema [document_type]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default configuration file name used across all CLI commands.
pub const DEFAULT_CONFIG_FILE: &str = "docsense.toml";

#[derive(Parser)]
#[command(name = "docsense")]
#[command(about = "docsense - accuracy evaluation for document classification and extraction")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (JSON, YAML or TOML)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score predicted labels against ground truth
    Evaluate {
        /// Ground-truth file (YAML or JSON)
        #[arg(long, short = 'g')]
        ground_truth: PathBuf,

        /// Predictions file (YAML or JSON)
        #[arg(long, short = 'p')]
        predictions: PathBuf,

        /// Output format (table, json, markdown)
        #[arg(long, short = 'f', default_value = "table")]
        format: String,

        /// Write the report to this file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Score extracted field values against ground truth
    Fields {
        /// Ground-truth file with `fields` entries
        #[arg(long, short = 'g')]
        ground_truth: PathBuf,

        /// Predictions file with `fields` or `raw_response` entries
        #[arg(long, short = 'p')]
        predictions: PathBuf,

        /// Output format (table, json, markdown)
        #[arg(long, short = 'f', default_value = "table")]
        format: String,

        /// Write the report to this file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Split a folder-per-category dataset into train and test sets
    Split {
        /// Dataset root containing one folder per category
        #[arg(long)]
        base_path: PathBuf,

        /// Share of images held out for testing
        #[arg(long)]
        test_percentage: Option<f64>,

        /// Shuffle seed
        #[arg(long)]
        seed: Option<u64>,

        /// Keep at most this many test images
        #[arg(long)]
        limit: Option<usize>,

        /// Write the test set as a ground-truth YAML file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Recover JSON from a raw model response
    ParseResponse {
        /// File containing the raw response text
        file: PathBuf,

        /// Return an error object instead of failing
        #[arg(long)]
        lenient: bool,
    },

    /// Show a report from a previous `evaluate --format json` run
    Report {
        /// Metrics JSON file
        #[arg(long, short = 'i')]
        input: PathBuf,

        /// Output format (table, json, markdown)
        #[arg(long, short = 'f', default_value = "table")]
        format: String,
    },

    /// List extraction fields per document type
    Schema {
        /// Only show this document type
        document_type: Option<String>,
    },
}
