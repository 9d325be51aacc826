//! docsense
//!
//! Umbrella crate over [`docsense_eval`]. The command-line tool lives in
//! `crates/docsense-cli`.

pub use docsense_eval::*;
