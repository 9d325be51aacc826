//! Error types for evaluation
//!
//! Every fallible operation in this crate returns [`EvalResult`]. Malformed
//! input is always surfaced to the caller; nothing is skipped silently.

use std::path::Path;

use thiserror::Error;

/// Result type alias for evaluation operations
pub type EvalResult<T> = Result<T, EvalError>;

/// Main error type for the evaluation crate
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// No samples were supplied, so no metric is meaningful
    #[error("Empty input: no samples to evaluate")]
    EmptyInput,

    /// A sample is missing its identifier or a label
    #[error("Malformed sample at index {index}: {reason}")]
    MalformedSample { index: usize, reason: String },

    /// The same identifier appeared twice in one run
    #[error("Duplicate sample identifier: {identifier}")]
    DuplicateSample { identifier: String },

    /// Configuration values out of range or unreadable
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    /// Dataset or prediction file could not be decoded
    #[error("Parse error: {message}")]
    Parse {
        message: String,
        path: Option<String>,
    },

    /// A raw model response could not be turned into JSON
    #[error("Response could not be parsed as JSON: {message}")]
    ResponseParse { message: String },
}

impl EvalError {
    /// Create a malformed sample error
    pub fn malformed(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedSample {
            index,
            reason: reason.into(),
        }
    }

    /// Create a duplicate sample error
    pub fn duplicate(identifier: impl Into<String>) -> Self {
        Self::DuplicateSample {
            identifier: identifier.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an IO error tied to a path
    pub fn io(message: impl Into<String>, path: &Path) -> Self {
        Self::Io {
            message: message.into(),
            path: Some(path.display().to_string()),
        }
    }

    /// Create a parse error tied to a path
    pub fn parse(message: impl Into<String>, path: &Path) -> Self {
        Self::Parse {
            message: message.into(),
            path: Some(path.display().to_string()),
        }
    }

    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            EvalError::EmptyInput => "EMPTY_INPUT",
            EvalError::MalformedSample { .. } => "MALFORMED_SAMPLE",
            EvalError::DuplicateSample { .. } => "DUPLICATE_SAMPLE",
            EvalError::InvalidConfig { .. } => "INVALID_CONFIG",
            EvalError::Io { .. } => "IO_ERROR",
            EvalError::Parse { .. } => "PARSE_ERROR",
            EvalError::ResponseParse { .. } => "RESPONSE_PARSE_ERROR",
        }
    }
}

impl From<std::io::Error> for EvalError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            path: None,
        }
    }
}

impl From<serde_json::Error> for EvalError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            message: err.to_string(),
            path: None,
        }
    }
}

impl From<serde_yaml::Error> for EvalError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse {
            message: err.to_string(),
            path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EvalError::malformed(3, "missing identifier");
        assert_eq!(
            err.to_string(),
            "Malformed sample at index 3: missing identifier"
        );
        assert_eq!(err.error_code(), "MALFORMED_SAMPLE");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: EvalError = io.into();
        assert!(matches!(err, EvalError::Io { path: None, .. }));
    }
}
