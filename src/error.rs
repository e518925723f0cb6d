//! Error types for the evaluation harness.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our custom error.
pub type Result<T> = std::result::Result<T, EvalError>;

/// Errors that can occur while loading, scoring or persisting an evaluation.
#[derive(Error, Debug)]
pub enum EvalError {
    /// Error reading or writing files.
    #[error("I/O error for path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error during serialization/deserialization of results.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The benchmark file is not a valid RoSE JSON document.
    #[error("Failed to parse dataset '{path}': {message}")]
    DatasetParse { path: PathBuf, message: String },

    /// The requested subset is not present in the benchmark file.
    #[error("Subset '{name}' not found (available: {})", .available.join(", "))]
    SubsetNotFound { name: String, available: Vec<String> },

    /// No claims were supplied for a summary the pipeline asked about.
    #[error("No system claim for summary id {summary_id}")]
    MissingClaims { summary_id: String },

    /// The device hint could not be resolved to a usable device.
    #[error("Invalid device '{0}'")]
    InvalidDevice(String),

    /// Failure inside the scoring pipeline.
    #[error("Scoring error: {0}")]
    Scoring(String),

    /// LLM API error.
    #[error("LLM API error: {0}")]
    LlmApi(String),

    /// LLM response parsing error.
    #[error("Failed to parse LLM response: {0}")]
    LlmParse(String),

    /// HTTP request error.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Configuration file error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl EvalError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<reqwest::Error> for EvalError {
    fn from(err: reqwest::Error) -> Self {
        EvalError::Http(err.to_string())
    }
}

impl From<serde_json::Error> for EvalError {
    fn from(err: serde_json::Error) -> Self {
        EvalError::LlmParse(err.to_string())
    }
}
