//! Error types for the review sentiment library

use crate::utils::config::ConfigError;
use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// A required input column is missing (fatal for the run)
    #[error("Expected column '{0}' not found in dataset")]
    MissingColumn(String),

    /// The polarity scorer could not score a single review
    #[error("Polarity scorer failed: {0}")]
    Scorer(String),

    /// Invalid input passed to a library call
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Data parsing error
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// CSV read/write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error only affects a single review and the batch may continue
    pub fn is_isolated(&self) -> bool {
        matches!(self, Error::Scorer(_))
    }
}
