//! Error types for spanmark.

use thiserror::Error;

/// Result type for spanmark operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for spanmark operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Detector configuration failed.
    ///
    /// Raised at setup time, before any scanning: an empty detector set,
    /// an empty entity-kind selection, or a detector that reports itself
    /// unavailable.
    #[error("Detector configuration failed: {0}")]
    Config(String),

    /// A detection pass failed.
    #[error("Detection failed: {0}")]
    Detection(String),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a detection error.
    pub fn detection(msg: impl Into<String>) -> Self {
        Error::Detection(msg.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }
}
