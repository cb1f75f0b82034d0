//! Core error types for offerlens.

use thiserror::Error;

/// Core error type for offerlens operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Required user input is missing or empty.
    #[error("{0}")]
    Validation(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid data from an API response.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// Returns true if this error is a user-input validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
