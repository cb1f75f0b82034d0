//! Fetch error types.

use serde_json::Value;
use thiserror::Error;

// ============================================================================
// Fetch Error
// ============================================================================

/// Error type for catalog requests.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP plumbing failed outside the retry loop (reading a body,
    /// building a client).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request never received an HTTP status (connect failure,
    /// timeout), and the retry budget is exhausted.
    #[error("{label} request failed: {message}")]
    Network {
        /// Which API the request targeted.
        label: String,
        /// Transport error description.
        message: String,
    },

    /// The provider answered with a non-success status that is either not
    /// retryable or outlived the retry budget.
    #[error("{label} request failed ({status}): {message}")]
    Status {
        /// Which API the request targeted.
        label: String,
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body, or the raw body text.
        message: String,
        /// Parsed response body, when it was JSON.
        body: Option<Value>,
    },

    /// The token endpoint answered but the grant response was unusable.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Core error (validation, configuration, data).
    #[error(transparent)]
    Core(#[from] offerlens_core::CoreError),
}

impl FetchError {
    /// The HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The provider response body carried by this error, if any.
    pub fn response_body(&self) -> Option<&Value> {
        match self {
            Self::Status { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Returns true for failures that never reached or never got an
    /// answer from the provider.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Network { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use offerlens_core::CoreError;

    #[test]
    fn test_status_error_message_embeds_label_and_status() {
        let error = FetchError::Status {
            label: "Creators API".to_string(),
            status: 429,
            message: "Too many requests".to_string(),
            body: None,
        };
        assert_eq!(
            error.to_string(),
            "Creators API request failed (429): Too many requests"
        );
        assert_eq!(error.status(), Some(429));
    }

    #[test]
    fn test_network_error_message_has_no_status() {
        let error = FetchError::Network {
            label: "Creators API".to_string(),
            message: "connection reset".to_string(),
        };
        assert_eq!(error.to_string(), "Creators API request failed: connection reset");
        assert_eq!(error.status(), None);
        assert!(error.is_network());
    }

    #[test]
    fn test_core_validation_message_is_unwrapped() {
        let error = FetchError::from(CoreError::Validation(
            "Keywords are required".to_string(),
        ));
        assert_eq!(error.to_string(), "Keywords are required");
    }

    #[test]
    fn test_response_body_only_on_status_errors() {
        let error = FetchError::Status {
            label: "Amazon PA-API".to_string(),
            status: 400,
            message: "InvalidParameterValue".to_string(),
            body: Some(serde_json::json!({ "Errors": [] })),
        };
        assert!(error.response_body().is_some());

        let error = FetchError::AuthenticationFailed("bad grant".to_string());
        assert!(error.response_body().is_none());
    }
}
