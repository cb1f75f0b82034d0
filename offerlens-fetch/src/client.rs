//! HTTP transport with retry handling.
//!
//! [`HttpClient`] wraps a shared [`reqwest::Client`] and drives every
//! outbound POST through one retry loop: transport errors and retryable
//! statuses back off exponentially (honoring `Retry-After` when the server
//! sends one), everything else surfaces immediately as a [`FetchError`].

use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, RETRY_AFTER};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use offerlens_core::CoreError;

use crate::error::FetchError;
use crate::retry::{parse_retry_after, RetryPolicy};

/// User agent reported to upstream APIs.
pub const USER_AGENT: &str = concat!("OfferLens/", env!("CARGO_PKG_VERSION"));

/// Timeout applied when a request does not specify its own.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Longest raw body excerpt quoted in error messages.
const ERROR_EXCERPT_LEN: usize = 300;

// ============================================================================
// Request Specification
// ============================================================================

/// A fully prepared JSON POST: URL, headers, body, and retry behavior.
///
/// Sources build one of these per record so the transport layer can replay
/// the identical request on each retry attempt.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    /// Human-readable name used in logs and error messages.
    pub label: String,
    /// Absolute request URL.
    pub url: String,
    /// JSON payload.
    pub body: Value,
    /// Headers beyond the defaults (authorization, content type, ...).
    pub headers: HeaderMap,
    /// Retry behavior for this request.
    pub policy: RetryPolicy,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl RequestSpec {
    /// Creates a spec with default headers, policy, and timeout.
    pub fn new(label: impl Into<String>, url: impl Into<String>, body: Value) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
            body,
            headers: HeaderMap::new(),
            policy: RetryPolicy::default(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Replaces the header set.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Replaces the retry policy.
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replaces the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Builds a header value from credential-derived text.
///
/// The offending value is deliberately left out of the error message since
/// it may be a secret.
pub fn header_value(value: &str) -> Result<HeaderValue, FetchError> {
    HeaderValue::from_str(value).map_err(|_| {
        CoreError::InvalidConfig(
            "header value contains characters outside the visible ASCII range".to_string(),
        )
        .into()
    })
}

// ============================================================================
// HTTP Client
// ============================================================================

/// Shared HTTP client for all catalog and token traffic.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
}

impl HttpClient {
    /// Creates a client with the standard user agent and TLS defaults.
    pub fn new() -> Result<Self, FetchError> {
        let inner = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { inner })
    }

    /// Sends a prepared JSON POST, retrying per its policy.
    #[instrument(skip(self, spec), fields(label = %spec.label, url = %spec.url))]
    pub async fn post_spec(&self, spec: &RequestSpec) -> Result<Value, FetchError> {
        self.execute_with_retry(&spec.label, spec.policy, || {
            self.inner
                .post(&spec.url)
                .headers(spec.headers.clone())
                .timeout(spec.timeout)
                .json(&spec.body)
                .send()
        })
        .await
    }

    /// Sends a form-encoded POST, retrying per the given policy.
    #[instrument(skip(self, form), fields(label = %label, url = %url))]
    pub async fn post_form(
        &self,
        label: &str,
        url: &str,
        form: &[(&str, &str)],
        policy: RetryPolicy,
        timeout: Duration,
    ) -> Result<Value, FetchError> {
        self.execute_with_retry(label, policy, || {
            self.inner.post(url).timeout(timeout).form(form).send()
        })
        .await
    }

    /// Retry loop shared by all request shapes.
    ///
    /// Attempts are zero-based. A response is retried only when its status
    /// is in the retryable set and attempts remain; transport errors without
    /// a status are always considered transient. `Retry-After` overrides the
    /// computed backoff verbatim.
    async fn execute_with_retry<F, Fut>(
        &self,
        label: &str,
        policy: RetryPolicy,
        send: F,
    ) -> Result<Value, FetchError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<reqwest::Response, reqwest::Error>>,
    {
        let mut attempt: u32 = 0;
        loop {
            match send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let text = response.text().await?;
                        debug!(status = status.as_u16(), "{label} request succeeded");
                        return Ok(serde_json::from_str(&text)
                            .unwrap_or_else(|_| Value::String(text)));
                    }

                    let status_code = status.as_u16();
                    let retry_after = response
                        .headers()
                        .get(RETRY_AFTER)
                        .and_then(|value| value.to_str().ok())
                        .and_then(|value| parse_retry_after(value, Utc::now()));
                    let text = response.text().await.unwrap_or_default();
                    let body: Option<Value> = serde_json::from_str(&text).ok();

                    if RetryPolicy::is_retryable_status(status_code)
                        && attempt < policy.max_retries
                    {
                        let delay =
                            retry_after.unwrap_or_else(|| policy.delay_for_attempt(attempt));
                        warn!(
                            attempt = attempt + 1,
                            status = status_code,
                            delay_ms = delay.as_millis() as u64,
                            "retrying {label} request"
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }

                    return Err(FetchError::Status {
                        label: label.to_string(),
                        status: status_code,
                        message: extract_error_message(body.as_ref(), &text),
                        body,
                    });
                }
                Err(err) => {
                    if attempt < policy.max_retries {
                        let delay = policy.delay_for_attempt(attempt);
                        warn!(
                            attempt = attempt + 1,
                            delay_ms = delay.as_millis() as u64,
                            "retrying {label} request after transport error: {err}"
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(FetchError::Network {
                        label: label.to_string(),
                        message: err.to_string(),
                    });
                }
            }
        }
    }
}

// ============================================================================
// Error Message Extraction
// ============================================================================

/// Pulls the most specific error message out of a failure response.
///
/// Checks the common shapes both upstream APIs use before falling back to a
/// truncated excerpt of the raw body.
fn extract_error_message(body: Option<&Value>, raw: &str) -> String {
    if let Some(body) = body {
        let candidates = [
            body.get("message"),
            body.pointer("/errors/0/message"),
            body.pointer("/Errors/0/Message"),
            body.get("error_description"),
            body.get("error"),
        ];
        for candidate in candidates.into_iter().flatten() {
            if let Some(text) = candidate.as_str() {
                if !text.trim().is_empty() {
                    return text.to_string();
                }
            }
        }
    }

    let excerpt: String = raw.trim().chars().take(ERROR_EXCERPT_LEN).collect();
    if excerpt.is_empty() {
        "no response body".to_string()
    } else {
        excerpt
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_spec_defaults() {
        let spec = RequestSpec::new("Creators API", "https://example.com/items", json!({}));
        assert_eq!(spec.label, "Creators API");
        assert_eq!(spec.policy, RetryPolicy::default());
        assert_eq!(spec.timeout, DEFAULT_REQUEST_TIMEOUT);
        assert!(spec.headers.is_empty());
    }

    #[test]
    fn test_request_spec_builders() {
        let policy = RetryPolicy::clamped(4, 1000);
        let spec = RequestSpec::new("PA-API", "https://example.com", json!({}))
            .with_policy(policy)
            .with_timeout(Duration::from_secs(5));
        assert_eq!(spec.policy, policy);
        assert_eq!(spec.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_header_value_rejects_control_chars() {
        assert!(header_value("Bearer abc123").is_ok());
        let err = header_value("line\nbreak").unwrap_err();
        assert!(err.to_string().contains("visible ASCII"));
    }

    #[test]
    fn test_extract_error_message_prefers_message_field() {
        let body = json!({"message": "Invalid marketplace"});
        assert_eq!(
            extract_error_message(Some(&body), "raw"),
            "Invalid marketplace"
        );
    }

    #[test]
    fn test_extract_error_message_nested_shapes() {
        let creators = json!({"errors": [{"message": "Item not found"}]});
        assert_eq!(
            extract_error_message(Some(&creators), ""),
            "Item not found"
        );

        let legacy = json!({"Errors": [{"Message": "InvalidAssociate"}]});
        assert_eq!(
            extract_error_message(Some(&legacy), ""),
            "InvalidAssociate"
        );

        let oauth = json!({"error": "invalid_client", "error_description": "Bad client id"});
        assert_eq!(extract_error_message(Some(&oauth), ""), "Bad client id");
    }

    #[test]
    fn test_extract_error_message_falls_back_to_excerpt() {
        assert_eq!(
            extract_error_message(None, "  <html>gateway timeout</html>  "),
            "<html>gateway timeout</html>"
        );
        assert_eq!(extract_error_message(None, "   "), "no response body");

        let long = "x".repeat(1000);
        assert_eq!(extract_error_message(None, &long).len(), ERROR_EXCERPT_LEN);
    }
}
