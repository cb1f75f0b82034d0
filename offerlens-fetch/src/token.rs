//! OAuth2 client-credentials tokens with in-memory caching.
//!
//! [`TokenCache`] hands out bearer tokens keyed by credential, credential
//! version, and token endpoint. Grants are cached until 30 seconds before
//! their advertised expiry so a token is never used while about to lapse.
//! The clock and the fetcher are both injected, which keeps expiry logic
//! testable without real time or network traffic.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::client::HttpClient;
use crate::error::FetchError;
use crate::retry::RetryPolicy;

/// Seconds subtracted from a grant's lifetime before caching it.
pub const TOKEN_EXPIRY_SAFETY_MARGIN_SECS: u32 = 30;

/// Timeout for token endpoint requests, shorter than catalog calls.
pub const TOKEN_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// Clock
// ============================================================================

/// Source of the current instant, swappable in tests.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock used outside tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// ============================================================================
// Token Types
// ============================================================================

/// Everything needed to obtain a token for one credential.
#[derive(Debug, Clone)]
pub struct TokenRequest {
    /// OAuth2 client id.
    pub client_id: String,
    /// OAuth2 client secret.
    pub client_secret: String,
    /// Scope requested in the grant.
    pub scope: String,
    /// Credential schema version, part of the cache key.
    pub version: String,
    /// Resolved token endpoint URL.
    pub endpoint: String,
    /// Cache-key label for the endpoint: `default` unless overridden.
    pub endpoint_label: String,
    /// Retry behavior for the token call.
    pub policy: RetryPolicy,
}

impl TokenRequest {
    /// Cache key distinguishing tokens per credential, version, and endpoint.
    pub fn cache_key(&self) -> String {
        format!("{}:{}:{}", self.client_id, self.version, self.endpoint_label)
    }
}

/// A grant as returned by the token endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Bearer token value.
    pub access_token: String,
    /// Advertised lifetime in seconds.
    pub expires_in_secs: u32,
}

/// A cached token plus the instant it stops being served.
#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// Valid strictly before `expires_at`; at the boundary a fresh grant
    /// is fetched.
    fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

// ============================================================================
// Token Fetcher
// ============================================================================

/// Exchanges client credentials for a token.
#[async_trait]
pub trait TokenFetcher: Send + Sync {
    /// Performs the client-credentials grant.
    async fn fetch(&self, request: &TokenRequest) -> Result<IssuedToken, FetchError>;
}

/// Production fetcher performing the grant over HTTP.
#[derive(Debug, Clone)]
pub struct OauthTokenFetcher {
    http: HttpClient,
}

impl OauthTokenFetcher {
    /// Creates a fetcher backed by the given client.
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl TokenFetcher for OauthTokenFetcher {
    async fn fetch(&self, request: &TokenRequest) -> Result<IssuedToken, FetchError> {
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", request.client_id.as_str()),
            ("client_secret", request.client_secret.as_str()),
            ("scope", request.scope.as_str()),
        ];
        let grant = self
            .http
            .post_form(
                "OAuth2 token",
                &request.endpoint,
                &form,
                request.policy,
                TOKEN_REQUEST_TIMEOUT,
            )
            .await?;
        parse_grant(&grant)
    }
}

/// Validates a grant response: both the token and a positive lifetime must
/// be present, otherwise the grant is unusable.
fn parse_grant(grant: &Value) -> Result<IssuedToken, FetchError> {
    let access_token = grant
        .get("access_token")
        .and_then(Value::as_str)
        .unwrap_or("");
    let expires_in = match grant.get("expires_in") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };

    if access_token.is_empty() || expires_in <= 0.0 {
        return Err(FetchError::AuthenticationFailed(
            "No access token received from OAuth2 endpoint".to_string(),
        ));
    }

    Ok(IssuedToken {
        access_token: access_token.to_string(),
        expires_in_secs: expires_in as u32,
    })
}

// ============================================================================
// Token Cache
// ============================================================================

/// In-memory token cache shared across all records of a run.
///
/// Concurrent misses on the same key may each fetch a grant; the last one
/// written wins, which is harmless since every grant is valid.
pub struct TokenCache {
    entries: Mutex<HashMap<String, CachedToken>>,
    clock: Arc<dyn Clock>,
    fetcher: Arc<dyn TokenFetcher>,
}

impl TokenCache {
    /// Creates a cache on the system clock.
    pub fn new(fetcher: Arc<dyn TokenFetcher>) -> Self {
        Self::with_clock(fetcher, Arc::new(SystemClock))
    }

    /// Creates a cache with an injected clock.
    pub fn with_clock(fetcher: Arc<dyn TokenFetcher>, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
            fetcher,
        }
    }

    /// Returns a valid token for the request, fetching one only when the
    /// cache has no entry or the entry has crossed its safety margin.
    #[instrument(skip(self, request), fields(version = %request.version, endpoint = %request.endpoint_label))]
    pub async fn get_token(&self, request: &TokenRequest) -> Result<String, FetchError> {
        let key = request.cache_key();

        {
            let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(cached) = entries.get(&key) {
                if cached.is_valid_at(self.clock.now()) {
                    debug!("token cache hit");
                    return Ok(cached.access_token.clone());
                }
            }
        }

        let issued = self.fetcher.fetch(request).await?;
        let lifetime = issued
            .expires_in_secs
            .saturating_sub(TOKEN_EXPIRY_SAFETY_MARGIN_SECS);
        let expires_at = self.clock.now() + chrono::Duration::seconds(i64::from(lifetime));
        debug!(lifetime_secs = lifetime, "cached new access token");

        let token = issued.access_token.clone();
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(
            key,
            CachedToken {
                access_token: issued.access_token,
                expires_at,
            },
        );
        Ok(token)
    }
}

impl fmt::Debug for TokenCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("TokenCache")
            .field("entries", &entries.len())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
