//! Shared state for a batch of catalog requests.

use std::sync::Arc;
use std::time::Duration;

use crate::client::{HttpClient, DEFAULT_REQUEST_TIMEOUT};
use crate::error::FetchError;
use crate::token::{OauthTokenFetcher, TokenCache};

// ============================================================================
// Run Settings
// ============================================================================

/// Run-level toggles that apply to every record in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSettings {
    /// Emit an error record and keep going instead of aborting the run.
    pub continue_on_fail: bool,
    /// Attach redacted credential context to error records.
    pub debug: bool,
    /// Timeout for catalog requests.
    pub timeout: Duration,
}

impl RunSettings {
    /// Sets failure handling.
    pub fn with_continue_on_fail(mut self, continue_on_fail: bool) -> Self {
        self.continue_on_fail = continue_on_fail;
        self
    }

    /// Sets debug context emission.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Sets the catalog request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            continue_on_fail: false,
            debug: false,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

// ============================================================================
// Request Context
// ============================================================================

/// HTTP client, token cache, and settings shared by all records of a run.
#[derive(Debug, Clone)]
pub struct RequestContext {
    http: HttpClient,
    tokens: Arc<TokenCache>,
    settings: RunSettings,
}

impl RequestContext {
    /// Creates a context with default settings and a fresh token cache.
    pub fn new() -> Result<Self, FetchError> {
        Self::builder().build()
    }

    /// Starts building a context with custom parts.
    pub fn builder() -> RequestContextBuilder {
        RequestContextBuilder::default()
    }

    /// The shared HTTP client.
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// The shared token cache.
    pub fn tokens(&self) -> &Arc<TokenCache> {
        &self.tokens
    }

    /// The run settings.
    pub fn settings(&self) -> RunSettings {
        self.settings
    }
}

/// Builder for [`RequestContext`].
#[derive(Default)]
pub struct RequestContextBuilder {
    http: Option<HttpClient>,
    tokens: Option<Arc<TokenCache>>,
    settings: RunSettings,
}

impl RequestContextBuilder {
    /// Uses the given HTTP client instead of constructing one.
    pub fn http(mut self, http: HttpClient) -> Self {
        self.http = Some(http);
        self
    }

    /// Uses the given token cache, e.g. one with mocked time.
    pub fn tokens(mut self, tokens: Arc<TokenCache>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Applies run settings.
    pub fn settings(mut self, settings: RunSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Finishes the context, wiring a real OAuth2 fetcher onto the HTTP
    /// client unless a token cache was injected.
    pub fn build(self) -> Result<RequestContext, FetchError> {
        let http = match self.http {
            Some(http) => http,
            None => HttpClient::new()?,
        };
        let tokens = self.tokens.unwrap_or_else(|| {
            Arc::new(TokenCache::new(Arc::new(OauthTokenFetcher::new(
                http.clone(),
            ))))
        });
        Ok(RequestContext {
            http,
            tokens,
            settings: self.settings,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
