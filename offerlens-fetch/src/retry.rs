//! Retry policy for catalog requests.
//!
//! A failed attempt is retried only when it is transient: a transport
//! error with no HTTP status, or one of the statuses in
//! [`RETRYABLE_STATUS_CODES`]. Everything else fails fast.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Statuses worth retrying: throttling and upstream server failures.
pub const RETRYABLE_STATUS_CODES: [u16; 5] = [429, 500, 502, 503, 504];

/// Bounds enforced on [`RetryPolicy::clamped`] input.
const MAX_RETRIES_RANGE: (u32, u32) = (0, 8);
const BASE_DELAY_MS_RANGE: (u64, u64) = (100, 10_000);

/// Defaults applied when a record carries no retry overrides.
const DEFAULT_MAX_RETRIES: u32 = 2;
const DEFAULT_BASE_DELAY_MS: u64 = 500;

// ============================================================================
// Retry Policy
// ============================================================================

/// Bounded exponential backoff with additive jitter.
///
/// `max_retries` counts retries after the first attempt, so a policy with
/// `max_retries = 2` performs at most three requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the initial attempt.
    pub max_retries: u32,
    /// Backoff base; doubled per attempt, jittered by up to 20% of itself.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy with the given bounds.
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Creates a policy from caller-supplied numbers, clamped to the
    /// supported ranges (0-8 retries, 100-10000 ms base delay).
    pub fn clamped(max_retries: u32, base_delay_ms: u64) -> Self {
        Self {
            max_retries: max_retries.clamp(MAX_RETRIES_RANGE.0, MAX_RETRIES_RANGE.1),
            base_delay: Duration::from_millis(
                base_delay_ms.clamp(BASE_DELAY_MS_RANGE.0, BASE_DELAY_MS_RANGE.1),
            ),
        }
    }

    /// Resolves optional per-record overrides, falling back to the
    /// defaults and clamping to the supported ranges.
    pub fn from_options(max_retries: Option<u32>, base_delay_ms: Option<u64>) -> Self {
        Self::clamped(
            max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            base_delay_ms.unwrap_or(DEFAULT_BASE_DELAY_MS),
        )
    }

    /// Returns true when a status code is worth retrying.
    pub fn is_retryable_status(status: u16) -> bool {
        RETRYABLE_STATUS_CODES.contains(&status)
    }

    /// Computes the backoff delay for a zero-based attempt counter:
    /// `base * 2^attempt` plus a uniform jitter in `[0, 0.2 * base)`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base_ms = u64::try_from(self.base_delay.as_millis()).unwrap_or(u64::MAX);
        let exponential = base_ms.saturating_mul(2u64.saturating_pow(attempt));
        let jitter = (rand::random::<f64>() * 0.2 * base_ms as f64).floor() as u64;
        Duration::from_millis(exponential.saturating_add(jitter))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAX_RETRIES,
            Duration::from_millis(DEFAULT_BASE_DELAY_MS),
        )
    }
}

// ============================================================================
// Retry-After Parsing
// ============================================================================

/// Parses a `Retry-After` header value into a delay.
///
/// Numeric values are seconds. Date values become the delta from `now`.
/// Negative counts, dates already in the past, and anything unparsable
/// yield `None`, meaning the caller falls back to computed backoff.
pub fn parse_retry_after(value: &str, now: DateTime<Utc>) -> Option<Duration> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(seconds) = trimmed.parse::<f64>() {
        if !seconds.is_finite() || seconds < 0.0 {
            return None;
        }
        return Some(Duration::from_millis((seconds * 1000.0) as u64));
    }

    let date = DateTime::parse_from_rfc2822(trimmed)
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed))
        .ok()?;
    let delta_ms = (date.with_timezone(&Utc) - now).num_milliseconds();
    if delta_ms < 0 {
        return None;
    }
    Some(Duration::from_millis(delta_ms as u64))
}

// ============================================================================
// Tests
// ============================================================================
