//! Output envelope types.
//!
//! This module contains the per-record output shapes:
//! - [`NormalizedEnvelope`] - Successful (or degraded) operation result
//! - [`NormalizedRecord`] - Item or browse node inside an envelope
//! - [`SearchMeta`] - Search-only metadata
//! - [`ErrorRecord`] - Structured failure output in continue-on-fail mode
//! - [`DebugContext`] - Non-secret diagnostic context

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::browse::BrowseNode;
use super::item::NormalizedItem;
use super::request::Operation;

// ============================================================================
// Normalized Envelope
// ============================================================================

/// One record inside an envelope: a projected item or a browse node,
/// depending on the operation.
///
/// Serialize-only. Which variant a record is gets decided at projection
/// time, so the untagged representation never has to be parsed back.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NormalizedRecord {
    /// A projected catalog item (`getItems` / `searchItems`).
    Item(NormalizedItem),
    /// A projected taxonomy node (`getBrowseNodes`).
    Node(BrowseNode),
}

/// The per-record result envelope.
///
/// `raw_response` always carries the provider body verbatim: normalization
/// is never lossy in a way that blocks downstream inspection. When
/// projection of a present-but-malformed body fails, the envelope degrades
/// to zero items with `processing_error` set instead of dropping the
/// record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedEnvelope {
    /// The operation that produced this envelope.
    pub operation: Operation,
    /// Number of projected records.
    pub item_count: usize,
    /// Projected records, in provider order.
    pub items: Vec<NormalizedRecord>,
    /// Search metadata (`searchItems` only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<SearchMeta>,
    /// The provider response body, verbatim.
    pub raw_response: Value,
    /// Set when projection failed and the envelope degraded to raw
    /// passthrough.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_error: Option<String>,
}

impl NormalizedEnvelope {
    /// Creates an envelope from projected records.
    pub fn new(operation: Operation, items: Vec<NormalizedRecord>, raw_response: Value) -> Self {
        Self {
            operation,
            item_count: items.len(),
            items,
            meta: None,
            raw_response,
            processing_error: None,
        }
    }

    /// Creates an empty envelope for a response missing its result block.
    pub fn empty(operation: Operation, raw_response: Value) -> Self {
        Self::new(operation, Vec::new(), raw_response)
    }

    /// Creates a degraded envelope for a body that could not be projected.
    pub fn degraded(
        operation: Operation,
        raw_response: Value,
        processing_error: impl Into<String>,
    ) -> Self {
        Self {
            processing_error: Some(processing_error.into()),
            ..Self::empty(operation, raw_response)
        }
    }

    /// Attaches search metadata.
    pub fn with_meta(mut self, meta: SearchMeta) -> Self {
        self.meta = Some(meta);
        self
    }
}

/// Search metadata extracted from `searchItems` responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchMeta {
    /// Total number of matching items reported by the provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_result_count: Option<u64>,
    /// Link to the equivalent search on the retail site.
    #[serde(rename = "searchURL", skip_serializing_if = "Option::is_none")]
    pub search_url: Option<String>,
    /// Search refinements, passed through as returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_refinements: Option<Value>,
}

impl SearchMeta {
    /// Returns true if no field is populated.
    pub fn is_empty(&self) -> bool {
        self.total_result_count.is_none()
            && self.search_url.is_none()
            && self.search_refinements.is_none()
    }
}

// ============================================================================
// Error Record
// ============================================================================

/// Structured failure output emitted per record in continue-on-fail mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ErrorRecord {
    /// Human-readable failure message.
    pub error: String,
    /// HTTP status, when the failure carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Provider response body, when one was received.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    /// Non-secret diagnostic context, when diagnostics are enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugContext>,
}

impl ErrorRecord {
    /// Creates an error record with just a message.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            ..Self::default()
        }
    }
}

// ============================================================================
// Debug Context
// ============================================================================

/// Non-secret diagnostic context attached to error records when
/// diagnostics are enabled. Carries credential suffixes only, never a
/// whole secret.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DebugContext {
    /// Last characters of the OAuth client id (new schema sources).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_id_suffix: Option<String>,
    /// Last characters of the access key (legacy sources).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_key_suffix: Option<String>,
    /// Last characters of the partner tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_tag_suffix: Option<String>,
    /// Credential schema version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_version: Option<String>,
    /// Marketplace the request targeted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marketplace: Option<String>,
    /// Token endpoint in use, or "default".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_endpoint: Option<String>,
}

/// Redacts a credential to its last four characters, or "MISSING" when the
/// value is empty.
pub fn redact_suffix(value: &str) -> String {
    if value.is_empty() {
        return "MISSING".to_string();
    }
    let count = value.chars().count();
    value.chars().skip(count.saturating_sub(4)).collect()
}

// ============================================================================
// Tests
// ============================================================================
