//! Operation and input types.
//!
//! This module contains the types describing one catalog request as the
//! caller hands it over:
//! - [`Operation`] - The three supported catalog operations
//! - [`OperationInput`] - Per-record parameters for one operation
//! - [`AdditionalOptions`] - Optional fields merged into requests only when set
//! - [`ListInput`] - Comma-separated string or explicit array input

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

// ============================================================================
// Operation
// ============================================================================

/// Supported catalog operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    /// Get detailed item information by ASIN(s).
    GetItems,
    /// Search for items using keywords.
    SearchItems,
    /// Get browse node information.
    GetBrowseNodes,
}

impl Operation {
    /// Returns the wire name for this operation (as emitted in envelopes).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GetItems => "getItems",
            Self::SearchItems => "searchItems",
            Self::GetBrowseNodes => "getBrowseNodes",
        }
    }

    /// Returns all supported operations.
    pub fn all() -> &'static [Operation] {
        &[Self::GetItems, Self::SearchItems, Self::GetBrowseNodes]
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Operation {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Operation::all()
            .iter()
            .copied()
            .find(|operation| operation.as_str() == value)
            .ok_or_else(|| CoreError::Validation(format!("Unknown operation: {value}")))
    }
}

// ============================================================================
// List Input
// ============================================================================

/// Identifier-list input, accepted either as a comma-separated string or as
/// an explicit array (batch files use both forms).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListInput {
    /// Comma-separated values, e.g. `"B08N5WRWNW, B07XJ8C8F5"`.
    Csv(String),
    /// Explicit list of values.
    Items(Vec<String>),
}

impl ListInput {
    /// Normalizes the input into a clean list: entries are trimmed and
    /// empty entries are dropped. Idempotent.
    pub fn normalize(&self) -> Vec<String> {
        match self {
            Self::Csv(value) => normalize_list(value),
            Self::Items(values) => normalize_list_values(values),
        }
    }

    /// Returns true if normalization yields no entries.
    pub fn is_empty(&self) -> bool {
        self.normalize().is_empty()
    }
}

impl From<&str> for ListInput {
    fn from(value: &str) -> Self {
        Self::Csv(value.to_string())
    }
}

/// Splits a comma-separated string into trimmed, non-empty entries.
pub fn normalize_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Trims a list of values and drops the entries left empty.
pub fn normalize_list_values(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|entry| entry.trim())
        .filter(|entry| !entry.is_empty())
        .map(ToString::to_string)
        .collect()
}

// ============================================================================
// Operation Input
// ============================================================================

/// Parameters for a single catalog request, as supplied by the caller.
///
/// Which fields are required depends on the operation; the per-source
/// assemblers validate before any network call. Optional fields that are
/// unset are never sent to the provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OperationInput {
    /// The operation to perform.
    pub operation: Option<Operation>,
    /// Item identifiers (ASINs) for `getItems`.
    pub item_ids: Option<ListInput>,
    /// Search keywords for `searchItems`.
    pub keywords: Option<String>,
    /// Category to search within (defaults to "All").
    pub search_index: Option<String>,
    /// Number of items to return for `searchItems` (1-50, defaults to 10).
    pub item_count: Option<u32>,
    /// Browse node identifiers for `getBrowseNodes`.
    pub browse_node_ids: Option<ListInput>,
    /// Resource paths selecting which response fields to request.
    pub resources: Option<Vec<String>>,
    /// Optional fields merged into the request only when present.
    #[serde(rename = "additionalFields")]
    pub options: AdditionalOptions,
}

impl OperationInput {
    /// Creates an input for the given operation with everything else unset.
    pub fn new(operation: Operation) -> Self {
        Self {
            operation: Some(operation),
            ..Self::default()
        }
    }

    /// The operation, defaulting to `getItems` when unset (mirrors the
    /// host-side default selection).
    pub fn operation(&self) -> Operation {
        self.operation.unwrap_or(Operation::GetItems)
    }

    /// Normalized item identifiers (empty when none were supplied).
    pub fn normalized_item_ids(&self) -> Vec<String> {
        self.item_ids.as_ref().map(ListInput::normalize).unwrap_or_default()
    }

    /// Normalized browse node identifiers (empty when none were supplied).
    pub fn normalized_browse_node_ids(&self) -> Vec<String> {
        self.browse_node_ids
            .as_ref()
            .map(ListInput::normalize)
            .unwrap_or_default()
    }

    /// Trimmed keywords, or `None` when absent or blank.
    pub fn trimmed_keywords(&self) -> Option<String> {
        self.keywords
            .as_deref()
            .map(str::trim)
            .filter(|keywords| !keywords.is_empty())
            .map(ToString::to_string)
    }
}

// ============================================================================
// Additional Options
// ============================================================================

/// Optional request fields. Every field is merged into the outbound request
/// only when present; absent fields are never sent as empty strings/lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdditionalOptions {
    /// Item condition filter (e.g. "Any", "New").
    pub condition: Option<String>,
    /// Preferred currency code (e.g. "USD", "EUR").
    pub currency_of_preference: Option<String>,
    /// Preferred locale codes (multi-valued, new-schema sources).
    pub languages_of_preference: Option<ListInput>,
    /// Preferred locale code (single-valued, legacy sources).
    pub language_of_preference: Option<String>,
    /// Merchant filter (e.g. "All", "Amazon"; legacy sources).
    pub merchant: Option<String>,
    /// Page number for `searchItems` (1-10).
    pub item_page: Option<u32>,
    /// Retry count for throttling/5xx/network errors (0-8).
    pub max_retries: Option<u32>,
    /// Base delay for exponential backoff in milliseconds (100-10000).
    pub retry_delay_ms: Option<u64>,
}

// ============================================================================
// Tests
// ============================================================================
