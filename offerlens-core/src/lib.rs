// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `OfferLens` Core
//!
//! Core types and models for the `OfferLens` toolkit.
//!
//! This crate provides the foundational data structures used across all
//! other `OfferLens` crates, including:
//!
//! - Request models (operations, per-record input, optional fields)
//! - Normalized output models (items, offers, taxonomy nodes)
//! - Output envelopes and structured error records
//! - Error types
//!
//! ## Key Types
//!
//! ### Request Types
//! - [`Operation`] - Enum of the supported catalog operations
//! - [`OperationInput`] - Per-record request parameters
//! - [`AdditionalOptions`] - Optional fields sent only when present
//! - [`ListInput`] - Comma-separated string or array, normalized the same way
//!
//! ### Item Types
//! - [`NormalizedItem`] - Source-independent item projection
//! - [`OfferLine`] - One listing (price, merchant, buy-box flags)
//! - [`PriceSummary`] - Derived min/max/count over the priced listings
//! - [`ImageSet`] / [`Category`] / [`CustomerReviews`] - Optional item facets
//!
//! ### Output Types
//! - [`NormalizedEnvelope`] - Per-record result with verbatim raw response
//! - [`NormalizedRecord`] - Item or browse node inside an envelope
//! - [`ErrorRecord`] - Structured failure output in continue-on-fail mode
//! - [`DebugContext`] - Non-secret diagnostics (credential suffixes only)

pub mod error;
pub mod models;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Request types
    normalize_list,
    normalize_list_values,
    AdditionalOptions,
    ListInput,
    Operation,
    OperationInput,
    // Item types
    build_price_summary,
    ByLineInfo,
    Category,
    ConditionSummary,
    CustomerReviews,
    ImageSet,
    ManufactureInfo,
    NormalizedItem,
    OfferLine,
    PriceSummary,
    ProductInfo,
    TechnicalInfo,
    // Taxonomy types
    BrowseNode,
    // Output types
    redact_suffix,
    DebugContext,
    ErrorRecord,
    NormalizedEnvelope,
    NormalizedRecord,
    SearchMeta,
};
