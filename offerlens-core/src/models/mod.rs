//! Domain models for OfferLens.
//!
//! This module contains the data structures flowing through an operation:
//! the per-record input, the normalized output shapes, and the error
//! record emitted when a record fails in continue-on-fail mode.
//!
//! ## Submodules
//!
//! - [`request`] - Input types (Operation, OperationInput, AdditionalOptions)
//! - [`item`] - Item projections (NormalizedItem, OfferLine, PriceSummary)
//! - [`browse`] - Taxonomy projections (BrowseNode)
//! - [`envelope`] - Output envelopes (NormalizedEnvelope, ErrorRecord)

mod browse;
mod envelope;
mod item;
mod request;

// Re-export everything at the models level
pub use browse::BrowseNode;
pub use envelope::{
    redact_suffix, DebugContext, ErrorRecord, NormalizedEnvelope, NormalizedRecord, SearchMeta,
};
pub use item::{
    build_price_summary, ByLineInfo, Category, ConditionSummary, CustomerReviews, ImageSet,
    ManufactureInfo, NormalizedItem, OfferLine, PriceSummary, ProductInfo, TechnicalInfo,
};
pub use request::{
    normalize_list, normalize_list_values, AdditionalOptions, ListInput, Operation, OperationInput,
};
