// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `OfferLens` Fetch
//!
//! Transport, authentication, and the run loop for the `OfferLens` toolkit.
//!
//! This crate turns validated operation inputs into upstream API calls and
//! normalized results. It includes:
//!
//! ## Transport
//!
//! - [`client::HttpClient`] - Shared HTTP client with a bounded retry loop
//! - [`client::RequestSpec`] - A fully prepared, replayable JSON POST
//! - [`retry::RetryPolicy`] - Exponential backoff with additive jitter
//!
//! ## Authentication
//!
//! - [`token::TokenCache`] - OAuth2 client-credentials tokens, cached per
//!   credential, version, and endpoint
//! - [`token::Clock`] - Injectable time source for expiry tests
//!
//! ## Run Loop
//!
//! - [`source::CatalogSource`] - Trait each upstream catalog implements
//! - [`pipeline::OperationPipeline`] - Processes a batch strictly in order
//! - [`context::RequestContext`] - Shared client, tokens, and settings
//!
//! ## Example
//!
//! ```ignore
//! use offerlens_fetch::{OperationPipeline, RequestContext, RunSettings};
//!
//! // Shared state for the whole batch
//! let context = RequestContext::builder()
//!     .settings(RunSettings::default().with_continue_on_fail(true))
//!     .build()?;
//!
//! // Drive every input through one catalog source
//! let pipeline = OperationPipeline::new(Box::new(source), context);
//! let report = pipeline.run(&inputs).await?;
//! ```

// Core modules
pub mod client;
pub mod context;
pub mod error;
pub mod pipeline;
pub mod retry;
pub mod source;
pub mod token;

// Re-export key types at crate root

// Errors
pub use error::FetchError;

// Transport
pub use client::{header_value, HttpClient, RequestSpec, DEFAULT_REQUEST_TIMEOUT, USER_AGENT};
pub use retry::{parse_retry_after, RetryPolicy, RETRYABLE_STATUS_CODES};

// Authentication
pub use token::{
    Clock, IssuedToken, OauthTokenFetcher, SystemClock, TokenCache, TokenFetcher, TokenRequest,
    TOKEN_EXPIRY_SAFETY_MARGIN_SECS,
};

// Run loop
pub use context::{RequestContext, RequestContextBuilder, RunSettings};
pub use pipeline::{OperationPipeline, RecordOutcome, RunReport};
pub use source::CatalogSource;
