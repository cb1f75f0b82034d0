// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # OfferLens Providers
//!
//! Source-specific implementations for the OfferLens application.
//!
//! This crate contains the concrete implementations for each supported
//! Amazon product data source. Each source module includes:
//!
//! - **Credentials**: Typed credential set with endpoint resolution
//! - **Params**: Request body assembly for the three catalog operations
//! - **Parser**: Response projection into the normalized envelope
//! - **Source**: The [`CatalogSource`](offerlens_fetch::CatalogSource) wiring
//!
//! ## Supported Sources (2 total)
//!
//! | Source | Auth | Response Schema | Endpoints |
//! |--------|------|-----------------|-----------|
//! | Creators API | OAuth2 bearer token | camelCase | 3 regional token hosts |
//! | PA-API 5.0 | SigV4 request signing | PascalCase | 16 marketplaces |
//!
//! ## Usage
//!
//! ```ignore
//! use offerlens_providers::{CreatorsSource, SourceRegistry};
//! use offerlens_fetch::{CatalogSource, RequestContext, TokenCache};
//!
//! // Look up a source by name
//! let descriptor = SourceRegistry::find("creators")?;
//!
//! // Build and execute against live credentials
//! let source = CreatorsSource::new(credentials);
//! let context = RequestContext::builder().tokens(TokenCache::new(fetcher)).build();
//! let envelope = source.execute(&context, &input).await?;
//! ```

pub mod registry;

// Source modules (alphabetical)
pub mod creators;
pub mod paapi;

// Shared internals
pub(crate) mod json;
pub(crate) mod validate;

// Re-export key types
pub use registry::{SourceDescriptor, SourceKind, SourceRegistry};

// Re-export source types
pub use creators::{CreatorsCredentials, CreatorsSource, CREATORS_API_BASE_URL, CREATORS_TOKEN_SCOPE};
pub use paapi::{
    marketplace_for, Marketplace, PaapiCredentials, PaapiSource, SigV4Signer, SignedRequest,
    CONTENT_ENCODING, MARKETPLACES,
};
