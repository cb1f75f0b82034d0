//! PA-API provider implementation.
//!
//! The PA-API is the legacy catalog backend with a PascalCase schema and
//! AWS Signature Version 4 request signing instead of bearer tokens.
//!
//! ## Request cycle
//!
//! 1. **Resolve**: marketplace domain to regional host and signing region
//! 2. **Assemble**: PascalCase body with `PartnerTag`, `PartnerType`,
//!    `Marketplace`, and `Resources` on every operation
//! 3. **Sign**: SigV4 over the serialized payload; credentials feed the
//!    signature only and never appear in the body
//! 4. **Send**: `POST https://webservices.amazon.<tld>/paapi5/<operation>`
//!    with `x-amz-date`, `x-amz-target`, and `Authorization` headers
//! 5. **Project**: `ItemsResult` / `SearchResult` / `BrowseNodesResult`
//!    into the normalized envelope; this schema never carries search meta
//!
//! ## Usage
//!
//! ```ignore
//! use offerlens_providers::paapi::{PaapiCredentials, PaapiSource};
//!
//! let source = PaapiSource::new(credentials);
//! let envelope = source.execute(&context, &input).await?;
//! ```

// Modules
mod credentials;
mod marketplace;
pub(crate) mod params;
pub(crate) mod parser;
mod signer;
mod source;

// Re-exports
pub use credentials::PaapiCredentials;
pub use marketplace::{marketplace_for, Marketplace, MARKETPLACES};
pub use signer::{SigV4Signer, SignedRequest, CONTENT_ENCODING};
pub use source::PaapiSource;
