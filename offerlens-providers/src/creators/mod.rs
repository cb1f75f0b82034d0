//! Creators API provider implementation.
//!
//! The Creators API is the successor catalog backend with a camelCase
//! schema and OAuth2 client-credentials authorization.
//!
//! ## Request cycle
//!
//! 1. **Authorize**: a bearer token from the regional Cognito endpoint,
//!    served from the shared token cache while still valid
//! 2. **Assemble**: camelCase body with `partnerTag` and per-operation
//!    fields; unset optionals are left out entirely
//! 3. **Send**: `POST https://creatorsapi.amazon/catalog/v1/<operation>`
//!    with `Authorization: Bearer <token>, Version <version>` and
//!    `x-marketplace` headers
//! 4. **Project**: `itemsResult` / `searchResult` / `browseNodesResult`
//!    into the normalized envelope; `searchItems` always carries meta
//!
//! ## Usage
//!
//! ```ignore
//! use offerlens_providers::creators::{CreatorsCredentials, CreatorsSource};
//!
//! let source = CreatorsSource::new(credentials);
//! let envelope = source.execute(&context, &input).await?;
//! ```

// Modules
mod credentials;
pub(crate) mod params;
pub(crate) mod parser;
mod source;

// Re-exports
pub use credentials::{CreatorsCredentials, CREATORS_API_BASE_URL, CREATORS_TOKEN_SCOPE};
pub use source::CreatorsSource;
