//! Catalog source abstraction.
//!
//! A [`CatalogSource`] turns one validated operation input into a signed or
//! authorized HTTP request and projects the response into the normalized
//! envelope. The pipeline only ever talks to this trait, so new upstream
//! APIs plug in without touching the run loop.

use async_trait::async_trait;
use serde_json::Value;

use offerlens_core::{CoreError, DebugContext, NormalizedEnvelope, Operation, OperationInput};

use crate::client::RequestSpec;
use crate::context::RequestContext;
use crate::error::FetchError;

/// A product catalog backend.
///
/// Implementations are stateless apart from their credentials; all shared
/// machinery (HTTP client, token cache, run settings) arrives through the
/// [`RequestContext`].
///
/// # Example
///
/// ```ignore
/// struct FixtureSource;
///
/// #[async_trait]
/// impl CatalogSource for FixtureSource {
///     fn id(&self) -> &'static str {
///         "fixture"
///     }
///
///     fn display_name(&self) -> &'static str {
///         "Fixture catalog"
///     }
///
///     fn validate(&self, input: &OperationInput) -> Result<(), CoreError> {
///         if input.normalized_item_ids().is_empty() {
///             return Err(CoreError::Validation("Item IDs are required".into()));
///         }
///         Ok(())
///     }
///
///     // prepare / normalize / debug_context elided
/// }
/// ```
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Stable identifier used for source selection.
    fn id(&self) -> &'static str;

    /// Human-readable name for listings and logs.
    fn display_name(&self) -> &'static str;

    /// Checks an input against the operation's requirements.
    ///
    /// Runs before any network traffic, so inputs that can never succeed
    /// fail without spending a token or an API call.
    fn validate(&self, input: &OperationInput) -> Result<(), CoreError>;

    /// Builds the ready-to-send request for one input, acquiring
    /// authorization (bearer token or request signature) as needed.
    async fn prepare(
        &self,
        context: &RequestContext,
        input: &OperationInput,
    ) -> Result<RequestSpec, FetchError>;

    /// Projects a provider response into the normalized envelope.
    ///
    /// Never fails: unprojectable bodies degrade to an empty envelope
    /// carrying the raw response and a processing error.
    fn normalize(&self, operation: Operation, response: Value) -> NormalizedEnvelope;

    /// Redacted credential context for error records.
    fn debug_context(&self) -> DebugContext;

    /// Runs the full cycle for one input: validate, prepare, send,
    /// normalize.
    async fn execute(
        &self,
        context: &RequestContext,
        input: &OperationInput,
    ) -> Result<NormalizedEnvelope, FetchError> {
        self.validate(input)?;
        let spec = self.prepare(context, input).await?;
        let response = context.http().post_spec(&spec).await?;
        Ok(self.normalize(input.operation(), response))
    }
}

// ============================================================================
// Tests
// ============================================================================
