//! The Creators API catalog source.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use tracing::instrument;

use offerlens_core::{CoreError, DebugContext, NormalizedEnvelope, Operation, OperationInput};
use offerlens_fetch::{
    header_value, CatalogSource, FetchError, RequestContext, RequestSpec, RetryPolicy,
};

use super::credentials::{CreatorsCredentials, CREATORS_API_BASE_URL};
use super::params::{build_request_body, endpoint_path};
use super::parser::normalize_response;
use crate::validate::validate_input;

/// Catalog source backed by the OAuth2-authorized Creators API.
#[derive(Debug, Clone)]
pub struct CreatorsSource {
    credentials: CreatorsCredentials,
}

impl CreatorsSource {
    /// Creates a source from credentials, trimming every field.
    pub fn new(credentials: CreatorsCredentials) -> Self {
        Self {
            credentials: credentials.trimmed(),
        }
    }
}

#[async_trait]
impl CatalogSource for CreatorsSource {
    fn id(&self) -> &'static str {
        "creators"
    }

    fn display_name(&self) -> &'static str {
        "Amazon Creators API"
    }

    fn validate(&self, input: &OperationInput) -> Result<(), CoreError> {
        validate_input(input)
    }

    #[instrument(skip(self, context, input), fields(operation = %input.operation()))]
    async fn prepare(
        &self,
        context: &RequestContext,
        input: &OperationInput,
    ) -> Result<RequestSpec, FetchError> {
        let policy =
            RetryPolicy::from_options(input.options.max_retries, input.options.retry_delay_ms);
        let token_request = self.credentials.token_request(policy)?;
        let token = context.tokens().get_token(&token_request).await?;

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            header_value(&format!(
                "Bearer {token}, Version {}",
                self.credentials.credential_version
            ))?,
        );
        headers.insert(
            HeaderName::from_static("x-marketplace"),
            header_value(&self.credentials.marketplace)?,
        );
        headers.insert(
            CONTENT_TYPE,
            header_value("application/json; charset=utf-8")?,
        );

        let operation = input.operation();
        let url = format!("{CREATORS_API_BASE_URL}{}", endpoint_path(operation));
        let body = build_request_body(&self.credentials, input);

        Ok(RequestSpec::new("Creators API", url, body)
            .with_headers(headers)
            .with_policy(policy)
            .with_timeout(context.settings().timeout))
    }

    fn normalize(&self, operation: Operation, response: Value) -> NormalizedEnvelope {
        normalize_response(operation, response)
    }

    fn debug_context(&self) -> DebugContext {
        self.credentials.debug_context()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::json;

    use offerlens_core::ListInput;
    use offerlens_fetch::{IssuedToken, TokenCache, TokenFetcher, TokenRequest};

    struct StaticFetcher;

    #[async_trait]
    impl TokenFetcher for StaticFetcher {
        async fn fetch(&self, _request: &TokenRequest) -> Result<IssuedToken, FetchError> {
            Ok(IssuedToken {
                access_token: "test-token".to_string(),
                expires_in_secs: 3600,
            })
        }
    }

    fn offline_context() -> RequestContext {
        RequestContext::builder()
            .tokens(Arc::new(TokenCache::new(Arc::new(StaticFetcher))))
            .build()
            .unwrap()
    }

    fn source() -> CreatorsSource {
        CreatorsSource::new(CreatorsCredentials {
            credential_id: "amzn1.application-oa2-client.abcd1234".to_string(),
            credential_secret: "secret".to_string(),
            credential_version: "2.1".to_string(),
            partner_tag: "mytag-20".to_string(),
            marketplace: "www.amazon.de".to_string(),
            auth_endpoint: None,
        })
    }

    fn get_items_input() -> OperationInput {
        let mut input = OperationInput::new(Operation::GetItems);
        input.item_ids = Some(ListInput::from("B08N5WRWNW"));
        input
    }

    #[tokio::test]
    async fn test_prepare_builds_authorized_request() {
        let spec = source()
            .prepare(&offline_context(), &get_items_input())
            .await
            .unwrap();

        assert_eq!(spec.label, "Creators API");
        assert_eq!(spec.url, "https://creatorsapi.amazon/catalog/v1/getItems");
        assert_eq!(
            spec.headers.get(AUTHORIZATION).unwrap(),
            "Bearer test-token, Version 2.1"
        );
        assert_eq!(spec.headers.get("x-marketplace").unwrap(), "www.amazon.de");
        assert_eq!(
            spec.headers.get(CONTENT_TYPE).unwrap(),
            "application/json; charset=utf-8"
        );
        assert_eq!(spec.body.get("partnerTag"), Some(&json!("mytag-20")));
        assert_eq!(spec.body.get("itemIds"), Some(&json!(["B08N5WRWNW"])));
    }

    #[tokio::test]
    async fn test_prepare_applies_retry_overrides() {
        let mut input = get_items_input();
        input.options.max_retries = Some(4);
        input.options.retry_delay_ms = Some(1000);

        let spec = source().prepare(&offline_context(), &input).await.unwrap();
        assert_eq!(spec.policy, RetryPolicy::clamped(4, 1000));
    }

    #[tokio::test]
    async fn test_prepare_rejects_unsupported_version() {
        let mut credentials = source().credentials;
        credentials.credential_version = "9.9".to_string();
        let source = CreatorsSource::new(credentials);

        let err = source
            .prepare(&offline_context(), &get_items_input())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Unsupported credential version"));
    }

    #[test]
    fn test_validate_requires_item_ids() {
        let err = source()
            .validate(&OperationInput::new(Operation::GetItems))
            .unwrap_err();
        assert_eq!(err.to_string(), "Item IDs are required");
    }

    #[test]
    fn test_normalize_and_debug_context() {
        let envelope = source().normalize(Operation::GetItems, Value::Null);
        assert_eq!(envelope.item_count, 0);

        let context = source().debug_context();
        assert_eq!(context.credential_id_suffix.as_deref(), Some("1234"));
        assert_eq!(context.marketplace.as_deref(), Some("www.amazon.de"));
    }
}
