//! Creators API credentials and token endpoint resolution.

use serde::Deserialize;
use url::Url;

use offerlens_core::{redact_suffix, CoreError, DebugContext};
use offerlens_fetch::{RetryPolicy, TokenRequest};

/// Base URL for catalog operations.
pub const CREATORS_API_BASE_URL: &str = "https://creatorsapi.amazon";

/// OAuth2 scope requested in every grant.
pub const CREATORS_TOKEN_SCOPE: &str = "creatorsapi/default";

/// Regional token endpoints by credential schema version.
const TOKEN_ENDPOINTS: [(&str, &str); 3] = [
    (
        "2.1",
        "https://creatorsapi.auth.us-east-1.amazoncognito.com/oauth2/token",
    ),
    (
        "2.2",
        "https://creatorsapi.auth.eu-south-2.amazoncognito.com/oauth2/token",
    ),
    (
        "2.3",
        "https://creatorsapi.auth.us-west-2.amazoncognito.com/oauth2/token",
    ),
];

/// Credentials for the Creators API.
///
/// The credential version selects the regional OAuth2 endpoint: `2.1` (NA),
/// `2.2` (EU), `2.3` (FE). An explicit `authEndpoint` overrides the lookup.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorsCredentials {
    /// OAuth2 credential id.
    pub credential_id: String,
    /// OAuth2 credential secret.
    pub credential_secret: String,
    /// Credential schema version.
    #[serde(default = "default_version")]
    pub credential_version: String,
    /// Associate partner tag.
    pub partner_tag: String,
    /// Marketplace domain, e.g. `www.amazon.com`.
    #[serde(default = "default_marketplace")]
    pub marketplace: String,
    /// Optional token endpoint override.
    #[serde(default)]
    pub auth_endpoint: Option<String>,
}

fn default_version() -> String {
    "2.1".to_string()
}

fn default_marketplace() -> String {
    "www.amazon.com".to_string()
}

impl CreatorsCredentials {
    /// Returns a copy with every field trimmed; a blank endpoint override
    /// collapses to none.
    pub fn trimmed(&self) -> Self {
        Self {
            credential_id: self.credential_id.trim().to_string(),
            credential_secret: self.credential_secret.trim().to_string(),
            credential_version: self.credential_version.trim().to_string(),
            partner_tag: self.partner_tag.trim().to_string(),
            marketplace: self.marketplace.trim().to_string(),
            auth_endpoint: self
                .auth_endpoint
                .as_deref()
                .map(str::trim)
                .filter(|endpoint| !endpoint.is_empty())
                .map(str::to_string),
        }
    }

    /// Resolves the token endpoint and its cache label.
    ///
    /// An override wins and doubles as the label; otherwise the version
    /// picks a regional endpoint labeled `default`.
    pub fn token_endpoint(&self) -> Result<(String, String), CoreError> {
        if let Some(endpoint) = &self.auth_endpoint {
            Url::parse(endpoint).map_err(|_| {
                CoreError::InvalidConfig("Custom auth endpoint is not a valid URL".to_string())
            })?;
            return Ok((endpoint.clone(), endpoint.clone()));
        }

        TOKEN_ENDPOINTS
            .iter()
            .find(|(version, _)| *version == self.credential_version)
            .map(|(_, url)| ((*url).to_string(), "default".to_string()))
            .ok_or_else(|| {
                CoreError::InvalidConfig(format!(
                    "Unsupported credential version: {}",
                    self.credential_version
                ))
            })
    }

    /// Builds the token request for this credential.
    pub fn token_request(&self, policy: RetryPolicy) -> Result<TokenRequest, CoreError> {
        let (endpoint, endpoint_label) = self.token_endpoint()?;
        Ok(TokenRequest {
            client_id: self.credential_id.clone(),
            client_secret: self.credential_secret.clone(),
            scope: CREATORS_TOKEN_SCOPE.to_string(),
            version: self.credential_version.clone(),
            endpoint,
            endpoint_label,
            policy,
        })
    }

    /// Redacted context for error records.
    pub fn debug_context(&self) -> DebugContext {
        DebugContext {
            credential_id_suffix: Some(redact_suffix(&self.credential_id)),
            partner_tag_suffix: Some(redact_suffix(&self.partner_tag)),
            credential_version: Some(self.credential_version.clone()),
            marketplace: Some(self.marketplace.clone()),
            auth_endpoint: Some(
                self.auth_endpoint
                    .clone()
                    .unwrap_or_else(|| "default".to_string()),
            ),
            ..DebugContext::default()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(version: &str) -> CreatorsCredentials {
        CreatorsCredentials {
            credential_id: "amzn1.application-oa2-client.abcd1234".to_string(),
            credential_secret: "secret".to_string(),
            credential_version: version.to_string(),
            partner_tag: "mytag-20".to_string(),
            marketplace: "www.amazon.com".to_string(),
            auth_endpoint: None,
        }
    }

    #[test]
    fn test_version_selects_regional_endpoint() {
        let cases = [
            ("2.1", "us-east-1"),
            ("2.2", "eu-south-2"),
            ("2.3", "us-west-2"),
        ];
        for (version, region) in cases {
            let (endpoint, label) = credentials(version).token_endpoint().unwrap();
            assert!(endpoint.contains(region), "{version} -> {endpoint}");
            assert!(endpoint.ends_with("/oauth2/token"));
            assert_eq!(label, "default");
        }
    }

    #[test]
    fn test_unsupported_version_is_rejected() {
        let err = credentials("9.9").token_endpoint().unwrap_err();
        assert!(err.to_string().contains("Unsupported credential version: 9.9"));
    }

    #[test]
    fn test_endpoint_override_wins() {
        let mut creds = credentials("2.1");
        creds.auth_endpoint = Some("https://auth.example.com/oauth2/token".to_string());
        let (endpoint, label) = creds.token_endpoint().unwrap();
        assert_eq!(endpoint, "https://auth.example.com/oauth2/token");
        assert_eq!(label, "https://auth.example.com/oauth2/token");
    }

    #[test]
    fn test_endpoint_override_must_be_a_url() {
        let mut creds = credentials("2.1");
        creds.auth_endpoint = Some("not a url".to_string());
        let err = creds.token_endpoint().unwrap_err();
        assert!(err.to_string().contains("not a valid URL"));
    }

    #[test]
    fn test_trimmed_collapses_blank_override() {
        let mut creds = credentials("2.1");
        creds.credential_id = "  id-1234  ".to_string();
        creds.auth_endpoint = Some("   ".to_string());

        let trimmed = creds.trimmed();
        assert_eq!(trimmed.credential_id, "id-1234");
        assert!(trimmed.auth_endpoint.is_none());
    }

    #[test]
    fn test_token_request_carries_scope_and_key_parts() {
        let request = credentials("2.2")
            .token_request(RetryPolicy::default())
            .unwrap();
        assert_eq!(request.scope, CREATORS_TOKEN_SCOPE);
        assert_eq!(request.version, "2.2");
        assert_eq!(
            request.cache_key(),
            "amzn1.application-oa2-client.abcd1234:2.2:default"
        );
    }

    #[test]
    fn test_debug_context_redacts_and_defaults() {
        let context = credentials("2.1").debug_context();
        assert_eq!(context.credential_id_suffix.as_deref(), Some("1234"));
        assert_eq!(context.partner_tag_suffix.as_deref(), Some("g-20"));
        assert_eq!(context.credential_version.as_deref(), Some("2.1"));
        assert_eq!(context.auth_endpoint.as_deref(), Some("default"));
        assert!(context.access_key_suffix.is_none());
    }
}
