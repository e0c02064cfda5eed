use async_trait::async_trait;
use serde::Deserialize;

use super::types::{AccessToken, AuthConfig};
use crate::common::ProfileError;

/// Exchanges credentials for access tokens.
///
/// The login orchestrator consumes this as an interface so tests can swap
/// the network-backed implementation for a mock. Implementations perform no
/// retries here; any retry policy belongs to the caller or the transport.
#[async_trait]
pub trait TokenAuthority: Send + Sync {
    /// Exchanges a user name and password for a token.
    async fn acquire_token(
        &self,
        auth: &AuthConfig,
        username: &str,
        password: &str,
    ) -> Result<AccessToken, ProfileError>;

    /// Exchanges a service-principal secret for a token.
    async fn acquire_service_principal_token(
        &self,
        auth: &AuthConfig,
        client_id: &str,
        secret: &str,
    ) -> Result<AccessToken, ProfileError>;
}

/// Token authority backed by the Active Directory OAuth2 token endpoint.
#[derive(Clone)]
pub struct AadTokenAuthority {
    http_client: reqwest::Client,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    token_type: String,
    #[serde(default)]
    expires_in: Option<ExpiresIn>,
}

// The authority reports expires_in as a number on some endpoint versions
// and as a decimal string on others.
#[derive(Deserialize)]
#[serde(untagged)]
enum ExpiresIn {
    Seconds(u64),
    Text(String),
}

impl ExpiresIn {
    fn as_secs(&self) -> Option<u64> {
        match self {
            ExpiresIn::Seconds(secs) => Some(*secs),
            ExpiresIn::Text(text) => text.parse().ok(),
        }
    }
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
    error_description: Option<String>,
}

impl AadTokenAuthority {
    pub fn new(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }

    async fn request_token(
        &self,
        auth: &AuthConfig,
        params: &[(&str, &str)],
    ) -> Result<AccessToken, ProfileError> {
        let response = self
            .http_client
            .post(auth.token_endpoint())
            .form(params)
            .send()
            .await
            .map_err(|e| ProfileError::Authentication(format!("Token request failed: {e}")))?;

        if !response.status().is_success() {
            let error_info = response
                .json::<ErrorResponse>()
                .await
                .unwrap_or(ErrorResponse {
                    error: "unknown_error".to_string(),
                    error_description: Some("Failed to parse error response".to_string()),
                });
            let detail = error_info
                .error_description
                .as_deref()
                .unwrap_or(&error_info.error);
            return Err(ProfileError::Authentication(format!(
                "{}: {detail}",
                error_info.error
            )));
        }

        let token_response: TokenResponse = response.json().await.map_err(|e| {
            ProfileError::Authentication(format!("Failed to parse token response: {e}"))
        })?;

        Ok(AccessToken {
            token: token_response.access_token,
            token_type: token_response.token_type,
            expires_in_secs: token_response.expires_in.and_then(|e| e.as_secs()),
        })
    }
}

impl Default for AadTokenAuthority {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

#[async_trait]
impl TokenAuthority for AadTokenAuthority {
    async fn acquire_token(
        &self,
        auth: &AuthConfig,
        username: &str,
        password: &str,
    ) -> Result<AccessToken, ProfileError> {
        log::debug!(
            "Acquiring user token from tenant {} for {username}",
            auth.tenant_id
        );
        let params = [
            ("grant_type", "password"),
            ("client_id", auth.client_id.as_str()),
            ("resource", auth.resource_id.as_str()),
            ("username", username),
            ("password", password),
        ];
        self.request_token(auth, &params).await
    }

    async fn acquire_service_principal_token(
        &self,
        auth: &AuthConfig,
        client_id: &str,
        secret: &str,
    ) -> Result<AccessToken, ProfileError> {
        log::debug!(
            "Acquiring service principal token from tenant {} for {client_id}",
            auth.tenant_id
        );
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", client_id),
            ("resource", auth.resource_id.as_str()),
            ("client_secret", secret),
        ];
        self.request_token(auth, &params).await
    }
}
