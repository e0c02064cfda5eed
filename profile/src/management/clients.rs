//! Thin management-API clients.
//!
//! These are the collaborators behind [`Environment::asm_client`] and
//! [`Environment::arm_client`]: each is a reqwest client bound to one
//! management endpoint and one bearer token. The environment's only
//! responsibility is supplying the correct endpoint URL.
//!
//! [`Environment::asm_client`]: crate::environment::Environment::asm_client
//! [`Environment::arm_client`]: crate::environment::Environment::arm_client

use reqwest::header::AUTHORIZATION;
use serde::Deserialize;

use crate::account::subscription::RawSubscription;
use crate::common::ProfileError;

const API_VERSION_CLASSIC: &str = "2014-04-01";
const API_VERSION_RESOURCE_MANAGER: &str = "2016-06-01";

#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    value: Vec<T>,
}

/// Classic (service management) client bound to one environment endpoint.
#[derive(Debug, Clone)]
pub struct SubscriptionClient {
    endpoint: String,
    token: String,
    client: reqwest::Client,
}

impl SubscriptionClient {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Lists the subscriptions visible to the bound credentials.
    pub async fn list_subscriptions(&self) -> Result<Vec<RawSubscription>, ProfileError> {
        list_subscriptions(
            &self.client,
            &self.endpoint,
            &self.token,
            API_VERSION_CLASSIC,
        )
        .await
    }
}

/// Resource manager client bound to one environment endpoint.
#[derive(Debug, Clone)]
pub struct ResourceSubscriptionClient {
    endpoint: String,
    token: String,
    client: reqwest::Client,
}

impl ResourceSubscriptionClient {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Lists the subscriptions visible to the bound credentials.
    pub async fn list_subscriptions(&self) -> Result<Vec<RawSubscription>, ProfileError> {
        list_subscriptions(
            &self.client,
            &self.endpoint,
            &self.token,
            API_VERSION_RESOURCE_MANAGER,
        )
        .await
    }
}

async fn list_subscriptions(
    client: &reqwest::Client,
    endpoint: &str,
    token: &str,
    api_version: &str,
) -> Result<Vec<RawSubscription>, ProfileError> {
    let url = format!(
        "{}/subscriptions?api-version={}",
        endpoint.trim_end_matches('/'),
        api_version
    );

    let response = client
        .get(&url)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        return Err(ProfileError::Management { status, message });
    }

    let list: ListResponse<RawSubscription> = response.json().await?;
    Ok(list.value)
}
