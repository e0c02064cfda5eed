use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::subscription::{RawSubscription, Subscription, UserKind};
use crate::auth::{TenantCredential, TokenAuthority};
use crate::common::ProfileError;
use crate::environment::Environment;

/// Credentials presented to [`add_account`], one variant per login path.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub enum LoginCredentials {
    /// Interactive user identity
    User { username: String, password: String },
    /// Unattended application identity
    ServicePrincipal { client_id: String, secret: String },
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginCredentials::User { username, .. } => f
                .debug_struct("User")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            LoginCredentials::ServicePrincipal { client_id, .. } => f
                .debug_struct("ServicePrincipal")
                .field("client_id", client_id)
                .field("secret", &"<redacted>")
                .finish(),
        }
    }
}

/// Looks up the subscriptions visible to a set of credentials.
///
/// Two lookup shapes: by raw credentials (the source performs its own
/// tenant discovery) or by an explicit list of already-authenticated
/// tenants.
#[async_trait]
pub trait SubscriptionSource: Send + Sync {
    async fn subscriptions_for_credentials(
        &self,
        environment: &Environment,
        username: &str,
        password: &str,
        tenant: &str,
    ) -> Result<Vec<RawSubscription>, ProfileError>;

    async fn subscriptions_from_tenants(
        &self,
        environment: &Environment,
        username: &str,
        tenants: &[TenantCredential],
    ) -> Result<Vec<RawSubscription>, ProfileError>;
}

/// Subscription source backed by the resource manager API.
pub struct ArmSubscriptionSource {
    authority: Arc<dyn TokenAuthority>,
}

impl ArmSubscriptionSource {
    pub fn new(authority: Arc<dyn TokenAuthority>) -> Self {
        Self { authority }
    }
}

#[async_trait]
impl SubscriptionSource for ArmSubscriptionSource {
    async fn subscriptions_for_credentials(
        &self,
        environment: &Environment,
        username: &str,
        password: &str,
        tenant: &str,
    ) -> Result<Vec<RawSubscription>, ProfileError> {
        let auth = environment.auth_config(Some(tenant), None)?;
        let token = self.authority.acquire_token(&auth, username, password).await?;
        environment.arm_client(token.token)?.list_subscriptions().await
    }

    async fn subscriptions_from_tenants(
        &self,
        environment: &Environment,
        _username: &str,
        tenants: &[TenantCredential],
    ) -> Result<Vec<RawSubscription>, ProfileError> {
        let mut subscriptions = Vec::new();
        for tenant in tenants {
            let found = environment
                .arm_client(tenant.token.token.clone())?
                .list_subscriptions()
                .await?;
            subscriptions.extend(found);
        }
        Ok(subscriptions)
    }
}

/// Logs an account in and returns its normalized subscriptions.
///
/// User credentials are normalized and handed to the subscription source,
/// which performs its own tenant discovery. Service principals first
/// exchange their secret for a token scoped to `tenant`, then query that
/// single tenant. Both paths converge on one normalization step; on any
/// collaborator error the whole login fails with no partial results.
pub async fn add_account(
    environment: Arc<Environment>,
    credentials: &LoginCredentials,
    tenant: &str,
    authority: &dyn TokenAuthority,
    source: &dyn SubscriptionSource,
) -> Result<Vec<Subscription>, ProfileError> {
    match credentials {
        LoginCredentials::User { username, password } => {
            let username = normalize_user_name(username);
            log::debug!(
                "Logging in user {username} against environment {}",
                environment.name()
            );
            let raw = source
                .subscriptions_for_credentials(&environment, &username, password, tenant)
                .await?;
            Ok(process_subscriptions(
                raw,
                &username,
                tenant,
                UserKind::User,
                &environment,
            ))
        }
        LoginCredentials::ServicePrincipal { client_id, secret } => {
            log::debug!(
                "Logging in service principal {client_id} against environment {}",
                environment.name()
            );
            let auth = environment.auth_config(Some(tenant), None)?;
            let token = authority
                .acquire_service_principal_token(&auth, client_id, secret)
                .await?;
            let tenants = vec![TenantCredential {
                tenant_id: tenant.to_string(),
                token,
            }];
            let raw = source
                .subscriptions_from_tenants(&environment, client_id, &tenants)
                .await?;
            Ok(process_subscriptions(
                raw,
                client_id,
                tenant,
                UserKind::ServicePrincipal,
                &environment,
            ))
        }
    }
}

/// Thin pass-through token acquisition for the given tenant.
///
/// Derives the auth config (defaulting the tenant to the environment's
/// common tenant) and forwards the authority's result or error unchanged.
pub async fn acquire_token(
    environment: &Environment,
    username: &str,
    password: &str,
    tenant: Option<&str>,
    authority: &dyn TokenAuthority,
) -> Result<crate::auth::AccessToken, ProfileError> {
    let auth = environment.auth_config(tenant, None)?;
    authority.acquire_token(&auth, username, password).await
}

/// Lowercases the domain part of `local@domain` user names.
///
/// Names that are not of that exact shape (no `@`, several `@`s, empty
/// parts) pass through untouched.
pub fn normalize_user_name(name: &str) -> String {
    match name.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
        {
            format!("{local}@{}", domain.to_lowercase())
        }
        _ => name.to_string(),
    }
}

fn process_subscriptions(
    raw: Vec<RawSubscription>,
    user_name: &str,
    tenant: &str,
    kind: UserKind,
    environment: &Arc<Environment>,
) -> Vec<Subscription> {
    log::info!(
        "Normalizing {} subscription(s) from environment {}",
        raw.len(),
        environment.name()
    );
    raw.into_iter()
        .map(|record| {
            Subscription::from_raw(record, user_name, tenant, kind, Arc::clone(environment))
        })
        .collect()
}
