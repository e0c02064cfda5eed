use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::common::ProfileError;
use crate::environment::Environment;
use crate::management::{ResourceSubscriptionClient, SubscriptionClient};

/// A subscription record as reported by a subscription source.
///
/// Different sources name the display field differently (`displayName` from
/// the resource manager API, `subscriptionName` from older sources) and may
/// omit the directory tenant entirely, so everything but the ID is optional.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSubscription {
    pub subscription_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_directory_tenant_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// The kind of identity a subscription was discovered with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserKind {
    User,
    ServicePrincipal,
}

/// The identity a subscription is bound to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionUser {
    /// Normalized user name or service-principal client ID
    pub name: String,
    /// The tenant supplied at login time
    pub tenant: String,
    #[serde(rename = "type")]
    pub kind: UserKind,
}

/// A normalized subscription, owned by the caller after login.
///
/// Carries a back-reference to the environment that produced it so clients
/// can later be built against the right endpoints; the environment itself
/// keeps no reference to the subscriptions it produced.
#[derive(Clone, Debug, Serialize)]
pub struct Subscription {
    pub id: String,
    /// Lenient: a record with neither display name nor subscription name
    /// normalizes to `None` rather than being rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub user: SubscriptionUser,
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
    #[serde(skip)]
    pub environment: Arc<Environment>,
}

impl Subscription {
    /// Normalizes a raw record into the canonical shape.
    ///
    /// `tenant_id` prefers the tenant the record itself reports, falling
    /// back to the tenant supplied at login (partner and cross-tenant logins
    /// omit it).
    pub fn from_raw(
        raw: RawSubscription,
        user_name: &str,
        tenant: &str,
        kind: UserKind,
        environment: Arc<Environment>,
    ) -> Self {
        Self {
            id: raw.subscription_id,
            name: raw.display_name.or(raw.subscription_name),
            user: SubscriptionUser {
                name: user_name.to_string(),
                tenant: tenant.to_string(),
                kind,
            },
            tenant_id: raw
                .active_directory_tenant_id
                .unwrap_or_else(|| tenant.to_string()),
            environment,
        }
    }

    /// Classic management client against this subscription's environment.
    pub fn asm_client(&self, token: impl Into<String>) -> Result<SubscriptionClient, ProfileError> {
        self.environment.asm_client(token)
    }

    /// Resource manager client against this subscription's environment.
    pub fn arm_client(
        &self,
        token: impl Into<String>,
    ) -> Result<ResourceSubscriptionClient, ProfileError> {
        self.environment.arm_client(token)
    }
}
