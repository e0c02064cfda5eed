use serde::{Deserialize, Serialize};

/// The well-known client identity used for every token acquisition.
///
/// One client ID is shared by all environments; it is injected explicitly
/// into each [`AuthConfig`] rather than read from a hidden global.
pub const CLI_CLIENT_ID: &str = "04b07795-8ddb-461a-bbee-02f9e1bf7b46";

/// Parameters for one token acquisition against a directory tenant.
///
/// Derived from an environment on demand, never stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Active Directory login endpoint of the environment
    pub authority_url: String,
    /// Directory tenant to authenticate against
    pub tenant_id: String,
    /// Resource identifier tokens are requested for
    pub resource_id: String,
    /// Client identity presented to the authority
    pub client_id: String,
}

impl AuthConfig {
    /// The OAuth2 token endpoint for this tenant.
    pub fn token_endpoint(&self) -> String {
        format!(
            "{}/{}/oauth2/token",
            self.authority_url.trim_end_matches('/'),
            self.tenant_id
        )
    }
}

/// An access token returned by the token authority.
#[derive(Clone, Debug)]
pub struct AccessToken {
    /// The raw token string
    pub token: String,
    /// Token type, normally "Bearer"
    pub token_type: String,
    /// Seconds until expiry, when the authority reported one
    pub expires_in_secs: Option<u64>,
}

/// A directory tenant paired with a token valid for it.
///
/// The cross-tenant subscription lookup takes a list of these, one per
/// tenant to query.
#[derive(Clone, Debug)]
pub struct TenantCredential {
    pub tenant_id: String,
    pub token: AccessToken,
}
