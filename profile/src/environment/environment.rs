use std::collections::BTreeMap;
use std::fmt;
use std::sync::RwLock;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::catalog;
use super::endpoint::Endpoint;
use crate::auth::types::{AuthConfig, CLI_CLIENT_ID};
use crate::common::ProfileError;
use crate::management::{ResourceSubscriptionClient, SubscriptionClient};
use crate::utils::EnvUtils;

/// A named cloud deployment: one value slot per registered [`Endpoint`].
///
/// Environments are structurally immutable (the endpoint set is fixed by the
/// registry) but value-mutable: [`Environment::set`] overwrites a stored
/// value after construction. Stored values are only the fallback layer -
/// when the endpoint's process environment variable is set and non-empty it
/// always wins, including over values written with `set`.
///
/// Missing endpoints are tolerated at construction and fail lazily on first
/// [`Environment::get`], so partially-populated environments can still be
/// constructed and introspected.
pub struct Environment {
    name: String,
    values: RwLock<BTreeMap<Endpoint, Option<String>>>,
}

impl Environment {
    /// Creates an environment with every registered endpoint unset.
    pub fn new(name: impl Into<String>) -> Self {
        let values = Endpoint::ALL.iter().map(|e| (*e, None)).collect();
        Self {
            name: name.into(),
            values: RwLock::new(values),
        }
    }

    /// Creates an environment from the supplied endpoint values; endpoints
    /// not present in `supplied` default to unset.
    pub fn with_values<I, V>(name: impl Into<String>, supplied: I) -> Self
    where
        I: IntoIterator<Item = (Endpoint, V)>,
        V: Into<String>,
    {
        let environment = Self::new(name);
        {
            let mut values = environment
                .values
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            for (endpoint, value) in supplied {
                values.insert(endpoint, Some(value.into()));
            }
        }
        environment
    }

    /// The catalog key of this environment.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this environment is one of the built-in public clouds.
    ///
    /// Derived from the catalog by name, never stored.
    pub fn is_public(&self) -> bool {
        catalog::find(&self.name).is_some()
    }

    /// Resolves an endpoint value.
    ///
    /// Precedence: the endpoint's process environment variable when set and
    /// non-empty, then the stored value.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::EndpointNotDefined`] when both layers are
    /// absent. Resolution is deferred to read time; construction never
    /// validates.
    pub fn get(&self, endpoint: Endpoint) -> Result<String, ProfileError> {
        if let Some(value) = EnvUtils::get_optional_var(endpoint.env_var()) {
            return Ok(value);
        }
        let values = self
            .values
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        values
            .get(&endpoint)
            .and_then(|v| v.clone())
            .ok_or_else(|| ProfileError::EndpointNotDefined {
                endpoint: endpoint.name(),
                environment: self.name.clone(),
            })
    }

    /// Returns the raw stored value, ignoring the environment-variable layer.
    pub fn stored(&self, endpoint: Endpoint) -> Option<String> {
        let values = self
            .values
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        values.get(&endpoint).and_then(|v| v.clone())
    }

    /// Overwrites the stored fallback value for an endpoint.
    ///
    /// This writes only the fallback layer: if the endpoint's environment
    /// variable is set, a subsequent [`Environment::get`] still returns the
    /// variable's value, not the one written here.
    pub fn set(&self, endpoint: Endpoint, value: impl Into<String>) {
        let mut values = self
            .values
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        values.insert(endpoint, Some(value.into()));
    }

    /// The portal URL, scoped to `realm` when one is given.
    ///
    /// A non-empty realm replaces the URL's query string with a single
    /// `whr` parameter so the login UI pre-selects that home realm; any
    /// pre-existing query string or fragment is dropped. Without a realm the
    /// resolved URL passes through unchanged.
    pub fn portal_url(&self, realm: Option<&str>) -> Result<String, ProfileError> {
        Ok(inject_realm(self.get(Endpoint::PortalUrl)?, realm))
    }

    /// The publishing profile URL, scoped to `realm` when one is given.
    ///
    /// Same realm rewrite rules as [`Environment::portal_url`].
    pub fn publishing_profile_url(&self, realm: Option<&str>) -> Result<String, ProfileError> {
        Ok(inject_realm(self.get(Endpoint::PublishingProfileUrl)?, realm))
    }

    /// Derives the auth configuration for a token acquisition.
    ///
    /// `tenant` defaults to this environment's common tenant name and
    /// `resource` to its Active Directory resource ID. The client ID is the
    /// fixed well-known identity shared by all environments.
    pub fn auth_config(
        &self,
        tenant: Option<&str>,
        resource: Option<&str>,
    ) -> Result<AuthConfig, ProfileError> {
        let tenant_id = match tenant {
            Some(t) => t.to_string(),
            None => self.get(Endpoint::CommonTenantName)?,
        };
        let resource_id = match resource {
            Some(r) => r.to_string(),
            None => self.get(Endpoint::ActiveDirectoryResourceId)?,
        };
        Ok(AuthConfig {
            authority_url: self.get(Endpoint::ActiveDirectoryEndpointUrl)?,
            tenant_id,
            resource_id,
            client_id: CLI_CLIENT_ID.to_string(),
        })
    }

    /// Builds a classic (service management) client bound to this
    /// environment's management endpoint.
    pub fn asm_client(&self, token: impl Into<String>) -> Result<SubscriptionClient, ProfileError> {
        Ok(SubscriptionClient::new(
            self.get(Endpoint::ManagementEndpointUrl)?,
            token,
        ))
    }

    /// Builds a resource manager client bound to this environment's resource
    /// manager endpoint.
    pub fn arm_client(
        &self,
        token: impl Into<String>,
    ) -> Result<ResourceSubscriptionClient, ProfileError> {
        Ok(ResourceSubscriptionClient::new(
            self.get(Endpoint::ResourceManagerEndpointUrl)?,
            token,
        ))
    }

    fn snapshot(&self) -> BTreeMap<Endpoint, Option<String>> {
        self.values
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

/// Replaces the query string of `url` with `?whr=<realm>`.
///
/// The existing query string and fragment are dropped so the rewritten query
/// is authoritative. Empty or absent realms leave the URL untouched.
fn inject_realm(url: String, realm: Option<&str>) -> String {
    match realm {
        Some(realm) if !realm.is_empty() => {
            let base = match url.find(['?', '#']) {
                Some(idx) => &url[..idx],
                None => url.as_str(),
            };
            format!("{}?whr={}", base, urlencoding::encode(realm))
        }
        _ => url,
    }
}

impl Clone for Environment {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            values: RwLock::new(self.snapshot()),
        }
    }
}

impl PartialEq for Environment {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.snapshot() == other.snapshot()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("name", &self.name)
            .field("values", &self.snapshot())
            .finish()
    }
}

/// Serializes as a flat map of `name` plus every endpoint's raw stored value
/// (nulls included) in registry order. Environment-variable overrides are
/// deliberately not applied, so a round trip reproduces the stored values.
impl Serialize for Environment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let values = self.snapshot();
        let mut map = serializer.serialize_map(Some(1 + Endpoint::ALL.len()))?;
        map.serialize_entry("name", &self.name)?;
        for endpoint in Endpoint::ALL {
            map.serialize_entry(endpoint.name(), &values.get(endpoint).cloned().flatten())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Environment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EnvironmentVisitor;

        impl<'de> Visitor<'de> for EnvironmentVisitor {
            type Value = Environment;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an environment definition map")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Environment, A::Error> {
                let mut name: Option<String> = None;
                let mut values: BTreeMap<Endpoint, Option<String>> =
                    Endpoint::ALL.iter().map(|e| (*e, None)).collect();

                while let Some(key) = access.next_key::<String>()? {
                    if key == "name" {
                        name = Some(access.next_value()?);
                    } else if let Some(endpoint) = Endpoint::from_name(&key) {
                        values.insert(endpoint, access.next_value()?);
                    } else {
                        // Unknown keys are tolerated for forward compatibility.
                        let _: de::IgnoredAny = access.next_value()?;
                    }
                }

                let name = name.ok_or_else(|| de::Error::missing_field("name"))?;
                Ok(Environment {
                    name,
                    values: RwLock::new(values),
                })
            }
        }

        deserializer.deserialize_map(EnvironmentVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_err, assert_ok};

    #[test]
    fn unset_endpoint_fails_on_read_not_construction() {
        let env = Environment::new("CustomCloud");
        let err = env.get(Endpoint::GalleryEndpointUrl).unwrap_err();
        match err {
            ProfileError::EndpointNotDefined {
                endpoint,
                environment,
            } => {
                assert_eq!(endpoint, "galleryEndpointUrl");
                assert_eq!(environment, "CustomCloud");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn set_then_get_returns_value() {
        let env = Environment::new("CustomCloud");
        assert_err!(env.get(Endpoint::GalleryEndpointUrl));
        env.set(Endpoint::GalleryEndpointUrl, "https://gallery.example.com/");
        assert_eq!(
            env.get(Endpoint::GalleryEndpointUrl).unwrap(),
            "https://gallery.example.com/"
        );
    }

    #[test]
    fn env_var_wins_over_stored_value() {
        let env = Environment::new("CustomCloud");
        env.set(Endpoint::SqlServerHostnameSuffix, ".stored.example.com");
        unsafe {
            std::env::set_var("AZURE_SQL_SERVER_HOSTNAME_SUFFIX", ".env.example.com");
        }
        assert_eq!(
            env.get(Endpoint::SqlServerHostnameSuffix).unwrap(),
            ".env.example.com"
        );
        unsafe {
            std::env::remove_var("AZURE_SQL_SERVER_HOSTNAME_SUFFIX");
        }
        assert_eq!(
            env.get(Endpoint::SqlServerHostnameSuffix).unwrap(),
            ".stored.example.com"
        );
    }

    #[test]
    fn portal_url_realm_rewrite_drops_existing_query() {
        let env = Environment::new("CustomCloud");
        env.set(
            Endpoint::PortalUrl,
            "http://go.example.com/fwlink/?LinkId=254433",
        );
        assert_eq!(
            env.portal_url(Some("contoso.com")).unwrap(),
            "http://go.example.com/fwlink/?whr=contoso.com"
        );
        assert_eq!(
            env.portal_url(None).unwrap(),
            "http://go.example.com/fwlink/?LinkId=254433"
        );
        assert_eq!(
            env.portal_url(Some("")).unwrap(),
            "http://go.example.com/fwlink/?LinkId=254433"
        );
    }

    #[test]
    fn realm_is_url_encoded() {
        let env = Environment::new("CustomCloud");
        env.set(Endpoint::PublishingProfileUrl, "https://portal.example.com/");
        assert_eq!(
            env.publishing_profile_url(Some("a b&c")).unwrap(),
            "https://portal.example.com/?whr=a%20b%26c"
        );
    }

    #[test]
    fn auth_config_defaults_and_overrides() {
        let env = Environment::with_values(
            "CustomCloud",
            [
                (Endpoint::ActiveDirectoryEndpointUrl, "https://login.example.com"),
                (Endpoint::CommonTenantName, "common"),
                (Endpoint::ActiveDirectoryResourceId, "https://management.example.com/"),
            ],
        );

        let defaulted = env.auth_config(None, None).unwrap();
        assert_eq!(defaulted.authority_url, "https://login.example.com");
        assert_eq!(defaulted.tenant_id, "common");
        assert_eq!(defaulted.resource_id, "https://management.example.com/");
        assert_eq!(defaulted.client_id, CLI_CLIENT_ID);

        let explicit = env.auth_config(Some("t1"), Some("r1")).unwrap();
        assert_eq!(explicit.tenant_id, "t1");
        assert_eq!(explicit.resource_id, "r1");
    }

    #[test]
    fn serialization_round_trip_preserves_stored_values() {
        let env = Environment::with_values(
            "CustomCloud",
            [
                (Endpoint::PortalUrl, "https://portal.example.com"),
                (Endpoint::CommonTenantName, "common"),
            ],
        );

        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["name"], "CustomCloud");
        assert_eq!(json["portalUrl"], "https://portal.example.com");
        assert_eq!(json["managementEndpointUrl"], serde_json::Value::Null);

        let restored: Environment = serde_json::from_value(json).unwrap();
        assert_eq!(restored, env);
    }

    #[test]
    fn serialization_ignores_env_var_overrides() {
        let env = Environment::new("CustomCloud");
        env.set(Endpoint::SqlManagementEndpointUrl, "https://stored.example.com/");
        unsafe {
            std::env::set_var(
                "AZURE_SQL_MANAGEMENTENDPOINT_URL",
                "https://override.example.com/",
            );
        }
        let json = serde_json::to_value(&env).unwrap();
        unsafe {
            std::env::remove_var("AZURE_SQL_MANAGEMENTENDPOINT_URL");
        }
        assert_eq!(json["sqlManagementEndpointUrl"], "https://stored.example.com/");
    }

    #[test]
    fn deserialization_tolerates_unknown_keys() {
        let restored: Result<Environment, _> = serde_json::from_str(
            r#"{"name":"CustomCloud","portalUrl":"https://p.example.com","futureEndpoint":"x"}"#,
        );
        let env = assert_ok!(restored);
        assert_eq!(env.name(), "CustomCloud");
        assert_eq!(env.stored(Endpoint::PortalUrl).as_deref(), Some("https://p.example.com"));
    }

    #[test]
    fn custom_environment_is_not_public() {
        assert!(!Environment::new("CustomCloud").is_public());
    }
}
