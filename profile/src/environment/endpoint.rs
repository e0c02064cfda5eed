/// A registered environment endpoint parameter.
///
/// Every deployment environment carries one value slot per variant. Each
/// variant is bound to exactly one process environment variable, which takes
/// precedence over the stored value when set and non-empty.
///
/// Adding a new endpoint means adding a variant here plus its entries in
/// [`Endpoint::name`], [`Endpoint::env_var`] and [`Endpoint::description`];
/// no other component changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Endpoint {
    /// Management portal URL
    PortalUrl,
    /// URL serving the publishing profile download
    PublishingProfileUrl,
    /// Classic (service management) API endpoint
    ManagementEndpointUrl,
    /// Resource manager API endpoint
    ResourceManagerEndpointUrl,
    /// SQL management API endpoint
    SqlManagementEndpointUrl,
    /// DNS suffix for SQL server hostnames
    SqlServerHostnameSuffix,
    /// Active Directory login endpoint
    ActiveDirectoryEndpointUrl,
    /// Tenant name used when no explicit tenant is given
    CommonTenantName,
    /// Template gallery endpoint
    GalleryEndpointUrl,
    /// Resource identifier requested when acquiring tokens
    ActiveDirectoryResourceId,
}

impl Endpoint {
    /// All registered endpoints, in enumeration and serialization order.
    pub const ALL: &'static [Endpoint] = &[
        Endpoint::PortalUrl,
        Endpoint::PublishingProfileUrl,
        Endpoint::ManagementEndpointUrl,
        Endpoint::ResourceManagerEndpointUrl,
        Endpoint::SqlManagementEndpointUrl,
        Endpoint::SqlServerHostnameSuffix,
        Endpoint::ActiveDirectoryEndpointUrl,
        Endpoint::CommonTenantName,
        Endpoint::GalleryEndpointUrl,
        Endpoint::ActiveDirectoryResourceId,
    ];

    /// The serialized field name, also the key accepted by [`Endpoint::from_name`].
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::PortalUrl => "portalUrl",
            Endpoint::PublishingProfileUrl => "publishingProfileUrl",
            Endpoint::ManagementEndpointUrl => "managementEndpointUrl",
            Endpoint::ResourceManagerEndpointUrl => "resourceManagerEndpointUrl",
            Endpoint::SqlManagementEndpointUrl => "sqlManagementEndpointUrl",
            Endpoint::SqlServerHostnameSuffix => "sqlServerHostnameSuffix",
            Endpoint::ActiveDirectoryEndpointUrl => "activeDirectoryEndpointUrl",
            Endpoint::CommonTenantName => "commonTenantName",
            Endpoint::GalleryEndpointUrl => "galleryEndpointUrl",
            Endpoint::ActiveDirectoryResourceId => "activeDirectoryResourceId",
        }
    }

    /// The process environment variable that overrides the stored value.
    pub fn env_var(&self) -> &'static str {
        match self {
            Endpoint::PortalUrl => "AZURE_PORTAL_URL",
            Endpoint::PublishingProfileUrl => "AZURE_PUBLISHINGPROFILE_URL",
            Endpoint::ManagementEndpointUrl => "AZURE_MANAGEMENTENDPOINT_URL",
            Endpoint::ResourceManagerEndpointUrl => "AZURE_RESOURCEMANAGERENDPOINT_URL",
            Endpoint::SqlManagementEndpointUrl => "AZURE_SQL_MANAGEMENTENDPOINT_URL",
            Endpoint::SqlServerHostnameSuffix => "AZURE_SQL_SERVER_HOSTNAME_SUFFIX",
            Endpoint::ActiveDirectoryEndpointUrl => "AZURE_ACTIVEDIRECTORY_ENDPOINT_URL",
            Endpoint::CommonTenantName => "AZURE_ACTIVEDIRECTORY_COMMON_TENANT_NAME",
            Endpoint::GalleryEndpointUrl => "AZURE_GALLERY_ENDPOINT_URL",
            Endpoint::ActiveDirectoryResourceId => "AZURE_ACTIVEDIRECTORY_RESOURCE_ID",
        }
    }

    /// Human-readable description of the endpoint.
    pub fn description(&self) -> &'static str {
        match self {
            Endpoint::PortalUrl => "the management portal URL",
            Endpoint::PublishingProfileUrl => "the publish settings file URL",
            Endpoint::ManagementEndpointUrl => "the management service endpoint",
            Endpoint::ResourceManagerEndpointUrl => "the resource management endpoint",
            Endpoint::SqlManagementEndpointUrl => {
                "the sql server management endpoint for mobile commands"
            }
            Endpoint::SqlServerHostnameSuffix => "the dns suffix for sql servers",
            Endpoint::ActiveDirectoryEndpointUrl => "the Active Directory login endpoint",
            Endpoint::CommonTenantName => "the Active Directory common tenant name",
            Endpoint::GalleryEndpointUrl => "the template gallery endpoint",
            Endpoint::ActiveDirectoryResourceId => {
                "the Active Directory resource ID to acquire tokens for"
            }
        }
    }

    /// Parses a serialized field name back into an endpoint.
    pub fn from_name(name: &str) -> Option<Endpoint> {
        Endpoint::ALL.iter().copied().find(|e| e.name() == name)
    }
}
