use once_cell::sync::Lazy;

use super::endpoint::Endpoint;
use super::environment::Environment;

/// The built-in public environments.
///
/// Membership here is the sole source of truth for
/// [`Environment::is_public`]. Adding a sovereign or private cloud means
/// appending a fully-populated entry; completeness is not validated, an
/// incomplete entry would defer its missing-endpoint failures to read time
/// like any custom environment.
static CATALOG: Lazy<Vec<Environment>> = Lazy::new(|| {
    vec![
        Environment::with_values(
            "AzureCloud",
            [
                (
                    Endpoint::PortalUrl,
                    "http://go.microsoft.com/fwlink/?LinkId=254433",
                ),
                (
                    Endpoint::PublishingProfileUrl,
                    "http://go.microsoft.com/fwlink/?LinkId=254432",
                ),
                (
                    Endpoint::ManagementEndpointUrl,
                    "https://management.core.windows.net",
                ),
                (
                    Endpoint::ResourceManagerEndpointUrl,
                    "https://management.azure.com/",
                ),
                (
                    Endpoint::SqlManagementEndpointUrl,
                    "https://management.core.windows.net:8443/",
                ),
                (Endpoint::SqlServerHostnameSuffix, ".database.windows.net"),
                (
                    Endpoint::ActiveDirectoryEndpointUrl,
                    "https://login.windows.net",
                ),
                (Endpoint::CommonTenantName, "common"),
                (Endpoint::GalleryEndpointUrl, "https://gallery.azure.com/"),
                (
                    Endpoint::ActiveDirectoryResourceId,
                    "https://management.core.windows.net/",
                ),
            ],
        ),
        Environment::with_values(
            "AzureChinaCloud",
            [
                (
                    Endpoint::PortalUrl,
                    "http://go.microsoft.com/fwlink/?LinkId=301902",
                ),
                (
                    Endpoint::PublishingProfileUrl,
                    "http://go.microsoft.com/fwlink/?LinkID=301774",
                ),
                (
                    Endpoint::ManagementEndpointUrl,
                    "https://management.core.chinacloudapi.cn",
                ),
                (
                    Endpoint::ResourceManagerEndpointUrl,
                    "https://management.chinacloudapi.cn",
                ),
                (
                    Endpoint::SqlManagementEndpointUrl,
                    "https://management.core.chinacloudapi.cn:8443/",
                ),
                (
                    Endpoint::SqlServerHostnameSuffix,
                    ".database.chinacloudapi.cn",
                ),
                (
                    Endpoint::ActiveDirectoryEndpointUrl,
                    "https://login.chinacloudapi.cn",
                ),
                (Endpoint::CommonTenantName, "common"),
                (
                    Endpoint::GalleryEndpointUrl,
                    "https://gallery.windowsazure.cn/",
                ),
                (
                    Endpoint::ActiveDirectoryResourceId,
                    "https://management.core.chinacloudapi.cn/",
                ),
            ],
        ),
    ]
});

/// All built-in public environments.
pub fn catalog() -> &'static [Environment] {
    &CATALOG
}

/// Looks up a built-in environment by its catalog name.
pub fn find(name: &str) -> Option<&'static Environment> {
    CATALOG.iter().find(|e| e.name() == name)
}
