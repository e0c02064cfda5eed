pub mod authority;
pub mod types;

pub use authority::{AadTokenAuthority, TokenAuthority};
pub use types::{AccessToken, AuthConfig, CLI_CLIENT_ID, TenantCredential};
