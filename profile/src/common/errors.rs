use thiserror::Error;

/// Errors produced by the environment and account subsystem.
///
/// Endpoint resolution fails synchronously at read time; everything else
/// surfaces from the async collaborators (token authority, subscription
/// lookup) through the error slot of the returned `Result`. No retries are
/// performed at this layer and collaborator error text is forwarded
/// unchanged.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// An endpoint has neither an environment-variable value nor a stored value
    #[error("The endpoint field '{endpoint}' is not defined in the environment '{environment}'")]
    EndpointNotDefined {
        endpoint: &'static str,
        environment: String,
    },

    /// Credential exchange against the token authority failed
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// A management-API request returned a non-success status
    #[error("Management request failed: HTTP {status} - {message}")]
    Management { status: u16, message: String },

    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed environment or subscription payload
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid or incomplete configuration supplied by the caller
    #[error("Configuration error: {0}")]
    Configuration(String),
}
