//! Environment variable utilities for safe and validated access.
//!
//! Endpoint resolution treats a variable that is unset, empty, or
//! whitespace-only as absent, so all accessors here trim values and report
//! empty ones as missing rather than returning them.

use thiserror::Error;

/// Errors that can occur when accessing environment variables.
#[derive(Debug, Error)]
pub enum EnvVarError {
    /// Environment variable is not set
    #[error("Environment variable '{name}' not found")]
    NotFound { name: String },

    /// Environment variable contains invalid UTF-8 characters
    #[error("Environment variable '{name}' contains invalid UTF-8 characters")]
    InvalidUtf8 { name: String },

    /// Environment variable is set but contains only whitespace or is empty
    #[error("Environment variable '{name}' is empty")]
    Empty { name: String },
}

/// Utility functions for safe environment variable handling.
///
/// All methods trim whitespace and validate that values are not empty.
pub struct EnvUtils;

impl EnvUtils {
    /// Gets an environment variable with validation.
    ///
    /// Retrieves the variable, trims whitespace, and validates that the
    /// result is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`EnvVarError`] if the variable is not set, is empty after
    /// trimming, or contains invalid UTF-8.
    pub fn get_validated_var(name: &str) -> Result<String, EnvVarError> {
        match std::env::var(name) {
            Ok(value) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    Err(EnvVarError::Empty {
                        name: name.to_string(),
                    })
                } else {
                    Ok(trimmed.to_string())
                }
            }
            Err(std::env::VarError::NotPresent) => Err(EnvVarError::NotFound {
                name: name.to_string(),
            }),
            Err(std::env::VarError::NotUnicode(_)) => Err(EnvVarError::InvalidUtf8 {
                name: name.to_string(),
            }),
        }
    }

    /// Gets an optional environment variable.
    ///
    /// Returns `Some(value)` if the variable exists and is valid, `None` if
    /// it is missing, empty, or invalid.
    pub fn get_optional_var(name: &str) -> Option<String> {
        Self::get_validated_var(name).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_var_is_absent() {
        assert!(EnvUtils::get_optional_var("AZPROFILE_TEST_ENV_MISSING").is_none());
        assert!(matches!(
            EnvUtils::get_validated_var("AZPROFILE_TEST_ENV_MISSING"),
            Err(EnvVarError::NotFound { .. })
        ));
    }

    #[test]
    fn whitespace_only_var_is_absent() {
        unsafe {
            std::env::set_var("AZPROFILE_TEST_ENV_BLANK", "   ");
        }
        assert!(EnvUtils::get_optional_var("AZPROFILE_TEST_ENV_BLANK").is_none());
        assert!(matches!(
            EnvUtils::get_validated_var("AZPROFILE_TEST_ENV_BLANK"),
            Err(EnvVarError::Empty { .. })
        ));
    }

    #[test]
    fn set_var_is_trimmed() {
        unsafe {
            std::env::set_var("AZPROFILE_TEST_ENV_TRIM", "  value  ");
        }
        assert_eq!(
            EnvUtils::get_optional_var("AZPROFILE_TEST_ENV_TRIM").as_deref(),
            Some("value")
        );
    }
}
