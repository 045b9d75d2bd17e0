//! Error types for client configuration.
//!
//! This module contains the error type returned by configuration
//! constructors and validated newtypes.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use bigcommerce_access::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration types. Each variant provides a clear,
/// actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Shop name is invalid.
    #[error("Invalid shop name '{name}'. Expected a non-empty name of letters, digits and dashes.")]
    InvalidShopName {
        /// The invalid name that was provided.
        name: String,
    },

    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid BigCommerce API key.")]
    EmptyApiKey,

    /// API user name cannot be empty.
    #[error("API user name cannot be empty. Please provide a valid BigCommerce API user name.")]
    EmptyUserName,

    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Please provide a valid BigCommerce access token.")]
    EmptyAccessToken,

    /// Client id cannot be empty.
    #[error("Client id cannot be empty. Please provide a valid BigCommerce client id.")]
    EmptyClientId,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Page size bounds are inconsistent.
    #[error("Invalid page sizes: default {default_size} must be >= minimum {min_size}, and both must be >= 1.")]
    InvalidPageSizes {
        /// The configured default page size.
        default_size: u32,
        /// The configured minimum page size.
        min_size: u32,
    },

    /// Retry attempts must be at least 1.
    #[error("Invalid retry attempts: {attempts}. At least one attempt is required.")]
    InvalidRetryAttempts {
        /// The configured attempt count.
        attempts: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_shop_name_error_message() {
        let error = ConfigError::InvalidShopName {
            name: "bad name!".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("bad name!"));
        assert!(message.contains("non-empty"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField {
            field: "credentials",
        };
        let message = error.to_string();
        assert!(message.contains("credentials"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_invalid_page_sizes_error_message() {
        let error = ConfigError::InvalidPageSizes {
            default_size: 10,
            min_size: 50,
        };
        let message = error.to_string();
        assert!(message.contains("10"));
        assert!(message.contains("50"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyApiKey;
        let _: &dyn std::error::Error = &error;
    }
}
