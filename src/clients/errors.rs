//! Transport-level error types.
//!
//! A single call attempt fails with exactly one [`TransportError`] variant.
//! The taxonomy matters to the fetch engine: only
//! [`TransportError::OversizedResponse`] makes the page adjuster shrink the
//! in-flight page, every other variant goes through the generic retry
//! path untouched.

use thiserror::Error;

/// Error from a single transport attempt.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server truncated or closed the connection while the response
    /// body was being read — the signature of a page too large for the
    /// server to serialize.
    #[error("response from '{url}' was cut short before the body could be read")]
    OversizedResponse {
        /// The URL of the failed request.
        url: String,
    },

    /// The server answered with a non-2xx status and a readable body.
    #[error("request to '{url}' returned status {code}: {message}")]
    Response {
        /// The URL of the failed request.
        url: String,
        /// The HTTP status code.
        code: u16,
        /// The response body, as received.
        message: String,
    },

    /// The request could not be sent or no response arrived.
    #[error("network error calling '{url}'")]
    Network {
        /// The URL of the failed request.
        url: String,
        /// The underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// The response body arrived but could not be decoded.
    #[error("failed to decode response from '{url}'")]
    Decode {
        /// The URL of the failed request.
        url: String,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },
}

impl TransportError {
    /// Whether this failure carries the oversized-response signature.
    #[must_use]
    pub const fn is_oversized_response(&self) -> bool {
        matches!(self, Self::OversizedResponse { .. })
    }

    /// The URL of the failed request.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::OversizedResponse { url }
            | Self::Response { url, .. }
            | Self::Network { url, .. }
            | Self::Decode { url, .. } => url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_oversized_variant_is_classified_as_oversized() {
        let oversized = TransportError::OversizedResponse {
            url: "https://example.com/a".to_string(),
        };
        assert!(oversized.is_oversized_response());

        let response = TransportError::Response {
            url: "https://example.com/a".to_string(),
            code: 401,
            message: "unauthorized".to_string(),
        };
        assert!(!response.is_oversized_response());

        let decode = TransportError::Decode {
            url: "https://example.com/a".to_string(),
            source: serde_json::from_str::<u32>("not json").unwrap_err(),
        };
        assert!(!decode.is_oversized_response());
    }

    #[test]
    fn test_url_is_preserved_across_variants() {
        let err = TransportError::Response {
            url: "https://example.com/orders".to_string(),
            code: 404,
            message: "missing".to_string(),
        };
        assert_eq!(err.url(), "https://example.com/orders");
    }

    #[test]
    fn test_error_messages_name_the_url() {
        let err = TransportError::OversizedResponse {
            url: "https://example.com/products".to_string(),
        };
        assert!(err.to_string().contains("https://example.com/products"));
    }
}
