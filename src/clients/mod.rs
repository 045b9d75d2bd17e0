//! HTTP transport for the BigCommerce API.
//!
//! This module provides [`WebRequestService`] (async) and its
//! [`blocking`] twin for making authenticated calls against either API
//! generation. The transport owns everything generation-specific: auth
//! headers, host resolution, command paths, and rate-limit header
//! parsing. Everything above it works with [`ApiResponse`] values and
//! the [`TransportError`] taxonomy.

pub mod blocking;
mod endpoint;
mod errors;
mod transport;

pub use endpoint::{
    concat_params, orders_date_params, page_params, product_update_endpoint,
    variant_update_endpoint, Command, PRODUCTS_INCLUDE_PARAMS,
};
pub use errors::TransportError;
pub use transport::WebRequestService;

use crate::engine::PagedResponse;
use crate::throttling::{RateLimits, UNKNOWN};
use reqwest::header::HeaderMap;

/// Legacy count-based quota header.
pub(crate) const HEADER_CALLS_REMAINING: &str = "X-BC-ApiLimit-Remaining";
/// Window-based quota header: requests left in the window.
pub(crate) const HEADER_REQUESTS_LEFT: &str = "X-Rate-Limit-Requests-Left";
/// Window-based quota header: milliseconds until the window resets.
pub(crate) const HEADER_TIME_RESET_MS: &str = "X-Rate-Limit-Time-Reset-Ms";

/// One decoded response: the payload (when the server sent one) plus the
/// rate-limit snapshot taken from the response headers.
#[derive(Clone, Debug)]
pub struct ApiResponse<T> {
    /// The decoded payload, or `None` for an empty body.
    pub body: Option<T>,
    /// Quota state reported alongside this response.
    pub limits: RateLimits,
}

impl<T> ApiResponse<T> {
    /// Maps the payload, keeping the rate-limit snapshot.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            body: self.body.map(f),
            limits: self.limits,
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Converts a collection response into the engine's per-page value.
    #[must_use]
    pub fn into_page(self) -> PagedResponse<T> {
        PagedResponse {
            items: self.body,
            limits: self.limits,
        }
    }
}

fn header_i64(headers: &HeaderMap, name: &str) -> i64 {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(UNKNOWN)
}

/// Reads the quota headers of either generation into a snapshot.
/// Absent or malformed headers become [`UNKNOWN`] fields.
pub(crate) fn parse_limits(headers: &HeaderMap) -> RateLimits {
    RateLimits::new(
        header_i64(headers, HEADER_CALLS_REMAINING),
        header_i64(headers, HEADER_REQUESTS_LEFT),
        header_i64(headers, HEADER_TIME_RESET_MS),
    )
}

/// Classifies a failure while reading the response body.
///
/// A connection cut mid-body is the signature of a page the server
/// refused to serialize, which the page adjuster reacts to; a timeout is
/// ordinary network trouble.
pub(crate) fn classify_body_error(url: &str, source: reqwest::Error) -> TransportError {
    if source.is_timeout() {
        TransportError::Network {
            url: url.to_string(),
            source,
        }
    } else {
        TransportError::OversizedResponse {
            url: url.to_string(),
        }
    }
}
