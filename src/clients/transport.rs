//! Async transport over reqwest.

use crate::clients::endpoint::Command;
use crate::clients::errors::TransportError;
use crate::clients::{classify_body_error, parse_limits, ApiResponse};
use crate::config::{AuthMode, BigCommerceConfig, Credentials};
use crate::engine::Marker;
use crate::models::ItemsCount;
use crate::throttling::RateLimits;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Requests against a large store can legitimately stream for minutes.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Authenticated async HTTP access to one store.
///
/// The service resolves the API host once at construction and then maps
/// [`Command`] values to concrete URLs per the configured authentication
/// scheme. Every response's rate-limit headers are parsed into a
/// [`RateLimits`] snapshot for the caller's pacing decisions.
///
/// # Thread Safety
///
/// `WebRequestService` is `Send + Sync`, making it safe to share across
/// async tasks.
#[derive(Debug)]
pub struct WebRequestService {
    client: reqwest::Client,
    config: BigCommerceConfig,
    host: String,
}

// Verify WebRequestService is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<WebRequestService>();
};

impl WebRequestService {
    /// Creates a service without probing the network.
    ///
    /// The host is the configured override when present, otherwise the
    /// scheme's default: the central API host for token credentials, the
    /// store's native domain for legacy ones. Legacy stores that only
    /// answer on their custom domain need [`WebRequestService::connect`].
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This
    /// should only happen in extremely unusual circumstances (e.g., TLS
    /// initialization failure).
    #[must_use]
    pub fn new(config: BigCommerceConfig) -> Self {
        let host = config.api_host().map_or_else(
            || match config.auth_mode() {
                AuthMode::Legacy => config.native_host(),
                AuthMode::OAuth => config.oauth_host(),
            },
            ToString::to_string,
        );

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            config,
            host,
        }
    }

    /// Creates a service, resolving the host for legacy credentials.
    ///
    /// Legacy stores answer API calls on their native domain, their
    /// custom `www.` domain, or the custom domain without the `www.`
    /// prefix, depending on how the store is set up. Each candidate is
    /// probed with the orders-count call until one answers. Token
    /// credentials and explicit host overrides skip the probe.
    ///
    /// # Errors
    ///
    /// Returns the last probe's [`TransportError`] when no candidate host
    /// answers.
    pub async fn connect(config: BigCommerceConfig) -> Result<Self, TransportError> {
        let mut service = Self::new(config);
        if service.config.api_host().is_some() || service.config.auth_mode() == AuthMode::OAuth {
            return Ok(service);
        }

        let marker = Marker::new();
        let candidates = [
            service.config.native_host(),
            service.config.custom_host(),
            service.config.custom_host().replace("www.", ""),
        ];
        let last = candidates.len() - 1;

        for (position, candidate) in candidates.into_iter().enumerate() {
            service.host = candidate;
            match service.probe(&marker).await {
                Ok(()) => return Ok(service),
                Err(err) if position == last => return Err(err),
                Err(err) => {
                    tracing::debug!(
                        marker = %marker,
                        host = %service.host,
                        error = %err,
                        category = "host-resolution",
                        "host did not answer the probe call; trying the next candidate"
                    );
                }
            }
        }
        unreachable!("the last candidate either returns or propagates its error")
    }

    async fn probe(&self, marker: &Marker) -> Result<(), TransportError> {
        self.get::<ItemsCount>(Command::GetOrdersCount, "", marker)
            .await
            .map(|_| ())
    }

    /// The resolved API host this service calls.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The configuration this service was built from.
    #[must_use]
    pub const fn config(&self) -> &BigCommerceConfig {
        &self.config
    }

    /// The concrete URL a command resolves to, before query parameters.
    #[must_use]
    pub fn url_for(&self, command: Command) -> String {
        format!("{}{}", self.host, command.path(self.config.auth_mode()))
    }

    /// Resolves a sub-resource link, which the API sends either absolute
    /// or relative to the store host.
    #[must_use]
    pub fn resolve_url(&self, link: &str) -> String {
        if link.starts_with("http://") || link.starts_with("https://") {
            link.to_string()
        } else {
            format!("{}{}", self.host, link)
        }
    }

    /// Performs a GET for a command, with pre-built query parameters.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] describing the failed attempt.
    pub async fn get<T: DeserializeOwned>(
        &self,
        command: Command,
        params: &str,
        marker: &Marker,
    ) -> Result<ApiResponse<T>, TransportError> {
        let url = format!("{}{params}", self.url_for(command));
        self.get_url(&url, marker).await
    }

    /// Performs a GET against a fully resolved URL.
    ///
    /// Used for the sub-resource reference links embedded in order
    /// payloads, which already carry their own URL.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] describing the failed attempt.
    pub async fn get_url<T: DeserializeOwned>(
        &self,
        url: &str,
        marker: &Marker,
    ) -> Result<ApiResponse<T>, TransportError> {
        tracing::debug!(marker = %marker, url, category = "request", "GET");

        let response = self
            .apply_auth(self.client.get(url))
            .send()
            .await
            .map_err(|source| TransportError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        let limits = parse_limits(response.headers());
        let text = response
            .text()
            .await
            .map_err(|source| classify_body_error(url, source))?;

        tracing::debug!(
            marker = %marker,
            url,
            status = status.as_u16(),
            calls_remaining = limits.calls_remaining(),
            requests_left = limits.requests_left(),
            category = "response",
            "GET completed"
        );

        if !status.is_success() {
            return Err(TransportError::Response {
                url: url.to_string(),
                code: status.as_u16(),
                message: text,
            });
        }
        if text.trim().is_empty() || text.trim() == "null" {
            return Ok(ApiResponse { body: None, limits });
        }

        let body = serde_json::from_str(&text).map_err(|source| TransportError::Decode {
            url: url.to_string(),
            source,
        })?;
        Ok(ApiResponse {
            body: Some(body),
            limits,
        })
    }

    /// Performs a PUT for a command plus an endpoint suffix, returning
    /// the response's rate-limit snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] describing the failed attempt.
    pub async fn put<B: Serialize + ?Sized>(
        &self,
        command: Command,
        endpoint: &str,
        body: &B,
        marker: &Marker,
    ) -> Result<RateLimits, TransportError> {
        let url = format!("{}{endpoint}", self.url_for(command));
        tracing::debug!(marker = %marker, url = %url, category = "request", "PUT");

        let response = self
            .apply_auth(self.client.put(&url))
            .json(body)
            .send()
            .await
            .map_err(|source| TransportError::Network {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let limits = parse_limits(response.headers());
        let text = response
            .text()
            .await
            .map_err(|source| classify_body_error(&url, source))?;

        tracing::debug!(
            marker = %marker,
            url = %url,
            status = status.as_u16(),
            calls_remaining = limits.calls_remaining(),
            requests_left = limits.requests_left(),
            category = "response",
            "PUT completed"
        );

        if !status.is_success() {
            return Err(TransportError::Response {
                url,
                code: status.as_u16(),
                message: text,
            });
        }
        Ok(limits)
    }

    fn apply_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let builder = builder.header("Accept", "application/json");
        match self.config.credentials() {
            Credentials::Legacy { user_name, api_key } => {
                let pair = format!("{}:{}", user_name.as_ref(), api_key.as_ref());
                builder.header("Authorization", format!("Basic {}", BASE64.encode(pair)))
            }
            Credentials::OAuth {
                client_id,
                access_token,
            } => builder
                .header("X-Auth-Client", client_id.as_ref())
                .header("X-Auth-Token", access_token.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccessToken, ApiKey, ClientId, ShopName, UserName};

    fn legacy_config() -> BigCommerceConfig {
        BigCommerceConfig::builder()
            .shop_name(ShopName::new("my-store").unwrap())
            .credentials(Credentials::Legacy {
                user_name: UserName::new("admin").unwrap(),
                api_key: ApiKey::new("key").unwrap(),
            })
            .build()
            .unwrap()
    }

    fn oauth_config() -> BigCommerceConfig {
        BigCommerceConfig::builder()
            .shop_name(ShopName::new("abc123").unwrap())
            .credentials(Credentials::OAuth {
                client_id: ClientId::new("client").unwrap(),
                access_token: AccessToken::new("token").unwrap(),
            })
            .build()
            .unwrap()
    }

    #[test]
    fn test_legacy_service_defaults_to_native_host() {
        let service = WebRequestService::new(legacy_config());
        assert_eq!(service.host(), "https://my-store.mybigcommerce.com");
        assert_eq!(
            service.url_for(Command::GetOrders),
            "https://my-store.mybigcommerce.com/api/v2/orders.json"
        );
    }

    #[test]
    fn test_oauth_service_uses_central_host() {
        let service = WebRequestService::new(oauth_config());
        assert_eq!(service.host(), "https://api.bigcommerce.com/stores/abc123");
        assert_eq!(
            service.url_for(Command::GetProducts),
            "https://api.bigcommerce.com/stores/abc123/v3/catalog/products"
        );
    }

    #[test]
    fn test_resolve_url_passes_absolute_links_through() {
        let service = WebRequestService::new(legacy_config());
        assert_eq!(
            service.resolve_url("https://elsewhere.example/x"),
            "https://elsewhere.example/x"
        );
        assert_eq!(
            service.resolve_url("/api/v2/orders/1/products.json"),
            "https://my-store.mybigcommerce.com/api/v2/orders/1/products.json"
        );
    }
}
