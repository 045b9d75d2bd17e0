//! Configuration types for the BigCommerce client.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`BigCommerceConfig`]: The main configuration struct holding all client settings
//! - [`BigCommerceConfigBuilder`]: A builder for constructing [`BigCommerceConfig`] instances
//! - [`Credentials`]: Tagged credential variants for the two API generations
//! - [`ShopName`], [`UserName`], [`ApiKey`], [`ClientId`], [`AccessToken`]: Validated newtypes
//!
//! Besides credentials, the configuration carries the tunables of the
//! fetch/retry engine: page-size bounds, retry attempts and backoff, the
//! default pacing interval, the plan-tier unlimited-call thresholds, and
//! the ceiling for sub-resource fan-out. All of them have production
//! defaults; tests typically override the backoff to zero.
//!
//! # Example
//!
//! ```rust
//! use bigcommerce_access::{ApiKey, BigCommerceConfig, Credentials, ShopName, UserName};
//!
//! let config = BigCommerceConfig::builder()
//!     .shop_name(ShopName::new("my-store").unwrap())
//!     .credentials(Credentials::Legacy {
//!         user_name: UserName::new("admin").unwrap(),
//!         api_key: ApiKey::new("key").unwrap(),
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.default_page_size(), 250);
//! ```

mod credentials;
mod newtypes;

pub use credentials::{AuthMode, Credentials};
pub use newtypes::{AccessToken, ApiKey, ClientId, ShopName, UserName};

use crate::error::ConfigError;
use crate::throttling::UnlimitedThresholds;
use std::time::Duration;

/// Default page size requested from collection endpoints.
pub const DEFAULT_PAGE_SIZE: u32 = 250;

/// Smallest page size the adjuster may shrink to.
pub const DEFAULT_MIN_PAGE_SIZE: u32 = 50;

/// Default retry ceiling for a single logical call.
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 10;

/// Default pacing interval between paginated calls.
///
/// With a 20 000 calls/hour quota this grants at most 5 calls per second,
/// leaving roughly 2000 calls of hourly headroom for retries.
pub const DEFAULT_PACING: Duration = Duration::from_millis(200);

/// Default ceiling for concurrent sub-resource fetches.
pub const DEFAULT_FANOUT_LIMIT: usize = 5;

/// Configuration for the BigCommerce client.
///
/// # Thread Safety
///
/// `BigCommerceConfig` is `Clone`, `Send`, and `Sync`, making it safe to
/// share across threads and async tasks.
#[derive(Clone, Debug)]
pub struct BigCommerceConfig {
    shop_name: ShopName,
    credentials: Credentials,
    api_host: Option<String>,
    default_page_size: u32,
    min_page_size: u32,
    max_retry_attempts: u32,
    retry_base_delay: Duration,
    retry_delay_increment: Duration,
    default_pacing: Duration,
    thresholds: UnlimitedThresholds,
    fanout_limit: usize,
}

// Verify BigCommerceConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BigCommerceConfig>();
};

impl BigCommerceConfig {
    /// Creates a new builder for constructing a `BigCommerceConfig`.
    #[must_use]
    pub fn builder() -> BigCommerceConfigBuilder {
        BigCommerceConfigBuilder::new()
    }

    /// Returns the shop name.
    #[must_use]
    pub const fn shop_name(&self) -> &ShopName {
        &self.shop_name
    }

    /// Returns the credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the authentication scheme of the configured credentials.
    #[must_use]
    pub const fn auth_mode(&self) -> AuthMode {
        self.credentials.auth_mode()
    }

    /// Returns the explicit API host override, if configured.
    ///
    /// When set, the transport uses this host verbatim and skips host
    /// resolution. Intended for proxies and tests.
    #[must_use]
    pub fn api_host(&self) -> Option<&str> {
        self.api_host.as_deref()
    }

    /// Returns the store's native domain (`https://{shop}.mybigcommerce.com`).
    #[must_use]
    pub fn native_host(&self) -> String {
        format!("https://{}.mybigcommerce.com", self.shop_name)
    }

    /// Returns the store's custom domain (`https://www.{shop}.com`).
    ///
    /// Legacy stores sometimes answer API calls only on their custom
    /// domain; host resolution falls back to it when the native domain
    /// refuses the probe call.
    #[must_use]
    pub fn custom_host(&self) -> String {
        format!("https://www.{}.com", self.shop_name)
    }

    /// Returns the central API host for token-authenticated stores.
    #[must_use]
    pub fn oauth_host(&self) -> String {
        format!("https://api.bigcommerce.com/stores/{}", self.shop_name)
    }

    /// Returns the default page size for collection requests.
    #[must_use]
    pub const fn default_page_size(&self) -> u32 {
        self.default_page_size
    }

    /// Returns the floor below which pages are never shrunk.
    #[must_use]
    pub const fn min_page_size(&self) -> u32 {
        self.min_page_size
    }

    /// Returns the retry ceiling for a single logical call.
    #[must_use]
    pub const fn max_retry_attempts(&self) -> u32 {
        self.max_retry_attempts
    }

    /// Returns the base component of the retry backoff.
    #[must_use]
    pub const fn retry_base_delay(&self) -> Duration {
        self.retry_base_delay
    }

    /// Returns the per-attempt increment of the retry backoff.
    #[must_use]
    pub const fn retry_delay_increment(&self) -> Duration {
        self.retry_delay_increment
    }

    /// Returns the default pacing interval between paginated calls.
    #[must_use]
    pub const fn default_pacing(&self) -> Duration {
        self.default_pacing
    }

    /// Returns the plan-tier thresholds for the unlimited-calls check.
    #[must_use]
    pub const fn thresholds(&self) -> UnlimitedThresholds {
        self.thresholds
    }

    /// Returns the ceiling for concurrent sub-resource fetches.
    #[must_use]
    pub const fn fanout_limit(&self) -> usize {
        self.fanout_limit
    }
}

/// Builder for constructing [`BigCommerceConfig`] instances.
///
/// Required fields are `shop_name` and `credentials`. All other fields
/// default to the production constants at the top of this module.
#[derive(Debug, Default)]
pub struct BigCommerceConfigBuilder {
    shop_name: Option<ShopName>,
    credentials: Option<Credentials>,
    api_host: Option<String>,
    default_page_size: Option<u32>,
    min_page_size: Option<u32>,
    max_retry_attempts: Option<u32>,
    retry_base_delay: Option<Duration>,
    retry_delay_increment: Option<Duration>,
    default_pacing: Option<Duration>,
    thresholds: Option<UnlimitedThresholds>,
    fanout_limit: Option<usize>,
}

impl BigCommerceConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shop name (required).
    #[must_use]
    pub fn shop_name(mut self, name: ShopName) -> Self {
        self.shop_name = Some(name);
        self
    }

    /// Sets the credentials (required).
    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sets an explicit API host, bypassing host resolution.
    #[must_use]
    pub fn api_host(mut self, host: impl Into<String>) -> Self {
        self.api_host = Some(host.into());
        self
    }

    /// Sets the default page size for collection requests.
    #[must_use]
    pub const fn default_page_size(mut self, size: u32) -> Self {
        self.default_page_size = Some(size);
        self
    }

    /// Sets the floor below which pages are never shrunk.
    #[must_use]
    pub const fn min_page_size(mut self, size: u32) -> Self {
        self.min_page_size = Some(size);
        self
    }

    /// Sets the retry ceiling for a single logical call.
    #[must_use]
    pub const fn max_retry_attempts(mut self, attempts: u32) -> Self {
        self.max_retry_attempts = Some(attempts);
        self
    }

    /// Sets the base component of the retry backoff.
    #[must_use]
    pub const fn retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = Some(delay);
        self
    }

    /// Sets the per-attempt increment of the retry backoff.
    #[must_use]
    pub const fn retry_delay_increment(mut self, delay: Duration) -> Self {
        self.retry_delay_increment = Some(delay);
        self
    }

    /// Sets the default pacing interval between paginated calls.
    #[must_use]
    pub const fn default_pacing(mut self, pacing: Duration) -> Self {
        self.default_pacing = Some(pacing);
        self
    }

    /// Sets the plan-tier thresholds for the unlimited-calls check.
    #[must_use]
    pub const fn thresholds(mut self, thresholds: UnlimitedThresholds) -> Self {
        self.thresholds = Some(thresholds);
        self
    }

    /// Sets the ceiling for concurrent sub-resource fetches.
    #[must_use]
    pub const fn fanout_limit(mut self, limit: usize) -> Self {
        self.fanout_limit = Some(limit);
        self
    }

    /// Builds the [`BigCommerceConfig`], validating required fields and
    /// engine tunables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `shop_name` or
    /// `credentials` are not set, [`ConfigError::InvalidPageSizes`] if the
    /// page-size bounds are inconsistent, and
    /// [`ConfigError::InvalidRetryAttempts`] if the retry ceiling is zero.
    pub fn build(self) -> Result<BigCommerceConfig, ConfigError> {
        let shop_name = self.shop_name.ok_or(ConfigError::MissingRequiredField {
            field: "shop_name",
        })?;
        let credentials = self.credentials.ok_or(ConfigError::MissingRequiredField {
            field: "credentials",
        })?;

        let default_page_size = self.default_page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        let min_page_size = self.min_page_size.unwrap_or(DEFAULT_MIN_PAGE_SIZE);
        if default_page_size < min_page_size || min_page_size == 0 {
            return Err(ConfigError::InvalidPageSizes {
                default_size: default_page_size,
                min_size: min_page_size,
            });
        }

        let max_retry_attempts = self.max_retry_attempts.unwrap_or(DEFAULT_RETRY_ATTEMPTS);
        if max_retry_attempts == 0 {
            return Err(ConfigError::InvalidRetryAttempts {
                attempts: max_retry_attempts,
            });
        }

        Ok(BigCommerceConfig {
            shop_name,
            credentials,
            api_host: self.api_host,
            default_page_size,
            min_page_size,
            max_retry_attempts,
            retry_base_delay: self.retry_base_delay.unwrap_or(Duration::from_secs(5)),
            retry_delay_increment: self
                .retry_delay_increment
                .unwrap_or(Duration::from_secs(20)),
            default_pacing: self.default_pacing.unwrap_or(DEFAULT_PACING),
            thresholds: self.thresholds.unwrap_or_default(),
            fanout_limit: self.fanout_limit.unwrap_or(DEFAULT_FANOUT_LIMIT),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy_credentials() -> Credentials {
        Credentials::Legacy {
            user_name: UserName::new("admin").unwrap(),
            api_key: ApiKey::new("key").unwrap(),
        }
    }

    #[test]
    fn test_builder_requires_shop_name() {
        let result = BigCommerceConfigBuilder::new()
            .credentials(legacy_credentials())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "shop_name" })
        ));
    }

    #[test]
    fn test_builder_requires_credentials() {
        let result = BigCommerceConfigBuilder::new()
            .shop_name(ShopName::new("my-store").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "credentials"
            })
        ));
    }

    #[test]
    fn test_builder_provides_production_defaults() {
        let config = BigCommerceConfig::builder()
            .shop_name(ShopName::new("my-store").unwrap())
            .credentials(legacy_credentials())
            .build()
            .unwrap();

        assert_eq!(config.default_page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(config.min_page_size(), DEFAULT_MIN_PAGE_SIZE);
        assert_eq!(config.max_retry_attempts(), DEFAULT_RETRY_ATTEMPTS);
        assert_eq!(config.default_pacing(), DEFAULT_PACING);
        assert_eq!(config.fanout_limit(), DEFAULT_FANOUT_LIMIT);
        assert!(config.api_host().is_none());
    }

    #[test]
    fn test_builder_rejects_inconsistent_page_sizes() {
        let result = BigCommerceConfig::builder()
            .shop_name(ShopName::new("my-store").unwrap())
            .credentials(legacy_credentials())
            .default_page_size(10)
            .min_page_size(50)
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::InvalidPageSizes {
                default_size: 10,
                min_size: 50
            })
        ));
    }

    #[test]
    fn test_builder_rejects_zero_retry_attempts() {
        let result = BigCommerceConfig::builder()
            .shop_name(ShopName::new("my-store").unwrap())
            .credentials(legacy_credentials())
            .max_retry_attempts(0)
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::InvalidRetryAttempts { attempts: 0 })
        ));
    }

    #[test]
    fn test_host_construction() {
        let config = BigCommerceConfig::builder()
            .shop_name(ShopName::new("my-store").unwrap())
            .credentials(legacy_credentials())
            .build()
            .unwrap();

        assert_eq!(config.native_host(), "https://my-store.mybigcommerce.com");
        assert_eq!(config.custom_host(), "https://www.my-store.com");
        assert_eq!(
            config.oauth_host(),
            "https://api.bigcommerce.com/stores/my-store"
        );
    }

    #[test]
    fn test_api_host_override() {
        let config = BigCommerceConfig::builder()
            .shop_name(ShopName::new("my-store").unwrap())
            .credentials(legacy_credentials())
            .api_host("http://127.0.0.1:9999")
            .build()
            .unwrap();

        assert_eq!(config.api_host(), Some("http://127.0.0.1:9999"));
    }
}
