//! # BigCommerce Access
//!
//! A Rust client for the BigCommerce REST API, built around a
//! pagination-and-throttling-aware fetch engine: adaptive page sizing,
//! bounded retry with linear backoff, and server-driven pacing, for both
//! API generations (legacy key-authenticated and OAuth token-authenticated
//! stores).
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`BigCommerceConfig`] and its builder
//! - Validated newtypes for shop names and credentials, with masked
//!   `Debug` output for secrets
//! - A generation-agnostic fetch engine ([`engine`]): paginated
//!   collection, oversized-response page adjustment, bounded retry, and
//!   cooperative cancellation
//! - Rate-limit header parsing and pacing ([`throttling`])
//! - Async and blocking transports ([`clients`]) with legacy host
//!   resolution
//! - Resource services ([`services`]) for orders, products, and
//!   categories, with sync/async parity
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bigcommerce_access::{
//!     AccessToken, BigCommerceConfig, ClientId, Credentials, ShopName,
//! };
//! use bigcommerce_access::engine::CancellationToken;
//! use bigcommerce_access::services::ProductsService;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BigCommerceConfig::builder()
//!     .shop_name(ShopName::new("abc123")?)
//!     .credentials(Credentials::OAuth {
//!         client_id: ClientId::new("your-client-id")?,
//!         access_token: AccessToken::new("your-token")?,
//!     })
//!     .build()?;
//!
//! let service = ProductsService::new(config);
//! let products = service
//!     .get_products(true, &CancellationToken::none())
//!     .await?;
//! println!("{} products", products.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Legacy stores
//!
//! Key-authenticated stores answer on one of several domains; use the
//! probing constructor to resolve the right one before the first real
//! call:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use bigcommerce_access::{ApiKey, BigCommerceConfig, Credentials, ShopName, UserName};
//! use bigcommerce_access::clients::WebRequestService;
//! use bigcommerce_access::services::OrdersService;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BigCommerceConfig::builder()
//!     .shop_name(ShopName::new("my-store")?)
//!     .credentials(Credentials::Legacy {
//!         user_name: UserName::new("admin")?,
//!         api_key: ApiKey::new("key")?,
//!     })
//!     .build()?;
//!
//! let transport = Arc::new(WebRequestService::connect(config).await?);
//! let orders = OrdersService::with_transport(transport);
//! # Ok(())
//! # }
//! ```

pub mod clients;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod services;
pub mod throttling;

pub use config::{
    AccessToken, ApiKey, AuthMode, BigCommerceConfig, BigCommerceConfigBuilder, ClientId,
    Credentials, ShopName, UserName,
};
pub use error::ConfigError;

pub use clients::{ApiResponse, Command, TransportError, WebRequestService};
pub use engine::{CollectError, Marker, PageCollector, PagedResponse, RetryPolicy};
pub use throttling::{DelayScheduler, RateLimits, UnlimitedThresholds};
