//! High-level operations over the BigCommerce resources.
//!
//! Each service wraps one resource family and drives the shared fetch
//! engine: paginated collection with retry, page adjustment, and pacing.
//! The async services additionally fan out per-order sub-resource calls
//! in bounded batches and take a cancellation token; the [`blocking`]
//! twins work sequentially without a runtime.
//!
//! Services sharing one transport (and thus one resolved host) can be
//! built with `with_transport`:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use bigcommerce_access::clients::WebRequestService;
//! use bigcommerce_access::services::{OrdersService, ProductsService};
//! # use bigcommerce_access::{AccessToken, BigCommerceConfig, ClientId, Credentials, ShopName};
//!
//! # let config = BigCommerceConfig::builder()
//! #     .shop_name(ShopName::new("abc123").unwrap())
//! #     .credentials(Credentials::OAuth {
//! #         client_id: ClientId::new("client").unwrap(),
//! #         access_token: AccessToken::new("token").unwrap(),
//! #     })
//! #     .build()
//! #     .unwrap();
//! let transport = Arc::new(WebRequestService::new(config));
//! let orders = OrdersService::with_transport(Arc::clone(&transport));
//! let products = ProductsService::with_transport(transport);
//! ```

pub mod blocking;
mod categories;
mod orders;
mod products;

pub use categories::CategoriesService;
pub use orders::OrdersService;
pub use products::ProductsService;
