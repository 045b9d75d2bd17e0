//! Command paths and query-string builders.
//!
//! The two API generations expose the same resources behind different
//! path layouts: basic-auth stores serve `/api/v2/*.json` on the store's
//! own domain, token-auth stores serve `/v2/*` and `/v3/catalog/*` on the
//! central API host. [`Command::path`] owns that mapping so nothing above
//! the transport ever branches on generation.

use crate::config::AuthMode;
use crate::engine::PageInfo;
use chrono::{DateTime, SecondsFormat, Utc};

/// A logical API operation, resolvable to a concrete path per
/// authentication scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// List orders.
    GetOrders,
    /// Count orders. Also the host-resolution probe call.
    GetOrdersCount,
    /// List catalog products.
    GetProducts,
    /// List catalog categories.
    GetCategories,
    /// List catalog brands.
    GetBrands,
    /// Fetch store settings.
    GetStore,
    /// Update one product's (or variant's) inventory.
    UpdateProduct,
}

impl Command {
    /// The resource path for this command under the given scheme.
    #[must_use]
    pub const fn path(self, mode: AuthMode) -> &'static str {
        match mode {
            AuthMode::Legacy => match self {
                Self::GetOrders => "/api/v2/orders.json",
                Self::GetOrdersCount => "/api/v2/orders/count.json",
                Self::GetProducts => "/api/v2/products.json",
                Self::GetCategories => "/api/v2/categories.json",
                Self::GetBrands => "/api/v2/brands.json",
                Self::GetStore => "/api/v2/store.json",
                Self::UpdateProduct => "/api/v2/products",
            },
            AuthMode::OAuth => match self {
                Self::GetOrders => "/v2/orders",
                Self::GetOrdersCount => "/v2/orders/count",
                Self::GetProducts => "/v3/catalog/products",
                Self::GetCategories => "/v3/catalog/categories",
                Self::GetBrands => "/v3/catalog/brands",
                Self::GetStore => "/v2/store",
                Self::UpdateProduct => "/v3/catalog/products",
            },
        }
    }

    /// Whether responses to this command arrive inside the v3
    /// `{ "data": [...] }` envelope under the given scheme.
    #[must_use]
    pub const fn enveloped(self, mode: AuthMode) -> bool {
        matches!(mode, AuthMode::OAuth)
            && matches!(self, Self::GetProducts | Self::GetCategories | Self::GetBrands)
    }
}

/// Pagination query string: `?limit={size}&page={index}`.
#[must_use]
pub fn page_params(page: PageInfo) -> String {
    format!("?limit={}&page={}", page.size, page.index)
}

/// Date-range filter for order listings, on both the created and
/// modified timestamps. Timestamps are RFC 3339 UTC, percent-encoded.
#[must_use]
pub fn orders_date_params(from: DateTime<Utc>, to: DateTime<Utc>) -> String {
    let from = urlencoding::encode(&from.to_rfc3339_opts(SecondsFormat::Secs, true)).into_owned();
    let to = urlencoding::encode(&to.to_rfc3339_opts(SecondsFormat::Secs, true)).into_owned();
    format!(
        "?min_date_created={from}&max_date_created={to}&min_date_modified={from}&max_date_modified={to}"
    )
}

/// Inline include for product listings, so variants and images arrive
/// with the product page instead of needing per-product calls.
pub const PRODUCTS_INCLUDE_PARAMS: &str = "?include=variants,images";

/// Merges two query strings, each of which may start with `?` or be empty.
#[must_use]
pub fn concat_params(base: &str, extra: &str) -> String {
    let base = base.trim_start_matches('?');
    let extra = extra.trim_start_matches('?');
    match (base.is_empty(), extra.is_empty()) {
        (true, true) => String::new(),
        (false, true) => format!("?{base}"),
        (true, false) => format!("?{extra}"),
        (false, false) => format!("?{base}&{extra}"),
    }
}

/// Path suffix addressing one product for an inventory update.
#[must_use]
pub fn product_update_endpoint(product_id: i64, mode: AuthMode) -> String {
    match mode {
        AuthMode::Legacy => format!("/{product_id}.json"),
        AuthMode::OAuth => format!("/{product_id}"),
    }
}

/// Path suffix addressing one variant for an inventory update.
#[must_use]
pub fn variant_update_endpoint(product_id: i64, variant_id: i64) -> String {
    format!("/{product_id}/variants/{variant_id}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_paths_differ_per_generation() {
        assert_eq!(
            Command::GetOrders.path(AuthMode::Legacy),
            "/api/v2/orders.json"
        );
        assert_eq!(Command::GetOrders.path(AuthMode::OAuth), "/v2/orders");
        assert_eq!(
            Command::GetProducts.path(AuthMode::OAuth),
            "/v3/catalog/products"
        );
        assert_eq!(
            Command::GetCategories.path(AuthMode::OAuth),
            "/v3/catalog/categories"
        );
    }

    #[test]
    fn test_only_oauth_catalog_commands_are_enveloped() {
        assert!(Command::GetProducts.enveloped(AuthMode::OAuth));
        assert!(Command::GetCategories.enveloped(AuthMode::OAuth));
        assert!(Command::GetBrands.enveloped(AuthMode::OAuth));
        assert!(!Command::GetOrders.enveloped(AuthMode::OAuth));
        assert!(!Command::GetProducts.enveloped(AuthMode::Legacy));
        assert!(!Command::GetStore.enveloped(AuthMode::OAuth));
    }

    #[test]
    fn test_page_params() {
        assert_eq!(page_params(PageInfo::new(3, 125)), "?limit=125&page=3");
    }

    #[test]
    fn test_orders_date_params_are_percent_encoded() {
        let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap();
        let params = orders_date_params(from, to);

        assert!(params.starts_with("?min_date_created=2024-01-01T00%3A00%3A00Z"));
        assert!(params.contains("&max_date_created=2024-01-31T23%3A59%3A59Z"));
        assert!(params.contains("&min_date_modified=2024-01-01T00%3A00%3A00Z"));
        assert!(params.ends_with("&max_date_modified=2024-01-31T23%3A59%3A59Z"));
    }

    #[test]
    fn test_concat_params() {
        assert_eq!(
            concat_params("?include=variants,images", "?limit=250&page=1"),
            "?include=variants,images&limit=250&page=1"
        );
        assert_eq!(concat_params("", "?limit=250"), "?limit=250");
        assert_eq!(concat_params("?a=1", ""), "?a=1");
        assert_eq!(concat_params("", ""), "");
    }

    #[test]
    fn test_update_endpoints() {
        assert_eq!(product_update_endpoint(77, AuthMode::Legacy), "/77.json");
        assert_eq!(product_update_endpoint(77, AuthMode::OAuth), "/77");
        assert_eq!(variant_update_endpoint(77, 770), "/77/variants/770");
    }
}
