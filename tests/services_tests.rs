//! End-to-end service tests over a local mock server.
//!
//! These exercise the full stack: paginated collection, retry, pacing,
//! envelope handling for both API generations, sub-resource resolution,
//! and inventory updates.

use std::time::Duration;

use bigcommerce_access::engine::{CancellationSource, CancellationToken, CollectError};
use bigcommerce_access::services::{CategoriesService, OrdersService, ProductsService};
use bigcommerce_access::{
    AccessToken, ApiKey, BigCommerceConfig, ClientId, Credentials, ShopName, UserName,
};
use bigcommerce_access::models::ProductUpdate;
use chrono::{TimeZone, Utc};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A config tuned for tests: tiny pages, no pacing, no backoff.
fn oauth_config(api_host: &str) -> BigCommerceConfig {
    BigCommerceConfig::builder()
        .shop_name(ShopName::new("abc123").unwrap())
        .credentials(Credentials::OAuth {
            client_id: ClientId::new("test-client").unwrap(),
            access_token: AccessToken::new("test-token").unwrap(),
        })
        .api_host(api_host)
        .default_page_size(2)
        .min_page_size(1)
        .max_retry_attempts(2)
        .retry_base_delay(Duration::ZERO)
        .retry_delay_increment(Duration::ZERO)
        .default_pacing(Duration::ZERO)
        .build()
        .unwrap()
}

fn legacy_config(api_host: &str) -> BigCommerceConfig {
    BigCommerceConfig::builder()
        .shop_name(ShopName::new("test-store").unwrap())
        .credentials(Credentials::Legacy {
            user_name: UserName::new("admin").unwrap(),
            api_key: ApiKey::new("key").unwrap(),
        })
        .api_host(api_host)
        .default_page_size(2)
        .min_page_size(1)
        .max_retry_attempts(2)
        .retry_base_delay(Duration::ZERO)
        .retry_delay_increment(Duration::ZERO)
        .default_pacing(Duration::ZERO)
        .build()
        .unwrap()
}

fn order_json(id: i64, server_uri: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "status_id": 2,
        "total_inc_tax": "10.00",
        "currency_code": "USD",
        "products": {
            "url": format!("{server_uri}/v2/orders/{id}/products"),
            "resource": format!("/orders/{id}/products")
        },
        "shipping_addresses": {
            "url": format!("{server_uri}/v2/orders/{id}/shippingaddresses"),
            "resource": format!("/orders/{id}/shippingaddresses")
        }
    })
}

async fn mount_order_sub_resources(server: &MockServer, id: i64) {
    Mock::given(method("GET"))
        .and(path(format!("/v2/orders/{id}/products")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": id * 10, "name": "Mug", "sku": "MUG-1", "quantity": 2,
             "price_inc_tax": "5.00", "price_ex_tax": "4.50", "base_price": "4.50"}
        ])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/v2/orders/{id}/shippingaddresses")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"street_1": "1 Main St", "city": "Austin", "zip": "78701",
             "country": "United States", "country_iso2": "US"}
        ])))
        .mount(server)
        .await;
}

// ============================================================================
// Orders
// ============================================================================

#[tokio::test]
async fn test_orders_are_paginated_and_sub_resources_resolved() {
    let server = MockServer::start().await;
    let uri = server.uri();

    // Page 1 fills the window, page 2 is short and ends the collection.
    Mock::given(method("GET"))
        .and(path("/v2/orders"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            order_json(1, &uri),
            order_json(2, &uri)
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/orders"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([order_json(3, &uri)])),
        )
        .expect(1)
        .mount(&server)
        .await;
    for id in 1..=3 {
        mount_order_sub_resources(&server, id).await;
    }

    let service = OrdersService::new(oauth_config(&uri));
    let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let to = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();

    let orders = service
        .get_orders(from, to, &CancellationToken::none())
        .await
        .unwrap();

    assert_eq!(orders.len(), 3);
    for order in &orders {
        assert_eq!(order.products.len(), 1);
        assert_eq!(order.products[0].sku, "MUG-1");
        assert_eq!(order.addresses.len(), 1);
        assert_eq!(order.addresses[0].country_iso2, "US");
    }
}

#[tokio::test]
async fn test_orders_date_filter_reaches_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/orders"))
        .and(query_param("min_date_created", "2024-01-01T00:00:00Z"))
        .and(query_param("max_date_modified", "2024-01-31T00:00:00Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let service = OrdersService::new(oauth_config(&server.uri()));
    let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let to = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();

    let orders = service
        .get_orders(from, to, &CancellationToken::none())
        .await
        .unwrap();
    assert!(orders.is_empty());
}

#[tokio::test]
async fn test_cancelled_token_short_circuits_before_any_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let source = CancellationSource::new();
    source.cancel();

    let service = OrdersService::new(oauth_config(&server.uri()));
    let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let to = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();

    let result = service.get_orders(from, to, &source.token()).await;
    assert!(matches!(result, Err(CollectError::Cancelled)));
}

// ============================================================================
// Products
// ============================================================================

#[tokio::test]
async fn test_products_use_v3_envelope_and_include_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/catalog/products"))
        .and(query_param("include", "variants,images"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                {"id": 1, "name": "Mug", "sku": "MUG-1",
                 "variants": [{"id": 10, "product_id": 1, "sku": "MUG-1-RED", "inventory_level": 4}]},
                {"id": 2, "name": "Cap", "sku": "CAP-1"}
            ],
            "meta": {}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/catalog/products"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{"id": 3, "name": "Pin", "sku": "PIN-1"}],
            "meta": {}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = ProductsService::new(oauth_config(&server.uri()));
    let products = service
        .get_products(false, &CancellationToken::none())
        .await
        .unwrap();

    assert_eq!(products.len(), 3);
    assert_eq!(products[0].variants.len(), 1);
    assert!(products[0].weight_unit.is_none());
}

#[tokio::test]
async fn test_extended_info_fills_weight_unit_and_brand_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/catalog/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{"id": 1, "name": "Mug", "sku": "MUG-1", "brand_id": 7}],
            "meta": {}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/store"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "Test Store", "domain": "test.example", "weight_units": "KGS"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/catalog/brands"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{"id": 7, "name": "Acme"}],
            "meta": {}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = ProductsService::new(oauth_config(&server.uri()));
    let products = service
        .get_products(true, &CancellationToken::none())
        .await
        .unwrap();

    assert_eq!(products[0].weight_unit.as_deref(), Some("KGS"));
    assert_eq!(products[0].brand_name.as_deref(), Some("Acme"));
}

#[tokio::test]
async fn test_update_products_puts_inventory_per_target() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v3/catalog/products/77"))
        .and(body_json(serde_json::json!({"inventory_level": 5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": {}})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v3/catalog/products/77/variants/770"))
        .and(body_json(serde_json::json!({"inventory_level": 9})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let service = ProductsService::new(oauth_config(&server.uri()));
    let updates = [
        ProductUpdate::product(77, 5),
        ProductUpdate::variant(77, 770, 9),
    ];

    service
        .update_products(&updates, &CancellationToken::none())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_transient_server_error_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/catalog/products"))
        .respond_with(ResponseTemplate::new(500).set_body_string("hiccup"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/catalog/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{"id": 1, "name": "Mug", "sku": "MUG-1"}],
            "meta": {}
        })))
        .mount(&server)
        .await;

    let service = ProductsService::new(oauth_config(&server.uri()));
    let products = service
        .get_products(false, &CancellationToken::none())
        .await
        .unwrap();

    assert_eq!(products.len(), 1);
}

#[tokio::test]
async fn test_persistent_failure_exhausts_and_aborts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/catalog/products"))
        .respond_with(ResponseTemplate::new(500).set_body_string("down"))
        .mount(&server)
        .await;

    let service = ProductsService::new(oauth_config(&server.uri()));
    let result = service
        .get_products(false, &CancellationToken::none())
        .await;

    match result {
        Err(CollectError::RetriesExhausted {
            attempts, source, ..
        }) => {
            assert_eq!(attempts, 2);
            assert!(source.to_string().contains("500"));
        }
        other => panic!("expected exhaustion, got {other:?}"),
    }
}

// ============================================================================
// Categories
// ============================================================================

#[tokio::test]
async fn test_categories_legacy_plain_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/categories.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 18, "name": "Garden", "is_visible": true}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let service = CategoriesService::new(legacy_config(&server.uri()));
    let categories = service
        .get_categories(&CancellationToken::none())
        .await
        .unwrap();

    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "Garden");
    assert!(categories[0].is_visible);
}

#[tokio::test]
async fn test_categories_oauth_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/catalog/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                {"id": 18, "name": "Garden", "is_visible": true},
                {"id": 19, "name": "Kitchen", "is_visible": false}
            ],
            "meta": {}
        })))
        .mount(&server)
        .await;

    let service = CategoriesService::new(oauth_config(&server.uri()));
    let categories = service
        .get_categories(&CancellationToken::none())
        .await
        .unwrap();

    assert_eq!(categories.len(), 2);
    assert!(!categories[1].is_visible);
}
