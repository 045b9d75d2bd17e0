//! Order payloads.

use serde::Deserialize;

/// A reference to a sub-resource collection, as embedded in order
/// payloads (`{ "url": ..., "resource": ... }`).
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ResourceLink {
    /// Absolute URL of the sub-resource collection.
    pub url: String,
    /// Resource path relative to the store.
    #[serde(default)]
    pub resource: String,
}

/// An order line item.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct OrderProduct {
    /// Line item id.
    pub id: i64,
    /// Product name at purchase time.
    #[serde(default)]
    pub name: String,
    /// Product SKU at purchase time.
    #[serde(default)]
    pub sku: String,
    /// Quantity ordered.
    #[serde(default)]
    pub quantity: i64,
    /// Unit price including tax, as a decimal string.
    #[serde(default)]
    pub price_inc_tax: String,
    /// Unit price excluding tax, as a decimal string.
    #[serde(default)]
    pub price_ex_tax: String,
    /// Base unit price, as a decimal string.
    #[serde(default)]
    pub base_price: String,
}

/// A shipping destination of an order.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ShippingAddress {
    /// First street line.
    #[serde(default)]
    pub street_1: String,
    /// Second street line.
    #[serde(default)]
    pub street_2: String,
    /// City.
    #[serde(default)]
    pub city: String,
    /// Postal code.
    #[serde(default)]
    pub zip: String,
    /// State or province.
    #[serde(default)]
    pub state: String,
    /// Country name.
    #[serde(default)]
    pub country: String,
    /// ISO 3166-1 alpha-2 country code.
    #[serde(default)]
    pub country_iso2: String,
    /// Chosen shipping method.
    #[serde(default)]
    pub shipping_method: String,
}

/// An order header.
///
/// The `products` and `shipping_addresses` fields arrive as reference
/// links; [`crate::services::OrdersService`] resolves them into the
/// `products`/`addresses` vectors after the order pages are collected.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Order {
    /// Order id.
    pub id: i64,
    /// Numeric order status.
    #[serde(default)]
    pub status_id: i64,
    /// Creation timestamp, as sent by the API.
    #[serde(default)]
    pub date_created: Option<String>,
    /// Shipping timestamp, when the order shipped.
    #[serde(default)]
    pub date_shipped: Option<String>,
    /// Order total including tax, as a decimal string.
    #[serde(default)]
    pub total_inc_tax: String,
    /// Currency of the totals.
    #[serde(default)]
    pub currency_code: String,
    /// Whether the order was deleted in the control panel.
    #[serde(default)]
    pub is_deleted: bool,
    /// Reference to the order's line items.
    #[serde(rename = "products", default)]
    pub products_link: Option<ResourceLink>,
    /// Reference to the order's shipping addresses.
    #[serde(rename = "shipping_addresses", default)]
    pub shipping_addresses_link: Option<ResourceLink>,
    /// Resolved line items.
    #[serde(skip)]
    pub products: Vec<OrderProduct>,
    /// Resolved shipping addresses.
    #[serde(skip)]
    pub addresses: Vec<ShippingAddress>,
}
