//! Payload models for the BigCommerce REST resources.
//!
//! Serialization glue only: these structs mirror the JSON shapes the API
//! returns and carry no behavior. Unknown fields are ignored so payload
//! growth on the BigCommerce side never breaks deserialization.

mod category;
mod order;
mod product;

pub use category::{Category, CategoryUrl};
pub use order::{Order, OrderProduct, ResourceLink, ShippingAddress};
pub use product::{
    Brand, InventoryTracking, Product, ProductImage, ProductUpdate, ProductVariant, Store,
};

use serde::Deserialize;

/// The `{ "data": [...] }` envelope wrapping token-authenticated (v3)
/// collection payloads.
#[derive(Clone, Debug, Deserialize)]
pub struct Envelope<T> {
    /// The page of records.
    pub data: Vec<T>,
}

/// A count payload, as returned by the `*/count` endpoints.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub struct ItemsCount {
    /// The total number of records behind the collection endpoint.
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_deserializes_data_array() {
        let envelope: Envelope<i64> = serde_json::from_str(r#"{"data":[1,2,3],"meta":{}}"#).unwrap();
        assert_eq!(envelope.data, vec![1, 2, 3]);
    }

    #[test]
    fn test_items_count_deserializes() {
        let count: ItemsCount = serde_json::from_str(r#"{"count":1200}"#).unwrap();
        assert_eq!(count.count, 1200);
    }
}
