//! Catalog payloads.

use serde::{Deserialize, Serialize};

/// How inventory is tracked for a product.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InventoryTracking {
    /// Inventory is not tracked.
    #[default]
    None,
    /// Tracked on the product itself.
    Product,
    /// Tracked per variant.
    Variant,
    /// Any tracking mode this crate does not model.
    #[serde(other)]
    Other,
}

/// A product image.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProductImage {
    /// URL of the standard-size rendition.
    #[serde(default)]
    pub url_standard: String,
}

/// A product variant.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProductVariant {
    /// Variant id.
    pub id: i64,
    /// Owning product id.
    #[serde(default)]
    pub product_id: i64,
    /// Variant SKU.
    #[serde(default)]
    pub sku: String,
    /// Variant UPC.
    #[serde(default)]
    pub upc: Option<String>,
    /// Variant price override.
    #[serde(default)]
    pub price: Option<f64>,
    /// Variant cost price.
    #[serde(default)]
    pub cost_price: Option<f64>,
    /// Variant weight.
    #[serde(default)]
    pub weight: Option<f64>,
    /// Variant image URL.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Sellable quantity.
    #[serde(default)]
    pub inventory_level: i64,
}

/// A catalog product, with variants and images included inline.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Product {
    /// Product id.
    pub id: i64,
    /// Product name.
    #[serde(default)]
    pub name: String,
    /// Product SKU.
    #[serde(default)]
    pub sku: String,
    /// Product UPC.
    #[serde(default)]
    pub upc: Option<String>,
    /// Plain-text or HTML description.
    #[serde(default)]
    pub description: String,
    /// List price.
    #[serde(default)]
    pub price: Option<f64>,
    /// Sale price, when a sale is active.
    #[serde(default)]
    pub sale_price: Option<f64>,
    /// Manufacturer suggested retail price.
    #[serde(default)]
    pub retail_price: Option<f64>,
    /// Cost price.
    #[serde(default)]
    pub cost_price: Option<f64>,
    /// Weight, in the store's weight unit.
    #[serde(default)]
    pub weight: Option<f64>,
    /// Owning brand id.
    #[serde(default)]
    pub brand_id: Option<i64>,
    /// Category ids this product belongs to.
    #[serde(default)]
    pub categories: Vec<i64>,
    /// Inventory tracking mode.
    #[serde(default)]
    pub inventory_tracking: InventoryTracking,
    /// Sellable quantity at the product level.
    #[serde(default)]
    pub inventory_level: i64,
    /// Product images.
    #[serde(default)]
    pub images: Vec<ProductImage>,
    /// Product variants.
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    /// Brand name, resolved from `brand_id` by the products service.
    #[serde(skip)]
    pub brand_name: Option<String>,
    /// Store weight unit, stamped on by the products service.
    #[serde(skip)]
    pub weight_unit: Option<String>,
}

/// A product brand.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Brand {
    /// Brand id.
    pub id: i64,
    /// Brand name.
    #[serde(default)]
    pub name: String,
}

/// Store-level settings the catalog services need.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Store {
    /// Store name.
    #[serde(default)]
    pub name: String,
    /// Primary domain.
    #[serde(default)]
    pub domain: String,
    /// Unit all product weights are expressed in.
    #[serde(default)]
    pub weight_units: String,
}

/// An inventory update for one product or variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProductUpdate {
    /// Product id to update.
    pub id: i64,
    /// Variant id, when the update targets a variant.
    pub variant_id: Option<i64>,
    /// New sellable quantity.
    pub inventory_level: i64,
}

/// The body serialized for an inventory update PUT.
#[derive(Clone, Copy, Debug, Serialize)]
pub(crate) struct InventoryLevelBody {
    pub inventory_level: i64,
}

impl ProductUpdate {
    /// An update against the product-level inventory.
    #[must_use]
    pub const fn product(id: i64, inventory_level: i64) -> Self {
        Self {
            id,
            variant_id: None,
            inventory_level,
        }
    }

    /// An update against one variant's inventory.
    #[must_use]
    pub const fn variant(id: i64, variant_id: i64, inventory_level: i64) -> Self {
        Self {
            id,
            variant_id: Some(variant_id),
            inventory_level,
        }
    }

    pub(crate) const fn body(self) -> InventoryLevelBody {
        InventoryLevelBody {
            inventory_level: self.inventory_level,
        }
    }
}
