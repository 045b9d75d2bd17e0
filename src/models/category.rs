//! Category payloads.

use serde::Deserialize;

/// A custom URL attached to a category.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CategoryUrl {
    /// Whether the merchant customized the URL.
    #[serde(default)]
    pub is_customized: bool,
    /// The URL path.
    #[serde(default)]
    pub url: String,
}

/// A catalog category.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Category {
    /// Category id.
    pub id: i64,
    /// Category name.
    #[serde(default)]
    pub name: String,
    /// Whether the category is visible in the storefront.
    #[serde(default)]
    pub is_visible: bool,
    /// Custom URL, when set.
    #[serde(default)]
    pub custom_url: Option<CategoryUrl>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_deserializes() {
        let json = r#"{
            "id": 18,
            "name": "Garden",
            "is_visible": true,
            "custom_url": {"is_customized": false, "url": "/garden/"}
        }"#;

        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.name, "Garden");
        assert!(category.is_visible);
        assert_eq!(category.custom_url.unwrap().url, "/garden/");
    }
}
