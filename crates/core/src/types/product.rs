//! Catalog product models.

use serde::{Deserialize, Serialize};

use super::ProductId;

/// Image filename used when a product is created without one.
pub const PLACEHOLDER_IMAGE: &str = "placeholder.jpg";

/// A catalog product as stored and served to the storefront.
///
/// Products are created by the admin panel, read by the catalog, and deleted
/// by the admin panel; they are never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    /// Unit price in the store currency. Non-negative.
    pub price: f64,
    pub category: Option<String>,
    /// Image filename (or absolute URL) for the catalog card.
    pub image: String,
}

/// Input for creating a catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: Option<String>,
    pub image: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_serializes_all_columns() {
        let product = Product {
            id: ProductId::new(3),
            name: "Espresso Doppio".to_string(),
            description: Some("Rich, intense double shot.".to_string()),
            price: 3.5,
            category: Some("coffee".to_string()),
            image: "espresso.jpg".to_string(),
        };

        let json = serde_json::to_value(&product).expect("serializes");
        assert_eq!(json["id"], 3);
        assert_eq!(json["name"], "Espresso Doppio");
        assert_eq!(json["price"], 3.5);
        assert_eq!(json["image"], "espresso.jpg");
    }
}
