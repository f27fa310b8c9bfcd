//! Catalog item as returned by the remote source.

use serde::{Deserialize, Serialize};

use crate::domain::types::ItemId;

/// Stock level above which an item is reported as comfortably in stock.
pub const IN_STOCK_THRESHOLD: u32 = 50;

/// Immutable catalog entry. The derivation pipeline only ever reads it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    /// Display name.
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub stock: u32,
    /// Category tags, kept in the order the source returned them.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_information: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty_information: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub rating: f64,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub reviewer_name: String,
    #[serde(default)]
    pub reviewer_email: String,
}

/// Coarse availability shown next to the stock count.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
}

impl Item {
    /// Creates an item with the fields the pipeline inspects; everything else
    /// starts empty.
    #[must_use]
    pub fn new(id: ItemId, title: impl Into<String>, price: f64, rating: f64) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            category: String::new(),
            price,
            discount_percentage: 0.0,
            rating,
            stock: 0,
            tags: Vec::new(),
            brand: None,
            thumbnail: String::new(),
            images: Vec::new(),
            shipping_information: None,
            warranty_information: None,
            dimensions: None,
            weight: None,
            reviews: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    #[must_use]
    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    #[must_use]
    pub fn with_discount(mut self, discount_percentage: f64) -> Self {
        self.discount_percentage = discount_percentage;
        self
    }

    /// Price after applying the discount percentage.
    pub fn discounted_price(&self) -> f64 {
        self.price - self.price * (self.discount_percentage / 100.0)
    }

    pub fn stock_status(&self) -> StockStatus {
        if self.stock > IN_STOCK_THRESHOLD {
            StockStatus::InStock
        } else {
            StockStatus::LowStock
        }
    }

    /// Main image to display, falling back to the thumbnail.
    pub fn primary_image(&self) -> &str {
        self.images
            .first()
            .map(String::as_str)
            .unwrap_or(&self.thumbnail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn id(value: i32) -> ItemId {
        ItemId::new(value).unwrap()
    }

    #[test]
    fn discounted_price_applies_percentage() {
        let item = Item::new(id(1), "Lamp", 200.0, 4.0).with_discount(12.5);
        assert!((item.discounted_price() - 175.0).abs() < f64::EPSILON);
    }

    #[test]
    fn stock_status_uses_threshold() {
        let item = Item::new(id(1), "Lamp", 1.0, 1.0);
        assert_eq!(item.clone().with_stock(51).stock_status(), StockStatus::InStock);
        assert_eq!(item.with_stock(50).stock_status(), StockStatus::LowStock);
    }

    #[test]
    fn deserializes_remote_schema_with_missing_optionals() {
        let value = json!({
            "id": 5,
            "title": "Essence Mascara",
            "price": 9.99,
            "rating": 4.94,
            "stock": 5,
            "discountPercentage": 7.17,
            "tags": ["beauty", "mascara"],
            "category": "beauty",
            "thumbnail": "https://cdn.example.com/5/thumb.png"
        });

        let item: Item = serde_json::from_value(value).unwrap();

        assert_eq!(item.id.get(), 5);
        assert_eq!(item.tags, vec!["beauty", "mascara"]);
        assert!(item.images.is_empty());
        assert!(item.brand.is_none());
        assert_eq!(item.primary_image(), "https://cdn.example.com/5/thumb.png");
    }
}
