//! Product type.

use crate::ids::ProductId;
use crate::money::{self, Money};
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Products are loaded once and never mutated; the cart snapshots the fields
/// it needs at add time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price.
    #[serde(with = "money::decimal")]
    pub price: Money,
    /// Category name used by the category filter.
    #[serde(default)]
    pub category: String,
    /// Image URIs in display order.
    #[serde(default)]
    pub images: Vec<String>,
    /// Long description shown in the product detail view.
    #[serde(default)]
    pub description: String,
}

impl Product {
    /// Create a product with no category, images or description.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            category: String::new(),
            images: Vec::new(),
            description: String::new(),
        }
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Append an image URI.
    pub fn with_image(mut self, uri: impl Into<String>) -> Self {
        self.images.push(uri.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// First image, used for listing cards and cart lines.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}
