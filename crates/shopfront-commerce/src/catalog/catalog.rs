//! The static product collection.

use std::collections::HashSet;

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use crate::search::Query;

/// An immutable, validated product collection in display order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and negative prices.
    pub fn new(products: Vec<Product>) -> Result<Self, CommerceError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id.as_str()) {
                return Err(CommerceError::DuplicateProduct(product.id.to_string()));
            }
            if product.price.is_negative() {
                return Err(CommerceError::ValidationError(format!(
                    "product {} has a negative price",
                    product.id
                )));
            }
        }
        Ok(Self { products })
    }

    /// Parse a catalog from a JSON array of products.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// The built-in demo catalog.
    pub fn sample() -> Self {
        let products = vec![
            Product::new("p1", "Combo Gamer", Money::new(400_000))
                .with_category("Periféricos")
                .with_image("images/products/product-4.png")
                .with_description("Combo completo para gamers iniciantes."),
            Product::new("p2", "Smartband 4", Money::new(19_990))
                .with_category("Wearables")
                .with_image("images/exclusive.png")
                .with_description("Acompanhe sua atividade física."),
            Product::new("p3", "Placa de Video", Money::new(34_990))
                .with_category("Periféricos")
                .with_image("images/products/product-5.png")
                .with_description("Som imersivo com microfone flexível."),
            Product::new("p4", "Controle PS5", Money::new(89_900))
                .with_category("Móveis")
                .with_image("images/products/product-6.png")
                .with_description("Cadeira ergonômica para longas sessões."),
            Product::new("p5", "Cadeira Gamer", Money::new(29_990))
                .with_category("Periféricos")
                .with_image("images/products/product-7.png")
                .with_description("Switches azuis, iluminação RGB."),
        ];
        Self { products }
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Find a product by id.
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Find a product by id, or fail with [`CommerceError::ProductNotFound`].
    pub fn get(&self, id: &ProductId) -> Result<&Product, CommerceError> {
        self.find(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }

    /// Distinct categories in first-seen order, skipping empty ones.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .map(|p| p.category.as_str())
            .filter(|c| !c.is_empty() && seen.insert(*c))
            .collect()
    }

    /// Run a filter/sort query over the catalog.
    pub fn search(&self, query: &Query) -> Vec<&Product> {
        query.apply(&self.products)
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
