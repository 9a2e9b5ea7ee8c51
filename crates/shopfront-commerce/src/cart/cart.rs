//! Cart and line item types.

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::{self, Money};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_LINE: i64 = 9999;

/// A line item in the cart.
///
/// Name, price and image are copied from the product when the line is
/// created, so later catalog changes don't alter existing lines. The
/// serialized field names (`id`, `qty`) are the persisted wire format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product being purchased (weak reference into the catalog).
    #[serde(rename = "id")]
    pub product_id: ProductId,
    /// Product name at add time.
    pub name: String,
    /// Unit price at add time.
    #[serde(with = "money::decimal")]
    pub price: Money,
    /// Quantity, always in `1..=MAX_QUANTITY_PER_LINE`.
    #[serde(rename = "qty")]
    pub quantity: i64,
    /// First product image at add time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CartLine {
    /// Snapshot a product into a new line.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            quantity: clamp_quantity(quantity),
            image: product.primary_image().map(str::to_string),
        }
    }

    /// Line total (price × quantity).
    pub fn total(&self) -> Money {
        self.price.times(self.quantity)
    }
}

/// The ordered line items of a cart.
///
/// Read access is public; mutation goes through
/// [`CartLedger`](crate::cart::CartLedger) so every change is persisted and
/// observed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from stored lines, restoring the line invariants.
    ///
    /// Lines with a non-positive quantity are dropped, duplicate product ids
    /// are merged into the first occurrence and quantities are capped.
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut cart = Self::new();
        for mut line in lines {
            if line.quantity <= 0 {
                continue;
            }
            match cart.position(&line.product_id) {
                Some(i) => {
                    let existing = &mut cart.lines[i];
                    existing.quantity = clamp_quantity(existing.quantity.saturating_add(line.quantity));
                }
                None => {
                    line.quantity = clamp_quantity(line.quantity);
                    cart.lines.push(line);
                }
            }
        }
        cart
    }

    /// Line items in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get the line for a product.
    pub fn get(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product_id == product_id)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total item count (sum of quantities), shown on the cart badge.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Σ price × quantity, recomputed on every call.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::total).sum()
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.lines.iter().position(|l| &l.product_id == product_id)
    }

    /// Add `quantity` of a product. Non-positive quantities are ignored.
    pub(crate) fn add(&mut self, product: &Product, quantity: i64) -> bool {
        if quantity <= 0 {
            return false;
        }
        match self.position(&product.id) {
            Some(i) => {
                let line = &mut self.lines[i];
                line.quantity = clamp_quantity(line.quantity.saturating_add(quantity));
            }
            None => self.lines.push(CartLine::from_product(product, quantity)),
        }
        true
    }

    /// Replace a line's quantity; `quantity <= 0` removes the line.
    pub(crate) fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(product_id);
        }
        match self.position(product_id) {
            Some(i) => {
                self.lines[i].quantity = clamp_quantity(quantity);
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| &l.product_id != product_id);
        self.lines.len() < len_before
    }

    pub(crate) fn clear(&mut self) -> bool {
        let had_lines = !self.lines.is_empty();
        self.lines.clear();
        had_lines
    }
}

fn clamp_quantity(quantity: i64) -> i64 {
    quantity.min(MAX_QUANTITY_PER_LINE)
}
