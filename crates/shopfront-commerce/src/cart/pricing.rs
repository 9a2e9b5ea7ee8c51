//! Cart pricing calculations.

use crate::cart::{Cart, ShippingPolicy};
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Derived totals for a cart. Never stored; recomputed from the lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Σ price × quantity.
    pub subtotal: Money,
    /// Shipping fee for the subtotal.
    pub shipping_total: Money,
    /// Subtotal plus shipping.
    pub grand_total: Money,
    /// Sum of quantities.
    pub item_count: i64,
    /// Per-line breakdown in cart order.
    pub line_items: Vec<LinePricing>,
}

impl CartPricing {
    /// Price a cart under a shipping policy.
    pub fn calculate(cart: &Cart, shipping: &ShippingPolicy) -> Self {
        let line_items: Vec<LinePricing> = cart
            .lines()
            .iter()
            .map(|line| LinePricing {
                product_id: line.product_id.clone(),
                unit_price: line.price,
                quantity: line.quantity,
                total: line.total(),
            })
            .collect();

        let subtotal = cart.subtotal();
        let shipping_total = shipping.fee_for(subtotal);

        Self {
            subtotal,
            shipping_total,
            grand_total: subtotal + shipping_total,
            item_count: cart.item_count(),
            line_items,
        }
    }

    /// Check if shipping is free at this subtotal.
    pub fn has_free_shipping(&self) -> bool {
        self.shipping_total.is_zero()
    }
}

/// Pricing breakdown for a single line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinePricing {
    /// Product ID.
    pub product_id: ProductId,
    /// Unit price.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: i64,
    /// unit_price × quantity.
    pub total: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;

    #[test]
    fn test_pricing_below_threshold() {
        let mut cart = Cart::new();
        cart.add(&Product::new("p2", "Smartband 4", Money::new(19_990)), 2);

        let pricing = CartPricing::calculate(&cart, &ShippingPolicy::default());
        assert_eq!(pricing.subtotal.amount_cents, 39_980);
        assert_eq!(pricing.shipping_total.amount_cents, 2_000);
        assert_eq!(pricing.grand_total.amount_cents, 41_980);
        assert_eq!(pricing.item_count, 2);
        assert_eq!(pricing.line_items[0].total.amount_cents, 39_980);
        assert!(!pricing.has_free_shipping());
    }

    #[test]
    fn test_pricing_free_shipping() {
        let mut cart = Cart::new();
        cart.add(&Product::new("p1", "Combo Gamer", Money::new(400_000)), 1);

        let pricing = CartPricing::calculate(&cart, &ShippingPolicy::default());
        assert!(pricing.has_free_shipping());
        assert_eq!(pricing.grand_total, pricing.subtotal);
    }

    #[test]
    fn test_empty_cart_still_charges_flat_fee() {
        let pricing = CartPricing::calculate(&Cart::new(), &ShippingPolicy::default());
        assert_eq!(pricing.subtotal, Money::ZERO);
        assert_eq!(pricing.shipping_total.amount_cents, 2_000);
    }
}
