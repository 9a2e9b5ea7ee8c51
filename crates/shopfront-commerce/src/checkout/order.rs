//! Order confirmation types.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::cart::CartLine;
use crate::checkout::Address;
use crate::ids::OrderId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Totals shown at checkout.
///
/// Shipping is only known once a complete postal code has been entered;
/// until then it is `None` and the total equals the subtotal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutQuote {
    pub subtotal: Money,
    pub shipping: Option<Money>,
    pub total: Money,
}

impl CheckoutQuote {
    pub fn new(subtotal: Money, shipping: Option<Money>) -> Self {
        Self {
            subtotal,
            shipping,
            total: subtotal + shipping.unwrap_or(Money::ZERO),
        }
    }

    /// Shipping for display, zero while unknown.
    pub fn shipping_or_zero(&self) -> Money {
        self.shipping.unwrap_or(Money::ZERO)
    }
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderConfirmation {
    /// Human-readable order number.
    pub order_number: OrderId,
    /// Lines as they were at submission.
    pub lines: Vec<CartLine>,
    pub quote: CheckoutQuote,
    pub address: Address,
    /// Unix timestamp (seconds).
    pub placed_at: u64,
}

impl OrderConfirmation {
    pub(crate) fn new(lines: Vec<CartLine>, quote: CheckoutQuote, address: Address) -> Self {
        Self {
            order_number: OrderId::generate(),
            lines,
            quote,
            address,
            placed_at: unix_now(),
        }
    }

    /// Total item count.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
