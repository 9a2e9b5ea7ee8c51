//! Flat shipping-fee rule.

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Subtotal at or above which shipping is free (R$ 500,00).
pub const DEFAULT_FREE_SHIPPING_THRESHOLD: Money = Money::new(50_000);

/// Fee charged below the threshold (R$ 20,00).
pub const DEFAULT_FLAT_FEE: Money = Money::new(2_000);

/// Shipping fee policy: free at or above a threshold, flat fee otherwise.
///
/// Amounts are configured in centavos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingPolicy {
    /// Minimum subtotal for free shipping.
    pub free_shipping_threshold: Money,
    /// Fee below the threshold.
    pub flat_fee: Money,
}

impl ShippingPolicy {
    pub fn new(free_shipping_threshold: Money, flat_fee: Money) -> Self {
        Self {
            free_shipping_threshold,
            flat_fee,
        }
    }

    /// Shipping fee for a subtotal.
    pub fn fee_for(&self, subtotal: Money) -> Money {
        if self.qualifies_for_free_shipping(subtotal) {
            Money::ZERO
        } else {
            self.flat_fee
        }
    }

    /// Check if a subtotal ships for free.
    pub fn qualifies_for_free_shipping(&self, subtotal: Money) -> bool {
        subtotal >= self.free_shipping_threshold
    }
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_FREE_SHIPPING_THRESHOLD, DEFAULT_FLAT_FEE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_boundaries() {
        let policy = ShippingPolicy::default();
        assert_eq!(policy.fee_for(Money::from_decimal(499.99)), Money::from_decimal(20.0));
        assert_eq!(policy.fee_for(Money::from_decimal(500.00)), Money::ZERO);
        assert_eq!(policy.fee_for(Money::ZERO), Money::from_decimal(20.0));
        assert_eq!(policy.fee_for(Money::from_decimal(4000.0)), Money::ZERO);
    }

    #[test]
    fn test_custom_policy() {
        let policy = ShippingPolicy::new(Money::new(10_000), Money::new(1_500));
        assert_eq!(policy.fee_for(Money::new(9_999)).amount_cents, 1_500);
        assert!(policy.qualifies_for_free_shipping(Money::new(10_000)));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let policy: ShippingPolicy = serde_json::from_str(r#"{"flat_fee": 1000}"#).unwrap();
        assert_eq!(policy.flat_fee.amount_cents, 1000);
        assert_eq!(policy.free_shipping_threshold, DEFAULT_FREE_SHIPPING_THRESHOLD);
    }
}
