//! Money type for representing monetary values.
//!
//! Uses centavo-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations. The storefront
//! trades in a single currency (BRL).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};

/// Currency symbol used when formatting amounts.
pub const CURRENCY_SYMBOL: &str = "R$";

/// Number of minor units per major unit.
const MINOR_PER_MAJOR: i64 = 100;

/// A monetary value in centavos.
///
/// Arithmetic saturates at the `i64` bounds instead of wrapping or panicking.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money {
    /// Amount in centavos.
    pub amount_cents: i64,
}

impl Money {
    /// Zero.
    pub const ZERO: Money = Money { amount_cents: 0 };

    /// Create a new Money value from centavos.
    pub const fn new(amount_cents: i64) -> Self {
        Self { amount_cents }
    }

    /// Create a Money value from a decimal amount, rounding to the nearest
    /// centavo.
    ///
    /// ```
    /// use shopfront_commerce::Money;
    /// let price = Money::from_decimal(199.90);
    /// assert_eq!(price.amount_cents, 19990);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        let cents = (amount * MINOR_PER_MAJOR as f64).round();
        // `as` saturates for out-of-range floats and maps NaN to 0
        Self::new(cents as i64)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / MINOR_PER_MAJOR as f64
    }

    /// Multiply by a quantity.
    pub fn times(&self, quantity: i64) -> Money {
        Money::new(self.amount_cents.saturating_mul(quantity))
    }

    /// Checked addition, `None` on overflow.
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.amount_cents.checked_add(other.amount_cents).map(Money::new)
    }

    /// Format in Brazilian style, e.g. `R$ 1.234,56` (with a no-break space).
    pub fn display(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}\u{a0}{}", sign, CURRENCY_SYMBOL, self.display_amount())
    }

    /// Format the absolute amount without symbol, e.g. `1.234,56`.
    pub fn display_amount(&self) -> String {
        let abs = self.amount_cents.unsigned_abs();
        let major = abs / MINOR_PER_MAJOR as u64;
        let minor = abs % MINOR_PER_MAJOR as u64;

        let digits = major.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        format!("{},{:02}", grouped, minor)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::new(self.amount_cents.saturating_add(other.amount_cents))
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money::new(self.amount_cents.saturating_sub(other.amount_cents))
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, factor: i64) -> Money {
        self.times(factor)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Serde adapter for prices written as decimal numbers (`199.9`), the format
/// used by catalog documents and persisted cart lines.
pub mod decimal {
    use super::Money;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(money.to_decimal())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        if !amount.is_finite() {
            return Err(serde::de::Error::custom("price must be a finite number"));
        }
        Ok(Money::from_decimal(amount))
    }
}
