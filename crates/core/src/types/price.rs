//! Type-safe price representation using decimal arithmetic.
//!
//! The backend carries money as plain JSON numbers with no currency field,
//! so `Price` is a transparent wrapper over [`Decimal`] rather than an
//! amount/currency pair.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount in the store's single currency.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl core::ops::Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl core::iter::Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|p| p.0).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_decimals() {
        let price = Price::new(Decimal::new(4999, 2));
        assert_eq!(price.to_string(), "$49.99");

        let whole = Price::new(Decimal::new(5, 0));
        assert_eq!(whole.to_string(), "$5.00");
    }

    #[test]
    fn test_deserialize_from_number() {
        let price: Price = serde_json::from_str("49.99").expect("valid price");
        assert_eq!(price, Price::new(Decimal::new(4999, 2)));
    }

    #[test]
    fn test_sum() {
        let total: Price = [
            Price::new(Decimal::new(100, 2)),
            Price::new(Decimal::new(250, 2)),
        ]
        .into_iter()
        .sum();
        assert_eq!(total, Price::new(Decimal::new(350, 2)));
    }
}
