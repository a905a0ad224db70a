//! Type-safe price representation in minor currency units.
//!
//! Prices are stored as baisa (1 OMR = 1000 baisa), which is how the shop
//! database stores `total_amount` and variant prices. Display formatting
//! goes through `rust_decimal` to avoid floating point.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of baisa in one Omani Rial.
pub const BAISA_PER_RIAL: i64 = 1000;

/// A price in baisa (minor units of OMR).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(0);

    /// Create a price from a baisa amount.
    #[must_use]
    pub const fn from_baisa(baisa: i64) -> Self {
        Self(baisa)
    }

    /// Get the amount in baisa.
    #[must_use]
    pub const fn as_baisa(&self) -> i64 {
        self.0
    }

    /// The amount as a decimal number of rials (3 fractional digits).
    #[must_use]
    pub fn as_rials(&self) -> Decimal {
        Decimal::new(self.0, 3)
    }

    /// Checked addition, `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(sum) => Some(Self(sum)),
            None => None,
        }
    }

    /// Checked multiplication by a quantity, `None` on overflow.
    #[must_use]
    pub const fn checked_mul(self, quantity: u32) -> Option<Self> {
        match self.0.checked_mul(quantity as i64) {
            Some(product) => Some(Self(product)),
            None => None,
        }
    }

    /// Format for display, e.g. `"4.500 OMR"`.
    #[must_use]
    pub fn display(&self) -> String {
        format!("{:.3} OMR", self.as_rials())
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl std::iter::Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|p| p.0).sum())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_baisa() {
        let price = Price::from_baisa(4500);
        assert_eq!(price.as_baisa(), 4500);
    }

    #[test]
    fn test_display_three_decimals() {
        assert_eq!(Price::from_baisa(4500).display(), "4.500 OMR");
        assert_eq!(Price::from_baisa(50).display(), "0.050 OMR");
        assert_eq!(Price::ZERO.display(), "0.000 OMR");
    }

    #[test]
    fn test_checked_mul() {
        let price = Price::from_baisa(1500);
        assert_eq!(price.checked_mul(3), Some(Price::from_baisa(4500)));
        assert_eq!(Price::from_baisa(i64::MAX).checked_mul(2), None);
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::from_baisa(100), Price::from_baisa(250)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_baisa(350));
    }

    #[test]
    fn test_serde_transparent() {
        let price = Price::from_baisa(2750);
        assert_eq!(serde_json::to_string(&price).unwrap(), "2750");
        let parsed: Price = serde_json::from_str("2750").unwrap();
        assert_eq!(parsed, price);
    }
}
