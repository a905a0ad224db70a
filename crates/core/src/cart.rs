//! Pure cart arithmetic.
//!
//! The storefront client keeps its cart locally; the server only sees the
//! assembled order at checkout. This module holds the arithmetic both sides
//! agree on: quantity updates never produce a zero or negative quantity
//! (the line is removed instead), duplicate variants merge, and the
//! subtotal is a linear summation of line totals.

use serde::{Deserialize, Serialize};

use crate::types::{FragranceId, Price, VariantId};

/// A line in a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    pub fragrance_id: FragranceId,
    pub variant_id: VariantId,
    pub fragrance_name: String,
    pub variant_label: String,
    /// Unit price snapshot in baisa.
    pub unit_price: Price,
    pub quantity: u32,
}

impl CartLine {
    /// Line total: unit price times quantity, saturating on overflow.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price
            .checked_mul(self.quantity)
            .unwrap_or(Price::from_baisa(i64::MAX))
    }
}

/// A cart: an ordered list of lines, at most one per variant.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add a line, merging quantities when the variant is already present.
    ///
    /// A zero-quantity add is ignored.
    pub fn add(&mut self, line: CartLine) {
        if line.quantity == 0 {
            return;
        }
        if let Some(existing) = self
            .lines
            .iter_mut()
            .find(|l| l.variant_id == line.variant_id)
        {
            existing.quantity = existing.quantity.saturating_add(line.quantity);
        } else {
            self.lines.push(line);
        }
    }

    /// Set the quantity of a variant's line.
    ///
    /// A quantity of zero removes the line. Setting a quantity for a
    /// variant that is not in the cart does nothing.
    pub fn set_quantity(&mut self, variant_id: VariantId, quantity: u32) {
        if quantity == 0 {
            self.remove(variant_id);
        } else if let Some(line) = self.lines.iter_mut().find(|l| l.variant_id == variant_id) {
            line.quantity = quantity;
        }
    }

    /// Remove the line for a variant, if present.
    pub fn remove(&mut self, variant_id: VariantId) {
        self.lines.retain(|l| l.variant_id != variant_id);
    }

    /// Subtotal in baisa: sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, l| acc.saturating_add(l.quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(variant: i64, unit_price: i64, quantity: u32) -> CartLine {
        CartLine {
            fragrance_id: FragranceId::new(1),
            variant_id: VariantId::new(variant),
            fragrance_name: "Oud Royal".to_string(),
            variant_label: "5ml".to_string(),
            unit_price: Price::from_baisa(unit_price),
            quantity,
        }
    }

    #[test]
    fn test_add_and_subtotal() {
        let mut cart = Cart::new();
        cart.add(line(1, 1500, 2));
        cart.add(line(2, 2000, 1));
        assert_eq!(cart.subtotal(), Price::from_baisa(5000));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_add_merges_same_variant() {
        let mut cart = Cart::new();
        cart.add(line(1, 1500, 1));
        cart.add(line(1, 1500, 2));
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
    }

    #[test]
    fn test_add_zero_quantity_ignored() {
        let mut cart = Cart::new();
        cart.add(line(1, 1500, 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(line(1, 1500, 2));
        cart.set_quantity(VariantId::new(1), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_updates() {
        let mut cart = Cart::new();
        cart.add(line(1, 1500, 2));
        cart.set_quantity(VariantId::new(1), 5);
        assert_eq!(cart.lines()[0].quantity, 5);
        assert_eq!(cart.subtotal(), Price::from_baisa(7500));
    }

    #[test]
    fn test_no_line_ever_has_zero_quantity() {
        let mut cart = Cart::new();
        cart.add(line(1, 1500, 1));
        cart.add(line(2, 900, 4));
        cart.set_quantity(VariantId::new(2), 0);
        cart.add(line(3, 100, 0));
        assert!(cart.lines().iter().all(|l| l.quantity > 0));
    }

    #[test]
    fn test_remove_missing_variant_is_noop() {
        let mut cart = Cart::new();
        cart.add(line(1, 1500, 1));
        cart.remove(VariantId::new(99));
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_empty_cart_subtotal() {
        assert_eq!(Cart::new().subtotal(), Price::ZERO);
    }
}
