//! Order row types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{FragranceId, OrderId, OrderStatus, Price, VariantId};

/// An order, as stored in the `orders` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Human-facing order reference, e.g. `QT-8F2K1-042317`.
    pub order_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub delivery_address: String,
    pub city: String,
    /// Omani administrative region.
    pub wilayat: String,
    /// Line items with price snapshots taken at checkout.
    #[serde(default)]
    pub items: Vec<OrderItem>,
    /// Total in baisa; equals the sum of line-item totals.
    pub total_amount: Price,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub reviewed: bool,
    pub created_at: DateTime<Utc>,
}

/// A single line item within an order's `items` JSON column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub fragrance_id: FragranceId,
    pub variant_id: VariantId,
    /// Name snapshot; the catalog row may change or disappear later.
    pub fragrance_name: String,
    /// Variant label snapshot, e.g. `"10ml"`.
    pub variant_label: String,
    /// Unit price snapshot in baisa.
    pub unit_price: Price,
    pub quantity: u32,
}

impl OrderItem {
    /// Line total: unit price times quantity.
    ///
    /// Saturates on overflow rather than wrapping; a saturated total will
    /// never match a client-submitted `total_amount`, so the order is
    /// rejected upstream.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price
            .checked_mul(self.quantity)
            .unwrap_or(Price::from_baisa(i64::MAX))
    }
}

impl Order {
    /// Sum of line-item totals.
    #[must_use]
    pub fn computed_total(&self) -> Price {
        self.items.iter().map(OrderItem::line_total).sum()
    }

    /// Whether the stored total matches the line items.
    #[must_use]
    pub fn total_consistent(&self) -> bool {
        self.total_amount == self.computed_total()
    }
}
