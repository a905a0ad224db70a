//! Request payloads for the Supabase REST API.

use serde::Serialize;

use qotore_core::{OrderItem, OrderStatus, Price};

/// Insert payload for the `orders` table.
///
/// The database assigns `id` and `created_at`; everything else is set by
/// the checkout handler. New orders always start as [`OrderStatus::Pending`].
#[derive(Debug, Clone, Serialize)]
pub struct NewOrder {
    pub order_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub delivery_address: String,
    pub city: String,
    pub wilayat: String,
    /// Order lines, stored as a jsonb column.
    pub items: Vec<OrderItem>,
    pub total_amount: Price,
    pub status: OrderStatus,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use qotore_core::{FragranceId, VariantId};

    #[test]
    fn test_new_order_serializes_status_snake_case() {
        let order = NewOrder {
            order_number: "QT-20260829-1234".to_string(),
            customer_name: "Ahmed".to_string(),
            customer_phone: "+96890000000".to_string(),
            customer_email: None,
            delivery_address: "Street 1".to_string(),
            city: "Muscat".to_string(),
            wilayat: "Bousher".to_string(),
            items: vec![OrderItem {
                fragrance_id: FragranceId::new(1),
                variant_id: VariantId::new(1),
                fragrance_name: "Oud Royal".to_string(),
                variant_label: "5ml".to_string(),
                unit_price: Price::from_baisa(2500),
                quantity: 2,
            }],
            total_amount: Price::from_baisa(5000),
            status: OrderStatus::Pending,
        };

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["total_amount"], 5000);
        assert_eq!(json["items"][0]["quantity"], 2);
    }
}
