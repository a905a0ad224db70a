//! Integration tests for order status and total contracts.

use chrono::Utc;

use qotore_core::{
    FragranceId, Order, OrderId, OrderItem, OrderStatus, Price, VariantId,
};

fn item(unit_price: i64, quantity: u32) -> OrderItem {
    OrderItem {
        fragrance_id: FragranceId::new(1),
        variant_id: VariantId::new(1),
        fragrance_name: "Oud Royal".to_string(),
        variant_label: "5ml".to_string(),
        unit_price: Price::from_baisa(unit_price),
        quantity,
    }
}

fn order(items: Vec<OrderItem>, total: i64) -> Order {
    Order {
        id: OrderId::new(1),
        order_number: "QT-8F2K1-042317".to_string(),
        customer_name: "Ahmed".to_string(),
        customer_phone: "+96891234567".to_string(),
        customer_email: None,
        delivery_address: "Way 123".to_string(),
        city: "Muscat".to_string(),
        wilayat: "Bousher".to_string(),
        items,
        total_amount: Price::from_baisa(total),
        status: OrderStatus::Pending,
        reviewed: false,
        created_at: Utc::now(),
    }
}

// =============================================================================
// Status Contract Tests
// =============================================================================

#[test]
fn test_only_pending_and_completed_are_admin_settable() {
    assert!(OrderStatus::Pending.admin_settable());
    assert!(OrderStatus::Completed.admin_settable());
    assert!(!OrderStatus::Cancelled.admin_settable());
    assert!(!OrderStatus::Reviewed.admin_settable());
}

#[test]
fn test_status_parse_rejects_unknown_values() {
    assert!("pending".parse::<OrderStatus>().is_ok());
    assert!("completed".parse::<OrderStatus>().is_ok());

    assert!("shipped".parse::<OrderStatus>().is_err());
    assert!("PENDING".parse::<OrderStatus>().is_err());
    assert!("".parse::<OrderStatus>().is_err());
}

#[test]
fn test_status_serializes_snake_case() {
    let json = serde_json::to_string(&OrderStatus::Completed).expect("serializes");
    assert_eq!(json, "\"completed\"");
}

// =============================================================================
// Total Contract Tests
// =============================================================================

#[test]
fn test_order_total_equals_sum_of_line_totals() {
    let o = order(vec![item(2500, 2), item(1500, 1)], 6500);
    assert!(o.total_consistent());
    assert_eq!(o.computed_total(), Price::from_baisa(6500));
}

#[test]
fn test_tampered_total_is_detected() {
    let o = order(vec![item(2500, 2)], 4999);
    assert!(!o.total_consistent());
}

#[test]
fn test_total_displays_three_decimal_omr() {
    let o = order(vec![item(2500, 2)], 5000);
    assert_eq!(o.total_amount.display(), "5.000 OMR");
}
