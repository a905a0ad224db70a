//! Checkout route handler.
//!
//! Orders are paid on delivery, so checkout is a single submission: validate
//! the payload, price it against the submitted line items, and insert a
//! `pending` order. The admin back office picks it up from there.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use qotore_core::{Email, Order, OrderId, OrderItem, OrderStatus, Price};

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::supabase::NewOrder;

/// Characters used in the random segment of an order number.
/// Excludes `0`, `O`, `1`, `I` to keep phone readbacks unambiguous.
const ORDER_NUMBER_CHARSET: &[u8] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZ";

/// Checkout request body.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default)]
    pub customer_email: Option<String>,
    pub delivery_address: String,
    pub city: String,
    pub wilayat: String,
    pub items: Vec<OrderItem>,
    /// Client-computed total; must match the sum of line totals.
    pub total_amount: Price,
}

/// Checkout response body.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub id: OrderId,
    pub order_number: String,
    pub total_amount: Price,
    pub status: OrderStatus,
}

/// `POST /api/orders` - Submit an order.
///
/// Returns 201 with the order number on success, 400 on any validation
/// failure. The order is stored as `pending`; email notification happens
/// out of band when the admin watcher sees the new row.
#[instrument(skip(state, request))]
pub async fn submit(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<CheckoutResponse>)> {
    let order = validate(request)?;
    let stored: Order = state.supabase().insert_order(&order).await?;

    tracing::info!(
        order_number = %stored.order_number,
        total = %stored.total_amount,
        "Order placed"
    );

    Ok((
        StatusCode::CREATED,
        Json(CheckoutResponse {
            id: stored.id,
            order_number: stored.order_number,
            total_amount: stored.total_amount,
            status: stored.status,
        }),
    ))
}

/// Validate a checkout request and build the insert payload.
fn validate(request: CheckoutRequest) -> Result<NewOrder> {
    let customer_name = required_field(&request.customer_name, "customer_name")?;
    let customer_phone = required_field(&request.customer_phone, "customer_phone")?;
    let delivery_address = required_field(&request.delivery_address, "delivery_address")?;
    let city = required_field(&request.city, "city")?;
    let wilayat = required_field(&request.wilayat, "wilayat")?;

    // Email is optional, but when present it has to be well-formed since
    // order updates may be sent to it later.
    let customer_email = match request.customer_email.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(
            raw.parse::<Email>()
                .map_err(|e| AppError::BadRequest(format!("customer_email: {e}")))?
                .to_string(),
        ),
    };

    if request.items.is_empty() {
        return Err(AppError::BadRequest(
            "order must contain at least one item".to_string(),
        ));
    }
    if request.items.iter().any(|item| item.quantity == 0) {
        return Err(AppError::BadRequest(
            "item quantity must be at least 1".to_string(),
        ));
    }
    if request.items.iter().any(|item| item.unit_price <= Price::ZERO) {
        return Err(AppError::BadRequest(
            "item unit_price must be positive".to_string(),
        ));
    }

    let computed: Price = request.items.iter().map(OrderItem::line_total).sum();
    if computed != request.total_amount {
        return Err(AppError::BadRequest(format!(
            "total_amount mismatch: submitted {}, items sum to {}",
            request.total_amount, computed
        )));
    }

    Ok(NewOrder {
        order_number: generate_order_number(),
        customer_name,
        customer_phone,
        customer_email,
        delivery_address,
        city,
        wilayat,
        items: request.items,
        total_amount: computed,
        status: OrderStatus::Pending,
    })
}

/// Require a non-empty trimmed field.
fn required_field(value: &str, name: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(format!("{name} is required")));
    }
    Ok(trimmed.to_string())
}

/// Generate an order number like `QT-8F2K1-042317`.
///
/// The middle segment is random, the last is the UTC time of day. Uniqueness
/// is not guaranteed by construction; the `orders.order_number` unique index
/// is the backstop, and collisions at this volume are not a practical concern.
fn generate_order_number() -> String {
    let mut rng = rand::rng();
    let random: String = (0..5)
        .map(|_| {
            let idx = rng.random_range(0..ORDER_NUMBER_CHARSET.len());
            ORDER_NUMBER_CHARSET[idx] as char
        })
        .collect();

    format!("QT-{random}-{}", Utc::now().format("%H%M%S"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use qotore_core::{FragranceId, VariantId};

    fn item(unit_price: i64, quantity: u32) -> OrderItem {
        OrderItem {
            fragrance_id: FragranceId::new(1),
            variant_id: VariantId::new(10),
            fragrance_name: "Oud Royal".to_string(),
            variant_label: "5ml".to_string(),
            unit_price: Price::from_baisa(unit_price),
            quantity,
        }
    }

    fn request() -> CheckoutRequest {
        CheckoutRequest {
            customer_name: "Ahmed Al-Balushi".to_string(),
            customer_phone: "+96891234567".to_string(),
            customer_email: Some("ahmed@example.com".to_string()),
            delivery_address: "Way 123, Building 4".to_string(),
            city: "Muscat".to_string(),
            wilayat: "Bousher".to_string(),
            items: vec![item(2500, 2)],
            total_amount: Price::from_baisa(5000),
        }
    }

    #[test]
    fn test_validate_accepts_well_formed_order() {
        let order = validate(request()).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_amount, Price::from_baisa(5000));
        assert!(order.order_number.starts_with("QT-"));
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let mut req = request();
        req.customer_name = "   ".to_string();
        assert!(matches!(
            validate(req).unwrap_err(),
            AppError::BadRequest(_)
        ));
    }

    #[test]
    fn test_validate_rejects_empty_items() {
        let mut req = request();
        req.items.clear();
        req.total_amount = Price::ZERO;
        assert!(matches!(
            validate(req).unwrap_err(),
            AppError::BadRequest(_)
        ));
    }

    #[test]
    fn test_validate_rejects_zero_quantity() {
        let mut req = request();
        req.items = vec![item(2500, 0)];
        req.total_amount = Price::ZERO;
        assert!(matches!(
            validate(req).unwrap_err(),
            AppError::BadRequest(_)
        ));
    }

    #[test]
    fn test_validate_rejects_negative_unit_price() {
        // A matching negative total must not sneak a negative order through
        let mut req = request();
        req.items = vec![item(-2500, 2)];
        req.total_amount = Price::from_baisa(-5000);
        let err = validate(req).unwrap_err();
        assert!(err.to_string().contains("unit_price"));
    }

    #[test]
    fn test_validate_rejects_free_item() {
        let mut req = request();
        req.items = vec![item(0, 1)];
        req.total_amount = Price::ZERO;
        assert!(matches!(
            validate(req).unwrap_err(),
            AppError::BadRequest(_)
        ));
    }

    #[test]
    fn test_validate_rejects_total_mismatch() {
        let mut req = request();
        req.total_amount = Price::from_baisa(4999);
        let err = validate(req).unwrap_err();
        assert!(err.to_string().contains("total_amount mismatch"));
    }

    #[test]
    fn test_validate_rejects_malformed_email() {
        let mut req = request();
        req.customer_email = Some("not-an-email".to_string());
        assert!(matches!(
            validate(req).unwrap_err(),
            AppError::BadRequest(_)
        ));
    }

    #[test]
    fn test_validate_treats_empty_email_as_absent() {
        let mut req = request();
        req.customer_email = Some("  ".to_string());
        let order = validate(req).unwrap();
        assert!(order.customer_email.is_none());
    }

    #[test]
    fn test_order_number_format() {
        let number = generate_order_number();
        let parts: Vec<&str> = number.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "QT");
        assert_eq!(parts[1].len(), 5);
        assert_eq!(parts[2].len(), 6);
        assert!(!parts[1].contains(['0', 'O', '1', 'I']));
    }
}
