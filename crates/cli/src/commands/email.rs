//! Email diagnostics.

use chrono::Utc;
use tracing::info;

use qotore_admin::config::AdminConfig;
use qotore_admin::services::OrderNotifier;
use qotore_core::{FragranceId, Order, OrderId, OrderItem, OrderStatus, Price, VariantId};

/// Send a test order notification through the configured Gmail account.
///
/// Exercises the full path: token refresh, template rendering, MIME
/// encoding, and the Gmail send endpoint.
///
/// # Errors
///
/// Returns an error if Gmail is not configured or the send fails.
pub async fn send_test() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = AdminConfig::from_env()?;
    let Some(gmail) = config.gmail else {
        return Err("Gmail is not configured; set the GMAIL_* variables".into());
    };

    let notifier = OrderNotifier::new(gmail);
    let order = test_order();

    info!(order_number = %order.order_number, "Sending test notification");
    notifier.notify_new_order(&order).await?;
    info!("Test notification sent");

    Ok(())
}

/// A fabricated order that is clearly marked as a test.
fn test_order() -> Order {
    Order {
        id: OrderId::new(0),
        order_number: "QT-TEST-000000".to_string(),
        customer_name: "Test Customer".to_string(),
        customer_phone: "+96890000000".to_string(),
        customer_email: Some("test@example.com".to_string()),
        delivery_address: "Test Street 1".to_string(),
        city: "Muscat".to_string(),
        wilayat: "Muscat".to_string(),
        items: vec![OrderItem {
            fragrance_id: FragranceId::new(0),
            variant_id: VariantId::new(0),
            fragrance_name: "Test Fragrance".to_string(),
            variant_label: "5ml".to_string(),
            unit_price: Price::from_baisa(2500),
            quantity: 1,
        }],
        total_amount: Price::from_baisa(2500),
        status: OrderStatus::Pending,
        reviewed: false,
        created_at: Utc::now(),
    }
}
