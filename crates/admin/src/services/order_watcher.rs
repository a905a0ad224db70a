//! Background watcher that emails the operator about new orders.
//!
//! Polls Supabase on a fixed interval and diffs against the highest order id
//! already seen. The first poll only seeds the cursor, so a restart never
//! re-notifies the whole order history. Purely best-effort: a failed poll or
//! a failed email is logged and retried on the next tick.

use tokio::task::JoinHandle;

use qotore_core::{Order, OrderId};

use crate::state::AppState;

/// Spawn the order watcher task. Runs until the process exits.
pub fn spawn(state: AppState) -> JoinHandle<()> {
    tokio::spawn(run(state))
}

async fn run(state: AppState) {
    let interval_secs = state.config().order_watch_interval_secs;
    let mut interval = tokio::time::interval(std::time::Duration::from_secs(interval_secs));
    // A slow poll should not cause a burst of catch-up ticks
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    tracing::info!(interval_secs, "Order watcher started");

    let mut cursor: Option<OrderId> = None;

    loop {
        interval.tick().await;

        match poll_once(&state, cursor).await {
            Ok(next_cursor) => cursor = next_cursor,
            Err(err) => {
                tracing::warn!(error = %err, "Order poll failed, will retry next tick");
            }
        }
    }
}

/// One poll: fetch orders past the cursor, notify, and advance it.
async fn poll_once(
    state: &AppState,
    cursor: Option<OrderId>,
) -> Result<Option<OrderId>, crate::supabase::SupabaseError> {
    let Some(after_id) = cursor else {
        // Seed the cursor from the current newest order without notifying
        let orders = state.supabase().list_orders(None).await?;
        let seeded = latest_id(&orders).unwrap_or(OrderId::new(0));
        tracing::debug!(cursor = %seeded, "Order watcher cursor seeded");
        return Ok(Some(seeded));
    };

    let new_orders = state.supabase().orders_after(after_id).await?;
    if new_orders.is_empty() {
        return Ok(Some(after_id));
    }

    tracing::info!(count = new_orders.len(), "New orders detected");

    for order in &new_orders {
        if let Some(notifier) = state.notifier() {
            if let Err(err) = notifier.notify_new_order(order).await {
                // The cursor still advances: one undeliverable email should
                // not block notifications for every later order
                tracing::error!(
                    error = %err,
                    order_number = %order.order_number,
                    "Failed to send order notification"
                );
            }
        }
    }

    Ok(latest_id(&new_orders).or(Some(after_id)))
}

/// Highest order id in a batch.
fn latest_id(orders: &[Order]) -> Option<OrderId> {
    orders.iter().map(|o| o.id).max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use qotore_core::{OrderStatus, Price};

    fn order(id: i64) -> Order {
        Order {
            id: OrderId::new(id),
            order_number: format!("QT-TEST-{id:06}"),
            customer_name: "Ali".to_string(),
            customer_phone: "+96890000000".to_string(),
            customer_email: None,
            delivery_address: "Street 1".to_string(),
            city: "Muscat".to_string(),
            wilayat: "Muscat".to_string(),
            items: vec![],
            total_amount: Price::ZERO,
            status: OrderStatus::Pending,
            reviewed: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_latest_id_empty() {
        assert_eq!(latest_id(&[]), None);
    }

    #[test]
    fn test_latest_id_unordered_batch() {
        let orders = vec![order(7), order(12), order(3)];
        assert_eq!(latest_id(&orders), Some(OrderId::new(12)));
    }
}
