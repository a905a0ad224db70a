//! Order management handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use tracing::instrument;

use qotore_core::{Order, OrderId, OrderStatus};

use crate::error::{AppError, Result};
use crate::middleware::RequireAdminSession;
use crate::state::AppState;

/// Query parameters for the order list.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Restrict the list to a single status.
    pub status: Option<String>,
}

/// `GET /admin/orders?status=pending` - All orders, newest first.
#[instrument(skip(state, _session))]
pub async fn index(
    _session: RequireAdminSession,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Order>>> {
    let status = params
        .status
        .map(|s| {
            s.parse::<OrderStatus>()
                .map_err(|_| AppError::BadRequest(format!("unknown status '{s}'")))
        })
        .transpose()?;

    Ok(Json(state.supabase().list_orders(status).await?))
}

/// Query parameters for the new-order poll.
#[derive(Debug, Deserialize)]
pub struct PollParams {
    /// Highest order id the caller has already seen.
    #[serde(default)]
    pub after_id: i64,
}

/// `GET /admin/orders/poll?after_id=N` - Orders newer than a cursor.
///
/// The back-office UI calls this on an interval and notifies for each
/// returned order, then advances its cursor to the highest returned id.
#[instrument(skip(state, _session))]
pub async fn poll(
    _session: RequireAdminSession,
    State(state): State<AppState>,
    Query(params): Query<PollParams>,
) -> Result<Json<Vec<Order>>> {
    let orders = state
        .supabase()
        .orders_after(OrderId::new(params.after_id))
        .await?;
    Ok(Json(orders))
}

/// `GET /admin/orders/{id}` - Single order.
#[instrument(skip(state, _session))]
pub async fn show(
    _session: RequireAdminSession,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<Order>> {
    Ok(Json(state.supabase().get_order(id).await?))
}

/// Status update request body.
#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

/// `PUT /admin/orders/{id}/status` - Set an order's status.
///
/// Only `pending` and `completed` are accepted here; cancellation has its
/// own endpoint. The order is fetched first so a missing id is a clean 404
/// rather than an empty PATCH.
#[instrument(skip(state, _session))]
pub async fn update_status(
    _session: RequireAdminSession,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<Order>> {
    let status: OrderStatus = request
        .status
        .parse()
        .map_err(|_| AppError::BadRequest(format!("unknown status '{}'", request.status)))?;

    if !status.admin_settable() {
        return Err(AppError::BadRequest(format!(
            "status must be 'pending' or 'completed', got '{status}'"
        )));
    }

    let existing = state.supabase().get_order(id).await?;
    let updated = state
        .supabase()
        .update_order_status(existing.id, status)
        .await?;

    tracing::info!(order_number = %updated.order_number, status = %status, "Order status updated");
    Ok(Json(updated))
}

/// `POST /admin/orders/{id}/cancel` - Cancel an order.
#[instrument(skip(state, _session))]
pub async fn cancel(
    _session: RequireAdminSession,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<Order>> {
    let existing = state.supabase().get_order(id).await?;
    let updated = state
        .supabase()
        .update_order_status(existing.id, OrderStatus::Cancelled)
        .await?;

    tracing::info!(order_number = %updated.order_number, "Order cancelled");
    Ok(Json(updated))
}

/// Reviewed flag request body.
#[derive(Debug, Deserialize)]
pub struct ReviewedRequest {
    pub reviewed: bool,
}

/// `POST /admin/orders/{id}/reviewed` - Toggle the reviewed flag.
#[instrument(skip(state, _session))]
pub async fn set_reviewed(
    _session: RequireAdminSession,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(request): Json<ReviewedRequest>,
) -> Result<Json<Order>> {
    let updated = state
        .supabase()
        .set_order_reviewed(id, request.reviewed)
        .await?;
    Ok(Json(updated))
}

/// `DELETE /admin/orders/{id}` - Delete an order.
#[instrument(skip(state, _session))]
pub async fn destroy(
    _session: RequireAdminSession,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<StatusCode> {
    // 404 before delete; PostgREST deletes are silently idempotent
    state.supabase().get_order(id).await?;
    state.supabase().delete_order(id).await?;

    tracing::info!(order_id = %id, "Order deleted");
    Ok(StatusCode::NO_CONTENT)
}
