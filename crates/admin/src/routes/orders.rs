//! Order list handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

use storedesk_core::{OrderId, OrderStatus, PaymentStatus, derive, derive_sorted};

use crate::{
    error::AppError,
    models::{Order, OrderPatch, OrderQuery},
    state::AppState,
};

use super::ListResponse;

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/orders", get(index))
        .route("/api/orders/{id}/status", patch(update_status))
}

/// Order row for the orders table.
#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    pub id: OrderId,
    pub number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub items: u32,
    pub total: Decimal,
    pub total_display: String,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub placed_at: DateTime<Utc>,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            number: order.number.clone(),
            customer_name: order.customer_name.clone(),
            customer_email: order.customer_email.clone(),
            items: order.items,
            total: order.total.amount,
            total_display: order.total.display(),
            status: order.status,
            payment_status: order.payment_status,
            placed_at: order.placed_at,
        }
    }
}

/// List orders matching the query, optionally sorted.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<OrderQuery>,
) -> Json<ListResponse<OrderView>> {
    let orders = state.orders().read().await;
    let rows = match query.sort {
        Some(sort) => derive_sorted(&orders, &query, query.dir.unwrap_or_default(), |a, b| {
            sort.compare(a, b)
        }),
        None => derive(&orders, &query),
    };

    Json(ListResponse::new(
        rows.iter().map(|o| OrderView::from(o.as_ref())).collect(),
        orders.len(),
    ))
}

/// Change the fulfilment and/or payment status of an order.
///
/// # Errors
///
/// Returns 400 for an empty patch and 404 for an unknown id.
#[instrument(skip(state))]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(patch): Json<OrderPatch>,
) -> Result<Json<OrderView>, AppError> {
    if patch.status.is_none() && patch.payment_status.is_none() {
        return Err(AppError::BadRequest(
            "status or payment_status is required".to_string(),
        ));
    }

    let updated = state
        .orders()
        .write()
        .await
        .update_field(id, &patch)
        .ok_or_else(|| AppError::not_found("order", id))?;
    tracing::info!(order_id = %id, status = %updated.status, "order status changed");
    Ok(Json(OrderView::from(updated.as_ref())))
}
