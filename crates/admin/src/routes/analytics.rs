//! Order analytics handler.

use axum::{Json, Router, extract::State, routing::get};
use tracing::instrument;

use crate::{
    services::{OrderAnalytics, order_analytics},
    state::AppState,
};

/// Build the analytics router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/analytics", get(index))
}

/// Order breakdown by status and revenue by category.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Json<OrderAnalytics> {
    let products = state.products().read().await;
    let orders = state.orders().read().await;
    Json(order_analytics(&orders, &products))
}
