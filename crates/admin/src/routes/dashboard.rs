//! Dashboard overview handler.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use tracing::instrument;

use storedesk_core::{NoCriteria, SortDirection, derive_sorted};

use crate::{
    models::OrderSort,
    services::{DashboardMetrics, dashboard_metrics},
    state::AppState,
};

use super::orders::OrderView;

/// How many orders the overview lists.
const RECENT_ORDERS: usize = 5;

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/dashboard", get(index))
}

/// Overview page payload.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub metrics: DashboardMetrics,
    pub recent_orders: Vec<OrderView>,
}

/// Headline metrics and the most recent orders.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Json<DashboardResponse> {
    let products = state.products().read().await;
    let orders = state.orders().read().await;
    let notifications = state.notifications().read().await;

    let metrics = dashboard_metrics(&products, &orders, &notifications);
    let recent_orders = derive_sorted(&orders, &NoCriteria, SortDirection::Desc, |a, b| {
        OrderSort::PlacedAt.compare(a, b)
    })
    .iter()
    .take(RECENT_ORDERS)
    .map(|o| OrderView::from(o.as_ref()))
    .collect();

    Json(DashboardResponse {
        metrics,
        recent_orders,
    })
}
