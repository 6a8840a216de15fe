//! Integration catalog handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use tracing::instrument;

use storedesk_core::{IntegrationId, derive};

use crate::{
    error::AppError,
    models::{Integration, IntegrationFlag, IntegrationQuery},
    state::AppState,
};

use super::ListResponse;

/// Build the integrations router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/integrations", get(index))
        .route("/api/integrations/{id}/connection", post(toggle_connection))
}

/// List integrations matching the query.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<IntegrationQuery>,
) -> Json<ListResponse<Integration>> {
    let apps = state.integrations().read().await;
    let rows = derive(&apps, &query)
        .iter()
        .map(|i| Integration::clone(i))
        .collect();
    Json(ListResponse::new(rows, apps.len()))
}

/// Connect or disconnect an integration.
///
/// # Errors
///
/// Returns 404 for an unknown id.
#[instrument(skip(state))]
pub async fn toggle_connection(
    State(state): State<AppState>,
    Path(id): Path<IntegrationId>,
) -> Result<Json<Integration>, AppError> {
    let updated = state
        .integrations()
        .write()
        .await
        .toggle(id, IntegrationFlag::Connected)
        .ok_or_else(|| AppError::not_found("integration", id))?;
    tracing::info!(integration = %updated.name, connected = updated.connected, "integration toggled");
    Ok(Json(Integration::clone(&updated)))
}
