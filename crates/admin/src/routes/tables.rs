//! Data table configuration handler.

use axum::{Json, Router, extract::Path, routing::get};

use crate::{
    components::{DataTableConfig, table_config},
    error::AppError,
    state::AppState,
};

/// Build the tables router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/tables/{table_id}", get(show))
}

/// Column, filter and bulk-action configuration for one list page.
///
/// # Errors
///
/// Returns 404 for an unknown table id.
pub async fn show(Path(table_id): Path<String>) -> Result<Json<DataTableConfig>, AppError> {
    table_config(&table_id)
        .map(Json)
        .ok_or_else(|| AppError::not_found("table", table_id))
}
