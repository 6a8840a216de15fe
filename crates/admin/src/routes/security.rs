//! Security settings: signed-in sessions.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use tracing::instrument;

use storedesk_core::SessionId;

use crate::{error::AppError, models::Session, state::AppState};

use super::BulkResult;

/// Build the security router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/security/sessions", get(sessions))
        .route("/api/security/sessions/sign-out-others", post(sign_out_others))
        .route("/api/security/sessions/{id}", delete(revoke))
}

/// List signed-in sessions, current first as seeded.
#[instrument(skip(state))]
pub async fn sessions(State(state): State<AppState>) -> Json<Vec<Session>> {
    let sessions = state.sessions().read().await;
    Json(sessions.iter().map(|s| Session::clone(s)).collect())
}

/// Revoke one session. Unknown ids are a no-op.
///
/// # Errors
///
/// Returns 409 when asked to revoke the current session.
#[instrument(skip(state))]
pub async fn revoke(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<StatusCode, AppError> {
    let mut sessions = state.sessions().write().await;
    if sessions.get(id).is_some_and(|s| s.current) {
        return Err(AppError::Conflict(
            "the current session cannot be revoked".to_string(),
        ));
    }
    if sessions.remove(id).is_some() {
        tracing::info!(session_id = %id, "session revoked");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Revoke every session except the current one.
#[instrument(skip(state))]
pub async fn sign_out_others(State(state): State<AppState>) -> Json<BulkResult> {
    let affected = state.sessions().write().await.remove_where(|s| !s.current);
    tracing::info!(affected, "signed out other sessions");
    Json(BulkResult { affected })
}
