//! Moderator team handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::instrument;

use storedesk_core::{ModeratorId, ModeratorRole, Permission, derive};

use crate::{
    error::AppError,
    models::{Moderator, ModeratorFlag, ModeratorPatch, ModeratorQuery, NewModerator},
    state::AppState,
};

use super::ListResponse;

/// Build the moderators router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/moderators", get(index).post(invite))
        .route("/api/moderators/{id}", patch(update).delete(destroy))
        .route(
            "/api/moderators/{id}/permissions/{permission}",
            post(toggle_permission),
        )
        .route("/api/moderators/{id}/active", post(toggle_active))
}

/// Moderator row for the team table.
#[derive(Debug, Clone, Serialize)]
pub struct ModeratorView {
    pub id: ModeratorId,
    pub name: String,
    pub email: String,
    pub role: ModeratorRole,
    pub permissions: Vec<Permission>,
    pub active: bool,
    pub joined_at: DateTime<Utc>,
}

impl From<&Moderator> for ModeratorView {
    fn from(m: &Moderator) -> Self {
        Self {
            id: m.id,
            name: m.name.clone(),
            email: m.email.as_str().to_string(),
            role: m.role,
            permissions: m.permissions.iter().copied().collect(),
            active: m.active,
            joined_at: m.joined_at,
        }
    }
}

/// List moderators matching the query.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ModeratorQuery>,
) -> Json<ListResponse<ModeratorView>> {
    let team = state.moderators().read().await;
    let rows = derive(&team, &query);
    Json(ListResponse::new(
        rows.iter().map(|m| ModeratorView::from(m.as_ref())).collect(),
        team.len(),
    ))
}

/// Invite a new moderator.
///
/// # Errors
///
/// Returns 400 for a blank name, a malformed email, or an email already on
/// the team.
#[instrument(skip(state))]
pub async fn invite(
    State(state): State<AppState>,
    Json(form): Json<NewModerator>,
) -> Result<(StatusCode, Json<ModeratorView>), AppError> {
    // Hold the write lock across the uniqueness check and the insert.
    let mut team = state.moderators().write().await;
    let moderator = form.into_moderator(|email| team.iter().any(|m| &m.email == email))?;
    let id = team.add(moderator);
    let view = team
        .get(id)
        .map(|m| ModeratorView::from(m.as_ref()))
        .ok_or_else(|| AppError::Internal(format!("moderator {id} missing after insert")))?;

    tracing::info!(moderator_id = %id, role = %view.role, "moderator invited");
    Ok((StatusCode::CREATED, Json(view)))
}

/// Rename a moderator or change their role.
///
/// # Errors
///
/// Returns 400 for a blank name and 404 for an unknown id.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ModeratorId>,
    Json(patch): Json<ModeratorPatch>,
) -> Result<Json<ModeratorView>, AppError> {
    patch.validate()?;
    let updated = state
        .moderators()
        .write()
        .await
        .update_field(id, &patch)
        .ok_or_else(|| AppError::not_found("moderator", id))?;
    Ok(Json(ModeratorView::from(updated.as_ref())))
}

/// Grant or revoke one permission.
///
/// # Errors
///
/// Returns 404 for an unknown id.
#[instrument(skip(state))]
pub async fn toggle_permission(
    State(state): State<AppState>,
    Path((id, permission)): Path<(ModeratorId, Permission)>,
) -> Result<Json<ModeratorView>, AppError> {
    let updated = state
        .moderators()
        .write()
        .await
        .toggle(id, ModeratorFlag::Permission(permission))
        .ok_or_else(|| AppError::not_found("moderator", id))?;
    Ok(Json(ModeratorView::from(updated.as_ref())))
}

/// Activate or deactivate a moderator.
///
/// # Errors
///
/// Returns 404 for an unknown id.
#[instrument(skip(state))]
pub async fn toggle_active(
    State(state): State<AppState>,
    Path(id): Path<ModeratorId>,
) -> Result<Json<ModeratorView>, AppError> {
    let updated = state
        .moderators()
        .write()
        .await
        .toggle(id, ModeratorFlag::Active)
        .ok_or_else(|| AppError::not_found("moderator", id))?;
    Ok(Json(ModeratorView::from(updated.as_ref())))
}

/// Remove a moderator. Unknown ids are a no-op.
#[instrument(skip(state))]
pub async fn destroy(State(state): State<AppState>, Path(id): Path<ModeratorId>) -> StatusCode {
    if state.moderators().write().await.remove(id).is_some() {
        tracing::info!(moderator_id = %id, "moderator removed");
    }
    StatusCode::NO_CONTENT
}
