//! Notification feed and delivery preference handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use serde::Serialize;
use tracing::instrument;

use storedesk_core::{NotificationId, PreferenceId, derive};

use crate::{
    error::AppError,
    models::{
        Channel, Notification, NotificationFlag, NotificationPatch, NotificationPreference,
        NotificationQuery,
    },
    state::AppState,
};

use super::BulkResult;

/// Build the notifications router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/notifications", get(index))
        .route("/api/notifications/read-all", post(mark_all_read))
        .route("/api/notifications/{id}", delete(destroy))
        .route("/api/notifications/{id}/read", post(toggle_read))
        .route("/api/notifications/preferences", get(preferences))
        .route(
            "/api/notifications/preferences/{id}/{channel}",
            post(toggle_channel),
        )
}

/// The notification feed with its unread counter.
#[derive(Debug, Serialize)]
pub struct NotificationFeed {
    pub items: Vec<Notification>,
    pub count: usize,
    pub total: usize,
    pub unread: usize,
}

/// List notifications matching the query, newest first as seeded.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<NotificationQuery>,
) -> Json<NotificationFeed> {
    let feed = state.notifications().read().await;
    let items: Vec<Notification> = derive(&feed, &query)
        .iter()
        .map(|n| Notification::clone(n))
        .collect();

    Json(NotificationFeed {
        count: items.len(),
        items,
        total: feed.len(),
        unread: feed.count(|n| !n.read),
    })
}

/// Flip the read flag of one notification.
///
/// # Errors
///
/// Returns 404 for an unknown id.
#[instrument(skip(state))]
pub async fn toggle_read(
    State(state): State<AppState>,
    Path(id): Path<NotificationId>,
) -> Result<Json<Notification>, AppError> {
    let updated = state
        .notifications()
        .write()
        .await
        .toggle(id, NotificationFlag::Read)
        .ok_or_else(|| AppError::not_found("notification", id))?;
    Ok(Json(Notification::clone(&updated)))
}

/// Mark every unread notification read.
#[instrument(skip(state))]
pub async fn mark_all_read(State(state): State<AppState>) -> Json<BulkResult> {
    let affected = state
        .notifications()
        .write()
        .await
        .bulk_update(|n| !n.read, &NotificationPatch::mark_read());
    tracing::info!(affected, "notifications marked read");
    Json(BulkResult { affected })
}

/// Delete a notification. Unknown ids are a no-op.
#[instrument(skip(state))]
pub async fn destroy(State(state): State<AppState>, Path(id): Path<NotificationId>) -> StatusCode {
    state.notifications().write().await.remove(id);
    StatusCode::NO_CONTENT
}

/// List delivery preferences.
#[instrument(skip(state))]
pub async fn preferences(State(state): State<AppState>) -> Json<Vec<NotificationPreference>> {
    let prefs = state.preferences().read().await;
    Json(
        prefs
            .iter()
            .map(|p| NotificationPreference::clone(p))
            .collect(),
    )
}

/// Flip one delivery channel of a preference.
///
/// # Errors
///
/// Returns 404 for an unknown id.
#[instrument(skip(state))]
pub async fn toggle_channel(
    State(state): State<AppState>,
    Path((id, channel)): Path<(PreferenceId, Channel)>,
) -> Result<Json<NotificationPreference>, AppError> {
    let updated = state
        .preferences()
        .write()
        .await
        .toggle(id, channel)
        .ok_or_else(|| AppError::not_found("notification preference", id))?;
    Ok(Json(NotificationPreference::clone(&updated)))
}
