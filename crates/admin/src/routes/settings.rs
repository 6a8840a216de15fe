//! Sidebar settings and navigation handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use storedesk_core::{ProductStatus, SidebarSettings};

use crate::{
    components::{Badges, NavigationView, build_navigation},
    error::AppError,
    state::AppState,
};

/// Build the settings router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/settings/sidebar",
            get(load_sidebar).put(save_sidebar).delete(reset_sidebar),
        )
        .route("/api/navigation", get(navigation))
}

/// Run a settings store call off the async runtime.
async fn with_settings<T, F>(state: &AppState, f: F) -> Result<T, AppError>
where
    F: FnOnce(&AppState) -> T + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state))
        .await
        .map_err(|e| AppError::Internal(format!("settings task failed: {e}")))
}

/// Load the sidebar settings. Missing or corrupt data yields the defaults.
///
/// # Errors
///
/// Returns 500 only if the blocking task panics.
#[instrument(skip(state))]
pub async fn load_sidebar(State(state): State<AppState>) -> Result<Json<SidebarSettings>, AppError> {
    let settings = with_settings(&state, |s| s.settings().load()).await?;
    Ok(Json(settings))
}

/// Save the sidebar settings. Omitted fields take their defaults.
///
/// # Errors
///
/// Returns 500 if the settings cannot be written.
#[instrument(skip(state))]
pub async fn save_sidebar(
    State(state): State<AppState>,
    Json(settings): Json<SidebarSettings>,
) -> Result<Json<SidebarSettings>, AppError> {
    with_settings(&state, move |s| s.settings().save(&settings)).await??;
    tracing::info!(?settings, "sidebar settings saved");
    Ok(Json(settings))
}

/// Delete the stored settings and return the defaults.
///
/// # Errors
///
/// Returns 500 if the settings cannot be removed.
#[instrument(skip(state))]
pub async fn reset_sidebar(
    State(state): State<AppState>,
) -> Result<Json<SidebarSettings>, AppError> {
    with_settings(&state, |s| s.settings().reset()).await??;
    tracing::info!("sidebar settings reset");
    Ok(Json(SidebarSettings::default()))
}

/// Navigation query parameters.
#[derive(Debug, Deserialize)]
pub struct NavigationQuery {
    /// Path of the page being shown. Defaults to the dashboard.
    pub active: Option<String>,
}

/// Sidebar navigation tree for the active page.
///
/// # Errors
///
/// Returns 500 only if the blocking task panics.
#[instrument(skip(state))]
pub async fn navigation(
    State(state): State<AppState>,
    Query(query): Query<NavigationQuery>,
) -> Result<Json<NavigationView>, AppError> {
    let settings = with_settings(&state, |s| s.settings().load()).await?;

    let badges = Badges {
        open_orders: state.orders().read().await.count(|o| o.status.is_open()),
        low_stock: state
            .products()
            .read()
            .await
            .count(|p| p.status == ProductStatus::Active && p.is_low_stock()),
        unread_notifications: state.notifications().read().await.count(|n| !n.read),
    };

    let active = query.active.as_deref().unwrap_or("/");
    Ok(Json(build_navigation(&settings, active, badges)))
}
