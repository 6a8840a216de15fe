//! Payment method settings handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use tracing::instrument;

use storedesk_core::{PaymentMethodId, derive};

use crate::{
    error::AppError,
    models::{
        NewPaymentMethod, PaymentMethod, PaymentMethodFlag, PaymentMethodPatch, PaymentMethodQuery,
    },
    state::AppState,
};

use super::ListResponse;

/// Build the payments router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/payments", get(index).post(create))
        .route("/api/payments/{id}", delete(destroy))
        .route("/api/payments/{id}/status", post(toggle_status))
        .route("/api/payments/{id}/default", post(make_default))
}

/// List payment methods matching the query.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PaymentMethodQuery>,
) -> Json<ListResponse<PaymentMethod>> {
    let methods = state.payment_methods().read().await;
    let rows = derive(&methods, &query)
        .iter()
        .map(|m| PaymentMethod::clone(m))
        .collect();
    Json(ListResponse::new(rows, methods.len()))
}

/// Add a payment method. New methods start inactive.
///
/// # Errors
///
/// Returns 400 if the form fails validation.
#[instrument(skip(state))]
pub async fn create(
    State(state): State<AppState>,
    Json(form): Json<NewPaymentMethod>,
) -> Result<(StatusCode, Json<PaymentMethod>), AppError> {
    let method = form.into_payment_method()?;

    let mut methods = state.payment_methods().write().await;
    let id = methods.add(method);
    let created = methods
        .get(id)
        .map(|m| PaymentMethod::clone(m))
        .ok_or_else(|| AppError::Internal(format!("payment method {id} missing after insert")))?;

    tracing::info!(payment_method_id = %id, kind = %created.kind, "payment method added");
    Ok((StatusCode::CREATED, Json(created)))
}

/// Switch a method between active and inactive.
///
/// # Errors
///
/// Returns 404 for an unknown id.
#[instrument(skip(state))]
pub async fn toggle_status(
    State(state): State<AppState>,
    Path(id): Path<PaymentMethodId>,
) -> Result<Json<PaymentMethod>, AppError> {
    let updated = state
        .payment_methods()
        .write()
        .await
        .toggle(id, PaymentMethodFlag::Status)
        .ok_or_else(|| AppError::not_found("payment method", id))?;
    Ok(Json(PaymentMethod::clone(&updated)))
}

/// Make a method the single active default.
///
/// # Errors
///
/// Returns 404 for an unknown id.
#[instrument(skip(state))]
pub async fn make_default(
    State(state): State<AppState>,
    Path(id): Path<PaymentMethodId>,
) -> Result<Json<PaymentMethod>, AppError> {
    let mut methods = state.payment_methods().write().await;
    if !methods.contains(id) {
        return Err(AppError::not_found("payment method", id));
    }

    let demoted = methods.bulk_update(
        |m| m.is_default && m.id != id,
        &PaymentMethodPatch::demote(),
    );
    let promoted = methods
        .update_field(id, &PaymentMethodPatch::promote())
        .ok_or_else(|| AppError::not_found("payment method", id))?;

    tracing::info!(payment_method_id = %id, demoted, "default payment method changed");
    Ok(Json(PaymentMethod::clone(&promoted)))
}

/// Remove a payment method. Unknown ids are a no-op.
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<PaymentMethodId>,
) -> StatusCode {
    let removed = state.payment_methods().write().await.remove(id);
    if removed.is_some_and(|m| m.is_default) {
        tracing::warn!(payment_method_id = %id, "default payment method removed, no default left");
    }
    StatusCode::NO_CONTENT
}
