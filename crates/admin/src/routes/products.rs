//! Product catalog handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post},
};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

use storedesk_core::{ProductId, ProductStatus, derive, derive_sorted};

use crate::{
    error::AppError,
    models::{NewProduct, Product, ProductFlag, ProductPatch, ProductQuery},
    state::AppState,
};

use super::ListResponse;

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(index).post(create))
        .route("/api/products/{id}", patch(update).delete(destroy))
        .route("/api/products/{id}/featured", post(toggle_featured))
}

/// Product row for the catalog table.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub sku: String,
    pub description: String,
    pub category: String,
    pub status: ProductStatus,
    pub price: Decimal,
    pub price_display: String,
    pub stock: u32,
    pub low_stock: bool,
    pub sales: u32,
    pub revenue: Decimal,
    pub rating: f32,
    pub featured: bool,
    pub tags: Vec<String>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            sku: product.sku.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            status: product.status,
            price: product.price.amount,
            price_display: product.price.display(),
            stock: product.stock,
            low_stock: product.is_low_stock(),
            sales: product.sales,
            revenue: product.revenue,
            rating: product.rating,
            featured: product.featured,
            tags: product.tags.clone(),
        }
    }
}

/// List products matching the query, optionally sorted.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Json<ListResponse<ProductView>> {
    let products = state.products().read().await;
    let rows = match query.sort {
        Some(sort) => derive_sorted(&products, &query, query.dir.unwrap_or_default(), |a, b| {
            sort.compare(a, b)
        }),
        None => derive(&products, &query),
    };

    Json(ListResponse::new(
        rows.iter().map(|p| ProductView::from(p.as_ref())).collect(),
        products.len(),
    ))
}

/// Create a product from the add-product form.
///
/// # Errors
///
/// Returns 400 if the form fails validation.
#[instrument(skip(state))]
pub async fn create(
    State(state): State<AppState>,
    Json(form): Json<NewProduct>,
) -> Result<(StatusCode, Json<ProductView>), AppError> {
    let product = form.into_product()?;

    let mut products = state.products().write().await;
    let id = products.add(product);
    let view = products
        .get(id)
        .map(|p| ProductView::from(p.as_ref()))
        .ok_or_else(|| AppError::Internal(format!("product {id} missing after insert")))?;

    tracing::info!(product_id = %id, name = %view.name, "product created");
    Ok((StatusCode::CREATED, Json(view)))
}

/// Apply a partial update.
///
/// # Errors
///
/// Returns 400 for an invalid patch and 404 for an unknown id.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(patch): Json<ProductPatch>,
) -> Result<Json<ProductView>, AppError> {
    patch.validate()?;
    let updated = state
        .products()
        .write()
        .await
        .update_field(id, &patch)
        .ok_or_else(|| AppError::not_found("product", id))?;
    Ok(Json(ProductView::from(updated.as_ref())))
}

/// Flip the featured flag.
///
/// # Errors
///
/// Returns 404 for an unknown id.
#[instrument(skip(state))]
pub async fn toggle_featured(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductView>, AppError> {
    let updated = state
        .products()
        .write()
        .await
        .toggle(id, ProductFlag::Featured)
        .ok_or_else(|| AppError::not_found("product", id))?;
    Ok(Json(ProductView::from(updated.as_ref())))
}

/// Delete a product. Unknown ids are a no-op.
#[instrument(skip(state))]
pub async fn destroy(State(state): State<AppState>, Path(id): Path<ProductId>) -> StatusCode {
    if state.products().write().await.remove(id).is_some() {
        tracing::info!(product_id = %id, "product deleted");
    }
    StatusCode::NO_CONTENT
}
