//! # Product Routes
//!
//! CRUD over the product catalog. Reads need any session; mutations need
//! the admin role, checked by the [`AdminSession`] extractor before the
//! body is ever parsed.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::auth::{AdminSession, Session};
use crate::error::ApiError;
use crate::state::AppState;
use storefront_core::validation::{validate_product_patch, validate_product_payload};

/// Build the product router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// POST /products - Create a product. Admin only.
///
/// The payload is validated field by field (name, description, price -
/// first failure wins) so type mismatches report the offending field,
/// not a deserializer error.
async fn create_product(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = validate_product_payload(&payload)?;

    let product = state.db.products().insert(&draft).await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /products - List all products, insertion order. Any session.
async fn list_products(
    _session: Session,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let products = state.db.products().list().await?;

    Ok(Json(products))
}

/// GET /products/:id - Get one product. Any session.
async fn get_product(
    _session: Session,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let product = state
        .db
        .products()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", id))?;

    Ok(Json(product))
}

/// PUT /products/:id - Partially update a product. Admin only.
///
/// Existence is checked before field validation (after the admin gate):
/// an unknown id is 404 no matter what the payload looks like. Only
/// fields present in the payload are applied.
async fn update_product(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    if state.db.products().get_by_id(id).await?.is_none() {
        return Err(ApiError::not_found("Product", id));
    }

    let patch = validate_product_patch(&payload)?;

    let product = state.db.products().update(id, &patch).await?;

    Ok(Json(product))
}

/// DELETE /products/:id - Delete a product permanently. Admin only.
///
/// A product referenced by existing orders is not deletable (409).
async fn delete_product(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.products().delete(id).await?;

    Ok(Json(json!({ "message": "Product deleted successfully" })))
}
