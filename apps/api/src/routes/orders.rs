//! # Order Routes
//!
//! Order creation and status updates. Any authenticated user may place an
//! order or update a status - deliberately weaker than product mutation.
//! There is no order listing route.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{post, put};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::auth::Session;
use crate::error::ApiError;
use crate::state::AppState;
use storefront_core::validation::validate_order_items;
use storefront_core::{Order, OrderItemDraft, OrderLine, ValidationError};

/// Build the order router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", post(create_order))
        .route("/orders/:id", put(update_order_status))
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Order response envelope: the order header with its expanded line
/// listing.
#[derive(Debug, Serialize)]
struct OrderResponse {
    id: i64,
    order_date: DateTime<Utc>,
    total_price: f64,
    status: String,
    products: Vec<OrderLine>,
}

impl OrderResponse {
    fn new(order: Order, products: Vec<OrderLine>) -> Self {
        OrderResponse {
            id: order.id,
            order_date: order.order_date,
            total_price: order.total_price,
            status: order.status,
            products,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /orders - Create an order from `{items: [{product_id, quantity}]}`.
///
/// The whole operation is atomic: if any referenced product is missing the
/// response is 404 and nothing is persisted. The total is computed from
/// prices read inside the transaction and frozen on the order.
async fn create_order(
    _session: Session,
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let items: Vec<OrderItemDraft> = match payload.get("items") {
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|_| ValidationError::InvalidField("items"))?,
        None => return Err(ValidationError::InvalidField("items").into()),
    };
    let items = validate_order_items(&items)?;

    let (order, lines) = state.db.orders().create(&items).await?;

    Ok((StatusCode::CREATED, Json(OrderResponse::new(order, lines))))
}

/// PUT /orders/:id - Replace the order status with `{status}`.
///
/// Any string is accepted; statuses are an open-ended label set with no
/// transition checking. 404 when the order does not exist, checked before
/// the body field.
async fn update_order_status(
    _session: Session,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    if state.db.orders().get_by_id(id).await?.is_none() {
        return Err(ApiError::not_found("Order", id));
    }

    let status = payload
        .get("status")
        .and_then(Value::as_str)
        .ok_or(ValidationError::InvalidField("status"))?;

    let order = state.db.orders().update_status(id, status).await?;
    let lines = state.db.orders().get_lines(id).await?;

    Ok(Json(OrderResponse::new(order, lines)))
}
