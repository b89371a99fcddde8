//! Order route handlers.
//!
//! Responses are projections of the stored [`Order`]: line identifiers and
//! totals stay internal.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use bugstore_core::{CustomerId, OrderId, ProductId};

use crate::error::{AppError, Result};
use crate::models::{NewOrder, Order, OrderLine};
use crate::state::AppState;

/// Create the orders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/orders", post(create))
        .route("/v1/orders/{id}", get(show))
}

/// A line as shown to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineView {
    pub product_id: ProductId,
    pub quantity: i32,
}

impl From<&OrderLine> for OrderLineView {
    fn from(line: &OrderLine) -> Self {
        Self {
            product_id: line.product_id,
            quantity: line.quantity,
        }
    }
}

/// Response body for a newly placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreated {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<OrderLineView>,
}

impl From<&Order> for OrderCreated {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            customer_id: order.customer_id,
            created_at: order.created_at,
            lines: order.lines.iter().map(OrderLineView::from).collect(),
        }
    }
}

/// Response body for an order lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub lines: Vec<OrderLineView>,
}

impl From<&Order> for OrderDetail {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            customer_id: order.customer_id,
            created_at: order.created_at,
            updated_at: order.updated_at,
            lines: order.lines.iter().map(OrderLineView::from).collect(),
        }
    }
}

/// Place an order.
///
/// POST /v1/orders
///
/// Lines referencing unknown products are dropped from the order.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if a line or order total is out of range,
/// `AppError::Database` if a lookup or the commit fails.
#[instrument(skip(state, input))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewOrder>,
) -> Result<impl IntoResponse> {
    let placed = state.orders().create(input).await?;
    let location = format!("/v1/orders/{}", placed.order.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(OrderCreated::from(&placed.order)),
    ))
}

/// Get an order.
///
/// GET /v1/orders/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` if no order has this identifier.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderDetail>> {
    state
        .orders()
        .get_by_id(id)
        .await?
        .map(|order| Json(OrderDetail::from(&order)))
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))
}
