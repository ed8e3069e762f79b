//! Order route handlers. All routes require authentication.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde::Serialize;
use serde_json::json;

use clementine_core::{OrderId, OrderStatus};

use crate::db::{OrderRepository, RepositoryError};
use crate::error::{ApiError, Result};
use crate::middleware::CurrentUser;
use crate::models::{OrderItem, OrderWithOwner};
use crate::state::AppState;

/// `POST /order` response body.
#[derive(Debug, Serialize)]
pub struct PlacedOrderResponse {
    pub order_id: OrderId,
    pub total_price: i64,
    pub payment_status: OrderStatus,
    pub cart_items: Vec<OrderItem>,
}

/// One entry of the `GET /order` listing.
#[derive(Debug, Serialize)]
pub struct OrderListEntry {
    pub id: OrderId,
    pub full_name: Option<String>,
    pub address: Option<String>,
    pub payment_status: OrderStatus,
    pub total_price: i64,
    pub items: Vec<OrderItem>,
}

impl From<OrderWithOwner> for OrderListEntry {
    fn from(owned: OrderWithOwner) -> Self {
        Self {
            id: owned.order.id,
            full_name: owned.owner_name,
            address: owned.owner_address,
            payment_status: owned.order.status,
            total_price: owned.order.total_price,
            items: owned.order.items,
        }
    }
}

/// Create the order routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/order", post(place_order).get(get_orders))
        .route("/order/status/{id}", put(update_order_status))
}

/// Snapshot the caller's cart into an order and clear the cart.
///
/// Order creation and cart clearing share one transaction: both succeed or
/// both fail.
async fn place_order(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse> {
    let order = OrderRepository::new(state.pool())
        .place(user.id)
        .await?
        .ok_or_else(|| ApiError::Validation("Cart is empty".to_string()))?;

    tracing::info!(order_id = %order.id, user_id = %user.id, total = order.total_price, "order placed");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Order placed successfully",
            "order": PlacedOrderResponse {
                order_id: order.id,
                total_price: order.total_price,
                payment_status: order.status,
                cart_items: order.items,
            },
        })),
    ))
}

/// List the caller's orders with the frozen item snapshots.
///
/// No orders is an informational message, not an error.
async fn get_orders(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse> {
    let orders = OrderRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;

    if orders.is_empty() {
        // Compatibility string; existing clients match on it verbatim.
        return Ok(
            Json(json!({ "message": "No Order Found Have One Please." })).into_response()
        );
    }

    let body: Vec<OrderListEntry> = orders.into_iter().map(Into::into).collect();

    Ok(Json(body).into_response())
}

/// Mark an order successful.
///
/// Authentication is required but neither ownership nor an admin role is
/// checked; the status is overwritten unconditionally.
async fn update_order_status(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<OrderId>,
) -> Result<impl IntoResponse> {
    OrderRepository::new(state.pool())
        .set_status(id, OrderStatus::Success)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => ApiError::NotFound("Order not found".to_string()),
            other => other.into(),
        })?;

    Ok(Json(json!({ "message": "Order status updated" })))
}
