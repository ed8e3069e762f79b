//! Shopping cart route handlers. All routes require authentication.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use clementine_core::ProductId;

use crate::db::{CartRepository, ProductRepository};
use crate::error::{ApiError, Result};
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// `POST /cart/add` request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartPayload {
    pub product_id: Option<ProductId>,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

const fn default_quantity() -> i64 {
    1
}

/// One line of the cart view.
#[derive(Debug, Serialize)]
pub struct CartLineResponse {
    pub product_id: ProductId,
    pub product_name: String,
    pub product_price: i64,
    pub quantity: i64,
    /// `product_price * quantity`.
    pub total: i64,
}

/// `GET /cart` response body.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub cart: Vec<CartLineResponse>,
    /// Sum of the line totals. No tax or discount logic yet.
    pub grand_total: i64,
}

/// Create the cart routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cart/add", post(add_to_cart))
        .route("/cart", get(get_cart))
}

/// Add a product to the caller's cart.
///
/// A second add for the same product overwrites the line's quantity rather
/// than accumulating.
async fn add_to_cart(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<AddToCartPayload>,
) -> Result<impl IntoResponse> {
    let product_id = payload
        .product_id
        .ok_or_else(|| ApiError::Validation("Product ID is required".to_string()))?;

    ProductRepository::new(state.pool())
        .get(product_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    CartRepository::new(state.pool())
        .upsert_line(user.id, product_id, payload.quantity)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Product added to cart successfully" })),
    ))
}

/// Read the caller's cart with computed totals.
///
/// Lines whose product has been deleted are omitted. An empty cart returns
/// an informational message, not an error.
async fn get_cart(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse> {
    let entries = CartRepository::new(state.pool()).entries(user.id).await?;

    if entries.is_empty() {
        return Ok(Json(json!({ "message": "Cart is empty" })).into_response());
    }

    let cart: Vec<CartLineResponse> = entries
        .into_iter()
        .map(|e| CartLineResponse {
            total: e.line_total(),
            product_id: e.product_id,
            product_name: e.product_name,
            product_price: e.product_price,
            quantity: e.quantity,
        })
        .collect();
    let grand_total = cart.iter().map(|l| l.total).sum();

    Ok(Json(CartResponse { cart, grand_total }).into_response())
}
