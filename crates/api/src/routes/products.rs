//! Product catalog route handlers.

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde::Serialize;
use serde_json::json;

use clementine_core::ProductId;

use crate::db::products::{ProductChanges, ProductRepository};
use crate::error::{ApiError, Result};
use crate::models::Product;
use crate::routes::absolute_image_url;
use crate::routes::forms::MultipartForm;
use crate::state::AppState;

/// Catalog fields returned by `GET /product` and `GET /product/{id}`.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: ProductId,
    pub product_name: String,
    pub product_price: i64,
    /// Absolute URL of the product image, or `null` if unset.
    pub product_image: Option<String>,
    /// Creation time, rendered as `YYYY-MM-DD HH:MM:SS`.
    pub created_at: String,
}

impl ProductResponse {
    fn render(product: Product, headers: &HeaderMap, state: &AppState) -> Self {
        let product_image = absolute_image_url(headers, state, product.image.as_deref());
        Self {
            id: product.id,
            product_name: product.name,
            product_price: product.price,
            product_image,
            created_at: product.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Create the product routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/product/add", post(add_product))
        .route("/product", get(list_products))
        .route("/product/{id}", get(get_product))
        .route("/product/update/{id}", put(update_product))
        .route("/product/delete/{id}", delete(delete_product))
}

/// Parse a multipart price field, rejecting non-numeric values.
fn parse_price(raw: &str) -> Result<i64> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::Validation("product_price must be an integer".to_string()))
}

/// Create a catalog entry from a multipart form.
async fn add_product(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let mut form = MultipartForm::collect(multipart).await?;

    let (Some(name), Some(raw_price)) = (form.text("product_name"), form.text("product_price"))
    else {
        return Err(ApiError::Validation(
            "Product name and price are required".to_string(),
        ));
    };
    let name = name.to_string();
    let price = parse_price(raw_price)?;

    let image = match form.take_file("product_image") {
        Some(upload) => Some(
            state
                .uploads()
                .save(&upload.file_name, &upload.bytes)
                .await
                .map_err(|e| ApiError::Validation(e.to_string()))?,
        ),
        None => None,
    };

    let product = ProductRepository::new(state.pool())
        .create(&name, price, image.as_deref())
        .await?;

    tracing::info!(product_id = %product.id, "product added");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Product added successfully", "id": product.id })),
    ))
}

/// Fetch the full catalog.
async fn list_products(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse> {
    let products = ProductRepository::new(state.pool()).list().await?;

    let body: Vec<ProductResponse> = products
        .into_iter()
        .map(|p| ProductResponse::render(p, &headers, &state))
        .collect();

    Ok(Json(body))
}

/// Fetch a single product.
async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    headers: HeaderMap,
) -> Result<impl IntoResponse> {
    let product = ProductRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    Ok(Json(ProductResponse::render(product, &headers, &state)))
}

/// Apply a partial catalog update from a multipart form.
///
/// Accepts `product_name`, `product_price`, and a `product_image` file. A
/// replaced image's old file is deleted from storage, matching the profile
/// update path.
async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let mut form = MultipartForm::collect(multipart).await?;

    let products = ProductRepository::new(state.pool());
    let existing = products
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    let mut changes = ProductChanges {
        name: form.text("product_name").map(ToString::to_string),
        ..ProductChanges::default()
    };

    if let Some(raw_price) = form.text("product_price") {
        changes.price = Some(parse_price(raw_price)?);
    }

    if let Some(upload) = form.take_file("product_image") {
        let stored = state
            .uploads()
            .save(&upload.file_name, &upload.bytes)
            .await
            .map_err(|e| ApiError::Validation(e.to_string()))?;
        changes.image = Some(stored);
    }

    products.update(id, &changes).await?;

    // The update succeeded; drop the file the new image replaced. Same
    // stored name means the write above already overwrote it in place.
    if let Some(new) = changes.image.as_deref()
        && let Some(old) = existing.image.as_deref()
        && old != new
    {
        state.uploads().remove(old).await;
    }

    Ok(Json(json!({ "message": "Product updated successfully" })))
}

/// Remove a product from the catalog.
///
/// Cart lines referencing it stay behind; cart reads skip them.
async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<impl IntoResponse> {
    ProductRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => {
                ApiError::NotFound("Product not found".to_string())
            }
            other => other.into(),
        })?;

    Ok(Json(json!({ "message": "Product deleted successfully" })))
}
