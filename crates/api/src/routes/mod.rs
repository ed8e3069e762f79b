//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                        - Liveness check
//! GET  /health/ready                  - Readiness check (database ping)
//!
//! # Auth
//! POST /signup                        - Create an account
//! POST /login                         - Issue a bearer token
//!
//! # Users
//! GET  /user/{id}                     - Profile
//! PUT  /user/{id}                     - Update profile (multipart, optional image)
//! GET  /users                         - List all users
//! PUT  /user/create-vendor/{email}    - Promote an account to vendor (admin)
//!
//! # Products
//! POST   /product/add                 - Create (multipart, optional image)
//! GET    /product                     - Full catalog
//! GET    /product/{id}                - Single product
//! PUT    /product/update/{id}         - Partial update (multipart)
//! DELETE /product/delete/{id}         - Delete
//!
//! # Cart (requires auth)
//! POST /cart/add                      - Add or overwrite a line (JSON)
//! GET  /cart                          - Cart with per-line and grand totals
//!
//! # Orders (requires auth)
//! POST /order                         - Place order from cart (atomic)
//! GET  /order                         - List own orders
//! PUT  /order/status/{id}             - Mark an order successful
//! ```

pub mod auth;
pub mod cart;
pub mod forms;
pub mod orders;
pub mod products;
pub mod users;

use axum::Router;
use axum::http::{HeaderMap, header::HOST};

use crate::state::AppState;

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::routes())
        .merge(users::routes())
        .merge(products::routes())
        .merge(cart::routes())
        .merge(orders::routes())
}

/// Render a stored server-relative image path as an absolute URL.
///
/// Prefers the request's own Host header (the stored path stays relative so
/// the public hostname can change); falls back to the configured base URL.
pub(crate) fn absolute_image_url(
    headers: &HeaderMap,
    state: &AppState,
    stored: Option<&str>,
) -> Option<String> {
    let stored = stored?;
    let base = headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .map_or_else(
            || state.config().base_url.trim_end_matches('/').to_string(),
            |host| format!("http://{host}"),
        );
    Some(format!("{base}/{stored}"))
}
