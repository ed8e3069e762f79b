//! User profile route handlers.

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::HeaderMap,
    response::IntoResponse,
    routing::{get, put},
};
use serde::Serialize;
use serde_json::json;

use clementine_core::{Email, Role, UserId};

use crate::db::RepositoryError;
use crate::db::users::{UserChanges, UserRepository};
use crate::error::{ApiError, Result};
use crate::middleware::CurrentUser;
use crate::models::User;
use crate::routes::absolute_image_url;
use crate::routes::forms::MultipartForm;
use crate::services::auth::hash_password;
use crate::state::AppState;

/// Profile fields returned by `GET /user/{id}` and `GET /users`.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub full_name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    /// Absolute URL of the profile image, or `null` if unset.
    pub profile: Option<String>,
    pub address: Option<String>,
    pub role: Role,
}

impl UserResponse {
    fn render(user: User, headers: &HeaderMap, state: &AppState) -> Self {
        let profile = absolute_image_url(headers, state, user.profile_image.as_deref());
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email.into_inner(),
            phone: user.phone,
            profile,
            address: user.address,
            role: user.role,
        }
    }
}

/// Create the user routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/user/{id}", get(get_user).put(update_user))
        .route("/users", get(list_users))
        .route("/user/create-vendor/{email}", put(create_vendor))
}

/// Fetch a single profile.
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    headers: HeaderMap,
) -> Result<impl IntoResponse> {
    let user = UserRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse::render(user, &headers, &state)))
}

/// List every profile. Unauthenticated, same shape as `get_user`.
async fn list_users(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse> {
    let users = UserRepository::new(state.pool()).list().await?;

    let body: Vec<UserResponse> = users
        .into_iter()
        .map(|u| UserResponse::render(u, &headers, &state))
        .collect();

    Ok(Json(body))
}

/// Apply a partial profile update from a multipart form.
///
/// Accepts `email`, `phone`, `address`, `full_name`, `password` (re-hashed),
/// and a `profile` file. A replaced profile image's old file is deleted from
/// storage.
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let mut form = MultipartForm::collect(multipart).await?;

    let users = UserRepository::new(state.pool());
    let existing = users
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let email = form
        .text("email")
        .map(|e| {
            Email::parse(e)
                .map(Email::into_inner)
                .map_err(|err| ApiError::Validation(err.to_string()))
        })
        .transpose()?;

    let mut changes = UserChanges {
        email,
        full_name: form.text("full_name").map(ToString::to_string),
        phone: form.text("phone").map(ToString::to_string),
        address: form.text("address").map(ToString::to_string),
        ..UserChanges::default()
    };

    if let Some(password) = form.text("password") {
        changes.password_hash = Some(hash_password(password)?);
    }

    if let Some(upload) = form.take_file("profile") {
        let stored = state
            .uploads()
            .save(&upload.file_name, &upload.bytes)
            .await
            .map_err(|e| ApiError::Validation(e.to_string()))?;
        changes.profile_image = Some(stored);
    }

    users.update(id, &changes).await.map_err(|e| match e {
        RepositoryError::Conflict(_) => ApiError::Conflict("must be unique".to_string()),
        other => other.into(),
    })?;

    // The update succeeded; drop the file the new image replaced. Same
    // stored name means the write above already overwrote it in place.
    if let Some(new) = changes.profile_image.as_deref()
        && let Some(old) = existing.profile_image.as_deref()
        && old != new
    {
        state.uploads().remove(old).await;
    }

    Ok(Json(json!({ "message": "User updated successfully" })))
}

/// Promote the target account to `vendor`. Admin only.
async fn create_vendor(
    State(state): State<AppState>,
    Path(email): Path<String>,
    CurrentUser(caller): CurrentUser,
) -> Result<impl IntoResponse> {
    let users = UserRepository::new(state.pool());

    // Target existence is checked before the caller's role: a non-admin
    // probing an unknown email sees 404, not 403.
    let target = users
        .get_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::NotFound("No user found with this email".to_string()))?;

    if !caller.role.is_admin() {
        return Err(ApiError::Forbidden(
            "You are not authorized for this action".to_string(),
        ));
    }

    users.set_role(target.email.as_str(), Role::Vendor).await?;

    tracing::info!(target = %target.id, admin = %caller.id, "user promoted to vendor");

    Ok(Json(json!({ "message": "User promoted to vendor" })))
}
