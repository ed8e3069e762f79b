//! Authentication route handlers: signup and login.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{ApiError, Result};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Signup/login request body.
///
/// Both fields are optional at the serde layer so that a missing field maps
/// to the documented validation message instead of a deserialization error.
#[derive(Debug, Deserialize)]
pub struct CredentialsPayload {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login response body.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Create the auth routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

/// Create a new account with role `customer`.
async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsPayload>,
) -> Result<impl IntoResponse> {
    let (Some(email), Some(password)) = (
        payload.email.filter(|e| !e.is_empty()),
        payload.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(ApiError::Validation(
            "email and password are required".to_string(),
        ));
    };

    let user = AuthService::new(state.pool())
        .register(&email, &password)
        .await?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User created successfully", "id": user.id })),
    ))
}

/// Verify credentials and issue a bearer token.
///
/// Unknown emails and wrong passwords are indistinguishable: both return 401
/// with the same message. Missing fields take the same path.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsPayload>,
) -> Result<impl IntoResponse> {
    let email = payload.email.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    let user = AuthService::new(state.pool())
        .login(&email, &password)
        .await?;

    let access_token = state
        .tokens()
        .issue(user.email.as_str())
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(TokenResponse { access_token }))
}
