//! Authentication extractors.
//!
//! Identity travels as a bearer token whose subject is the user's email; the
//! extractor re-loads the account from the database on every request, so the
//! caller's current role is always authoritative.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::db::users::UserRepository;
use crate::error::ApiError;
use crate::models::User;
use crate::services::token::token_from_header;
use crate::state::AppState;

/// Extractor that requires a valid bearer token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     CurrentUser(user): CurrentUser,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

        let token = token_from_header(header)
            .map_err(|_| ApiError::Unauthorized("Malformed authorization header".to_string()))?;

        let claims = state
            .tokens()
            .verify(token)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

        let user = UserRepository::new(state.pool())
            .get_by_email(&claims.sub)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Unknown user".to_string()))?;

        Ok(Self(user))
    }
}
