//! Bearer-token issuing and verification.
//!
//! Tokens are HS256 JWTs whose subject claim is the user's **email**; the
//! authenticated user is re-loaded from the database on each request, so role
//! changes take effect without re-login.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by a bearer token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: the user's email address.
    pub sub: String,
    /// Issued-at timestamp (seconds).
    pub iat: i64,
    /// Expiration timestamp (seconds).
    pub exp: i64,
}

/// Errors that can occur during token operations.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to encode token: {0}")]
    Encoding(String),
    #[error("invalid or expired token")]
    Invalid,
    #[error("malformed authorization header")]
    MalformedHeader,
}

/// Issues and verifies bearer tokens.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    /// Create a token service from the signing secret and lifetime.
    #[must_use]
    pub fn new(secret: &SecretString, ttl_hours: i64) -> Self {
        let secret = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Issue a token for the given email.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Encoding` if signing fails.
    pub fn issue(&self, email: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: email.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )
        .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Invalid` if the signature is wrong or the token
    /// has expired.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(
            token,
            &self.decoding_key,
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
        .map_err(|_| TokenError::Invalid)
    }
}

/// Extract the raw token from an `Authorization: Bearer <token>` header value.
///
/// # Errors
///
/// Returns `TokenError::MalformedHeader` if the value has no `Bearer` prefix.
pub fn token_from_header(header: &str) -> Result<&str, TokenError> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(TokenError::MalformedHeader)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        let secret = SecretString::from("kX9mP2vQ7wR4zT6yU8aB3cD5eF1gH0jL".to_string());
        TokenService::new(&secret, 24)
    }

    #[test]
    fn test_issue_verify_roundtrip() {
        let tokens = service();
        let token = tokens.issue("user@example.com").unwrap();
        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.sub, "user@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_rejects_tampered_token() {
        let tokens = service();
        let mut token = tokens.issue("user@example.com").unwrap();
        token.push('x');
        assert!(matches!(tokens.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_verify_rejects_foreign_secret() {
        let tokens = service();
        let other = TokenService::new(
            &SecretString::from("a-completely-different-secret-value".to_string()),
            24,
        );
        let token = other.issue("user@example.com").unwrap();
        assert!(matches!(tokens.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_token_from_header() {
        assert_eq!(token_from_header("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
        assert!(token_from_header("Basic abc").is_err());
        assert!(token_from_header("Bearer ").is_err());
        assert!(token_from_header("abc.def.ghi").is_err());
    }
}
