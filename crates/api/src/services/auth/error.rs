//! Authentication error types.

use thiserror::Error;

use clementine_core::EmailError;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The email is already registered.
    #[error("email already registered")]
    EmailTaken,

    /// Wrong email or password. Deliberately indistinguishable.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The email failed structural validation.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Password hashing failed.
    #[error("password hashing failed")]
    PasswordHash,

    /// Database operation failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}
