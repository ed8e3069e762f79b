//! CLI command implementations.

pub mod admin;
pub mod migrate;

use secrecy::SecretString;
use sqlx::SqlitePool;
use thiserror::Error;

/// Errors shared by the database-backed commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Auth error: {0}")]
    Auth(#[from] clementine_api::services::auth::AuthError),

    #[error("Repository error: {0}")]
    Repository(#[from] clementine_api::db::RepositoryError),
}

/// Connect to the configured database.
///
/// Reads `DATABASE_URL` (via `.env` if present), defaulting to the same
/// local file the API service uses.
pub(crate) async fn connect() -> Result<SqlitePool, CommandError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://clementine.db?mode=rwc".to_string());

    let pool = clementine_api::db::create_pool(&SecretString::from(database_url)).await?;
    Ok(pool)
}
