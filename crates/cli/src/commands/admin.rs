//! Admin user management commands.
//!
//! # Usage
//!
//! ```bash
//! clementine-cli admin create -e admin@example.com -p <password>
//! ```
//!
//! There is no signup path that yields an admin account; this command is how
//! the first (and every) admin comes to exist.

use clementine_core::Role;

use clementine_api::db::users::UserRepository;
use clementine_api::services::auth::AuthService;

use super::CommandError;

/// Create an admin account.
///
/// Registers the account like a normal signup (hashed password, role
/// `customer`) and then promotes it to `admin`.
///
/// # Errors
///
/// Returns `CommandError` if the email is already registered or the database
/// is unreachable.
pub async fn create_user(email: &str, password: &str) -> Result<(), CommandError> {
    let pool = super::connect().await?;

    // Make sure the schema exists before touching the users table.
    clementine_api::db::MIGRATOR.run(&pool).await?;

    let user = AuthService::new(&pool).register(email, password).await?;
    UserRepository::new(&pool)
        .set_role(user.email.as_str(), Role::Admin)
        .await?;

    tracing::info!(user_id = %user.id, email = %user.email, "admin user created");
    Ok(())
}
