//! User repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use clementine_core::{Email, Role, UserId};

use super::{RepositoryError, conflict_on_unique};
use crate::models::User;

const USER_COLUMNS: &str =
    "id, full_name, email, phone, profile_image, address, role, created_at";

/// A partial profile update. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub password_hash: Option<String>,
    pub profile_image: Option<String>,
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: UserId,
    full_name: Option<String>,
    email: String,
    phone: Option<String>,
    profile_image: Option<String>,
    address: Option<String>,
    role: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> Result<User, RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let role = self
            .role
            .parse::<Role>()
            .map_err(RepositoryError::DataCorruption)?;

        Ok(User {
            id: self.id,
            full_name: self.full_name,
            email,
            phone: self.phone,
            profile_image: self.profile_image,
            address: self.address,
            role,
            created_at: self.created_at,
        })
    }
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user with email and password hash, role `customer`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already registered.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        email: &Email,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let row: UserRow = sqlx::query_as(
            "INSERT INTO users (email, password_hash, role, created_at)
             VALUES (?, ?, ?, ?)
             RETURNING id, full_name, email, phone, profile_image, address, role, created_at",
        )
        .bind(email.as_str())
        .bind(password_hash)
        .bind(Role::Customer.to_string())
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "email"))?;

        row.into_user()
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        row.map(UserRow::into_user).transpose()
    }

    /// Get a user by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
                .bind(email)
                .fetch_optional(self.pool)
                .await?;

        row.map(UserRow::into_user).transpose()
    }

    /// Get a user and their password hash by email.
    ///
    /// Returns `None` if no account exists for the email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_with_password_hash(
        &self,
        email: &str,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct UserWithHashRow {
            #[sqlx(flatten)]
            user: UserRow,
            password_hash: String,
        }

        let row: Option<UserWithHashRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS}, password_hash FROM users WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some((r.user.into_user()?, r.password_hash))),
            None => Ok(None),
        }
    }

    /// List all users, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let rows: Vec<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id ASC"))
                .fetch_all(self.pool)
                .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    /// Apply a partial profile update and return the updated user.
    ///
    /// Fields left as `None` keep their stored value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Conflict` if a unique column (email, phone)
    /// would be duplicated.
    pub async fn update(
        &self,
        id: UserId,
        changes: &UserChanges,
    ) -> Result<User, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(
            "UPDATE users SET
                 email = COALESCE(?, email),
                 full_name = COALESCE(?, full_name),
                 phone = COALESCE(?, phone),
                 address = COALESCE(?, address),
                 password_hash = COALESCE(?, password_hash),
                 profile_image = COALESCE(?, profile_image)
             WHERE id = ?
             RETURNING id, full_name, email, phone, profile_image, address, role, created_at",
        )
        .bind(changes.email.as_deref())
        .bind(changes.full_name.as_deref())
        .bind(changes.phone.as_deref())
        .bind(changes.address.as_deref())
        .bind(changes.password_hash.as_deref())
        .bind(changes.profile_image.as_deref())
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "field"))?;

        row.ok_or(RepositoryError::NotFound)?.into_user()
    }

    /// Set a user's role, looked up by email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no user has that email.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_role(&self, email: &str, role: Role) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE users SET role = ? WHERE email = ?")
            .bind(role.to_string())
            .bind(email)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
