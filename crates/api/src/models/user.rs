//! User domain types.

use chrono::{DateTime, Utc};

use clementine_core::{Email, Role, UserId};

/// A store account (domain type).
///
/// The password hash never leaves the database layer; login verification
/// happens inside the auth service.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Optional display name.
    pub full_name: Option<String>,
    /// User's email address. Unique across all accounts.
    pub email: Email,
    /// Optional phone number. Unique when present.
    pub phone: Option<String>,
    /// Server-relative path of the profile image, if one was uploaded.
    pub profile_image: Option<String>,
    /// Optional shipping address.
    pub address: Option<String>,
    /// Account role.
    pub role: Role,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
