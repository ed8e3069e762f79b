//! Product domain types.

use chrono::{DateTime, Utc};

use clementine_core::ProductId;

/// A catalog entry (domain type).
#[derive(Debug, Clone)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Product name. Unique across the catalog.
    pub name: String,
    /// Server-relative path of the product image, if one was uploaded.
    pub image: Option<String>,
    /// Unit price in the store's smallest currency unit.
    pub price: i64,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
}
