//! Cart repository for database operations.

use chrono::Utc;
use sqlx::SqlitePool;

use clementine_core::{ProductId, UserId};

use super::RepositoryError;
use crate::models::CartEntry;

#[derive(sqlx::FromRow)]
struct CartEntryRow {
    product_id: ProductId,
    product_name: String,
    product_price: i64,
    quantity: i64,
}

impl From<CartEntryRow> for CartEntry {
    fn from(row: CartEntryRow) -> Self {
        Self {
            product_id: row.product_id,
            product_name: row.product_name,
            product_price: row.product_price,
            quantity: row.quantity,
        }
    }
}

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Add a product to a user's cart, or overwrite the quantity of the
    /// existing line for the same product.
    ///
    /// The overwrite (rather than accumulate) semantics lean on the
    /// `UNIQUE (user_id, product_id)` constraint.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert_line(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO cart_lines (user_id, product_id, quantity, created_at)
             VALUES (?, ?, ?, ?)
             ON CONFLICT (user_id, product_id)
             DO UPDATE SET quantity = excluded.quantity",
        )
        .bind(user_id)
        .bind(product_id)
        .bind(quantity)
        .bind(Utc::now())
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Read a user's cart joined with live product data.
    ///
    /// Lines whose product has been deleted from the catalog are omitted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn entries(&self, user_id: UserId) -> Result<Vec<CartEntry>, RepositoryError> {
        let rows: Vec<CartEntryRow> = sqlx::query_as(
            "SELECT p.id AS product_id, p.name AS product_name,
                    p.price AS product_price, c.quantity
             FROM cart_lines c
             JOIN products p ON p.id = c.product_id
             WHERE c.user_id = ?
             ORDER BY c.id ASC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
