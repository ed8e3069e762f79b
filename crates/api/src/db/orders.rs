//! Order repository for database operations.
//!
//! Order placement is the one multi-statement write in the system: the order
//! insert and the cart clear share a transaction and either both commit or
//! both roll back.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use sqlx::types::Json;

use clementine_core::{OrderId, OrderStatus, UserId};

use super::RepositoryError;
use crate::models::{Order, OrderItem, OrderWithOwner};

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    user_id: UserId,
    total_price: i64,
    status: String,
    items: Json<Vec<OrderItem>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self) -> Result<Order, RepositoryError> {
        let status = self
            .status
            .parse::<OrderStatus>()
            .map_err(RepositoryError::DataCorruption)?;

        Ok(Order {
            id: self.id,
            user_id: self.user_id,
            total_price: self.total_price,
            status,
            items: self.items.0,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SnapshotRow {
    product_id: clementine_core::ProductId,
    product_name: String,
    product_price: i64,
    quantity: i64,
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Place an order from the user's current cart.
    ///
    /// Within one transaction: snapshots the cart lines (skipping lines whose
    /// product has been deleted), inserts a `Pending` order with the summed
    /// total, and clears the cart. Returns `None` without writing anything if
    /// the cart holds no lines at all.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; the
    /// transaction is rolled back and no partial state is left behind.
    pub async fn place(&self, user_id: UserId) -> Result<Option<Order>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        // The empty-cart check counts raw lines: a cart holding only lines
        // whose product was deleted still produces an (empty, zero-total)
        // order and gets cleared.
        let line_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM cart_lines WHERE user_id = ?")
                .bind(user_id)
                .fetch_one(&mut *tx)
                .await?;

        if line_count == 0 {
            return Ok(None);
        }

        let lines: Vec<SnapshotRow> = sqlx::query_as(
            "SELECT p.id AS product_id, p.name AS product_name,
                    p.price AS product_price, c.quantity
             FROM cart_lines c
             JOIN products p ON p.id = c.product_id
             WHERE c.user_id = ?
             ORDER BY c.id ASC",
        )
        .bind(user_id)
        .fetch_all(&mut *tx)
        .await?;

        let items: Vec<OrderItem> = lines
            .into_iter()
            .map(|l| OrderItem {
                product_id: l.product_id,
                product_name: l.product_name,
                product_price: l.product_price,
                quantity: l.quantity,
            })
            .collect();
        let total_price: i64 = items
            .iter()
            .map(|i| i.product_price * i.quantity)
            .sum();

        let now = Utc::now();
        let row: OrderRow = sqlx::query_as(
            "INSERT INTO orders (user_id, total_price, status, items, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING id, user_id, total_price, status, items, created_at, updated_at",
        )
        .bind(user_id)
        .bind(total_price)
        .bind(OrderStatus::Pending.to_string())
        .bind(Json(&items))
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM cart_lines WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        row.into_order().map(Some)
    }

    /// List a user's orders joined with their profile fields, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<OrderWithOwner>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct OwnedOrderRow {
            #[sqlx(flatten)]
            order: OrderRow,
            full_name: Option<String>,
            address: Option<String>,
        }

        let rows: Vec<OwnedOrderRow> = sqlx::query_as(
            "SELECT o.id, o.user_id, o.total_price, o.status, o.items,
                    o.created_at, o.updated_at, u.full_name, u.address
             FROM orders o
             JOIN users u ON u.id = o.user_id
             WHERE o.user_id = ?
             ORDER BY o.id ASC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter()
            .map(|r| {
                Ok(OrderWithOwner {
                    order: r.order.into_order()?,
                    owner_name: r.full_name,
                    owner_address: r.address,
                })
            })
            .collect()
    }

    /// Set an order's status and bump its `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE orders SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status.to_string())
            .bind(Utc::now())
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
