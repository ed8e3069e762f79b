//! Order domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use clementine_core::{OrderId, OrderStatus, ProductId, UserId};

/// One purchased line inside an order's frozen snapshot.
///
/// This is the storage format of the `orders.items` JSON column: a
/// denormalized copy taken at placement time, so later catalog edits or
/// deletions never change order history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub product_price: i64,
    pub quantity: i64,
}

/// A placed order (domain type).
#[derive(Debug, Clone)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// The user who placed the order.
    pub user_id: UserId,
    /// Sum of `product_price * quantity` over the snapshot, at placement time.
    pub total_price: i64,
    /// Payment status.
    pub status: OrderStatus,
    /// Frozen snapshot of the purchased lines.
    pub items: Vec<OrderItem>,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
    /// When the order was last modified.
    pub updated_at: DateTime<Utc>,
}

/// An order joined with its owner's profile fields, for order listings.
#[derive(Debug, Clone)]
pub struct OrderWithOwner {
    pub order: Order,
    /// Owner's display name at read time.
    pub owner_name: Option<String>,
    /// Owner's address at read time.
    pub owner_address: Option<String>,
}
