//! Cart domain types.

use clementine_core::ProductId;

/// A cart line joined with its product (domain type).
///
/// Lines whose product has been deleted from the catalog are omitted by the
/// repository, so every entry here carries live product data.
#[derive(Debug, Clone)]
pub struct CartEntry {
    /// The referenced product.
    pub product_id: ProductId,
    /// Product name at read time.
    pub product_name: String,
    /// Unit price at read time.
    pub product_price: i64,
    /// Quantity in the cart.
    pub quantity: i64,
}

impl CartEntry {
    /// Line total: unit price times quantity.
    #[must_use]
    pub const fn line_total(&self) -> i64 {
        self.product_price * self.quantity
    }
}
