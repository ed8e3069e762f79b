//! Domain types, separate from database row types.

pub mod cart;
pub mod order;
pub mod product;
pub mod user;

pub use cart::CartEntry;
pub use order::{Order, OrderItem, OrderWithOwner};
pub use product::Product;
pub use user::User;
