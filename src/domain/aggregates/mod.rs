//! Aggregates module
pub mod product;
pub mod order;

pub use product::Product;
pub use order::{Order, OrderLine};
