//! Application services
pub mod order;
pub mod product;

pub use order::OrderService;
pub use product::{ProductOutcome, ProductService};
