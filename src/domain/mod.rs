//! Domain layer
pub mod aggregates;
pub mod rules;
pub mod value_objects;

pub use aggregates::{Order, OrderLine, Product};
pub use rules::Decision;
pub use value_objects::{OrderId, ProductId, ProductType};
