//! Inventory rules
//!
//! Stock decisions for ecommerce order processing.
//!
//! ## Features
//! - Per-type product rules (normal, seasonal, expirable, flash sale)
//! - Stock decrement, delay and out-of-stock handling
//! - Customer notifications through a pluggable port
//! - Postgres persistence and order lookup

use thiserror::Error;

pub mod adapters;
pub mod config;
pub mod context;
pub mod domain;
pub mod ports;
pub mod services;

pub use config::Config;
pub use context::ServiceContext;
pub use domain::{Decision, Order, OrderId, OrderLine, Product, ProductId, ProductType};
pub use services::{OrderService, ProductOutcome, ProductService};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    #[error("Product {product_id} has no {field}")]
    MissingSchedule { product_id: ProductId, field: &'static str },

    #[error("Invalid product: {0}")]
    InvalidProduct(String),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, InventoryError>;
