//! Adapters for the service ports
pub mod memory;
pub mod notifications;
pub mod postgres;

pub use notifications::LogNotificationService;
pub use postgres::{PgOrderRepository, PgProductRepository};
