//! Ports
//!
//! What the services need from the outside world. Postgres and logging
//! implementations live in `adapters`, alongside in-memory ones for tests
//! and local runs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Order, OrderId, Product};
use crate::Result;

/// Persistence port for product rows.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Overwrites the row with `product.id`.
    async fn update_product(&self, product: &Product) -> Result<()>;
}

/// Read side for orders.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// The order with every line's product row, or `None`.
    async fn find_order(&self, order_id: OrderId) -> Result<Option<Order>>;
}

/// Customer notification port.
#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn send_delay_notification(&self, lead_time: i32, product_name: &str) -> Result<()>;
    async fn send_out_of_stock_notification(&self, product_name: &str) -> Result<()>;
    async fn send_expiration_notification(&self, product_name: &str, expiry_date: DateTime<Utc>) -> Result<()>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> { Utc::now() }
}

/// Always reports the same instant.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> { self.0 }
}
