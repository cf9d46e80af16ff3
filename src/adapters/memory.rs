//! In-memory adapters for tests and local runs.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Order, OrderId, Product, ProductId};
use crate::ports::{NotificationService, OrderRepository, ProductRepository};
use crate::{InventoryError, Result};

#[derive(Debug, Default)]
struct ProductState {
    rows: HashMap<ProductId, Product>,
    updates: usize,
    fail_on_update: bool,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryProductRepository {
    state: Arc<RwLock<ProductState>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&self, product: Product) {
        self.state.write().unwrap_or_else(PoisonError::into_inner).rows.insert(product.id, product);
    }

    pub fn get(&self, id: ProductId) -> Option<Product> {
        self.state.read().unwrap_or_else(PoisonError::into_inner).rows.get(&id).cloned()
    }

    /// Number of successful writes.
    pub fn update_count(&self) -> usize {
        self.state.read().unwrap_or_else(PoisonError::into_inner).updates
    }

    /// Makes every following write fail with a storage error.
    pub fn set_fail_on_update(&self, fail: bool) {
        self.state.write().unwrap_or_else(PoisonError::into_inner).fail_on_update = fail;
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn update_product(&self, product: &Product) -> Result<()> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.fail_on_update {
            return Err(InventoryError::Storage(sqlx::Error::PoolClosed));
        }
        let row = state.rows.get_mut(&product.id).ok_or(InventoryError::ProductNotFound(product.id))?;
        *row = product.clone();
        state.updates += 1;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&self, order: Order) {
        self.orders.write().unwrap_or_else(PoisonError::into_inner).insert(order.id, order);
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn find_order(&self, order_id: OrderId) -> Result<Option<Order>> {
        Ok(self.orders.read().unwrap_or_else(PoisonError::into_inner).get(&order_id).cloned())
    }
}

/// A notification as it was handed to the port.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    Delay { lead_time: i32, product_name: String },
    OutOfStock { product_name: String },
    Expiration { product_name: String, expiry_date: DateTime<Utc> },
}

#[derive(Debug, Default)]
struct NotificationState {
    sent: Vec<Notification>,
    fail: bool,
}

/// Keeps every notification instead of delivering it.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotificationService {
    state: Arc<RwLock<NotificationState>>,
}

impl RecordingNotificationService {
    pub fn new() -> Self { Self::default() }

    pub fn sent(&self) -> Vec<Notification> {
        self.state.read().unwrap_or_else(PoisonError::into_inner).sent.clone()
    }

    pub fn set_fail(&self, fail: bool) {
        self.state.write().unwrap_or_else(PoisonError::into_inner).fail = fail;
    }

    fn record(&self, n: Notification) -> Result<()> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.fail {
            return Err(InventoryError::Notification("recording service set to fail".into()));
        }
        state.sent.push(n);
        Ok(())
    }
}

#[async_trait]
impl NotificationService for RecordingNotificationService {
    async fn send_delay_notification(&self, lead_time: i32, product_name: &str) -> Result<()> {
        self.record(Notification::Delay { lead_time, product_name: product_name.to_string() })
    }

    async fn send_out_of_stock_notification(&self, product_name: &str) -> Result<()> {
        self.record(Notification::OutOfStock { product_name: product_name.to_string() })
    }

    async fn send_expiration_notification(&self, product_name: &str, expiry_date: DateTime<Utc>) -> Result<()> {
        self.record(Notification::Expiration { product_name: product_name.to_string(), expiry_date })
    }
}
