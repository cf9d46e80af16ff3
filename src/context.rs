//! Service wiring

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::adapters::{LogNotificationService, PgOrderRepository, PgProductRepository};
use crate::ports::NotificationService;
use crate::services::{OrderService, ProductService};
use crate::{Config, Result};

#[derive(Clone)]
pub struct ServiceContext {
    pub orders: OrderService,
}

impl ServiceContext {
    pub async fn connect(config: &Config) -> Result<Self> {
        let db = PgPoolOptions::new().max_connections(config.max_connections).connect(&config.database_url).await?;
        info!(max_connections = config.max_connections, "database pool ready");
        Ok(Self::with_pool(db, Arc::new(LogNotificationService)))
    }

    pub fn with_pool(db: PgPool, ns: Arc<dyn NotificationService>) -> Self {
        let products = ProductService::new(Arc::new(PgProductRepository::new(db.clone())), ns);
        let orders = OrderService::new(Arc::new(PgOrderRepository::new(db)), products);
        Self { orders }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_wires_postgres_adapters() {
        let pool = PgPoolOptions::new()
            .acquire_timeout(std::time::Duration::from_millis(200))
            .connect_lazy("postgres://127.0.0.1:1/inventory")
            .unwrap();
        let ctx = ServiceContext::with_pool(pool, Arc::new(LogNotificationService));
        let result = ctx.orders.get_order(crate::OrderId(1)).await;
        assert!(matches!(result, Err(crate::InventoryError::Storage(_))));
    }
}
