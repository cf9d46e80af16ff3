//! Order service

use std::sync::Arc;

use tracing::{info, instrument};

use crate::domain::{Order, OrderId};
use crate::ports::OrderRepository;
use crate::services::{ProductOutcome, ProductService};
use crate::{InventoryError, Result};

#[derive(Clone)]
pub struct OrderService {
    db: Arc<dyn OrderRepository>,
    products: ProductService,
}

impl OrderService {
    pub fn new(db: Arc<dyn OrderRepository>, products: ProductService) -> Self { Self { db, products } }

    /// The order with its products, or `None`.
    pub async fn get_order(&self, order_id: OrderId) -> Result<Option<Order>> {
        self.db.find_order(order_id).await
    }

    /// Runs the product rules over every line of the order.
    #[instrument(skip(self))]
    pub async fn process_order(&self, order_id: OrderId) -> Result<Vec<ProductOutcome>> {
        let order = self.get_order(order_id).await?.ok_or(InventoryError::OrderNotFound(order_id))?;
        info!(lines = order.lines.len(), "processing order");
        self.products.process_products(&order.lines).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryOrderRepository, InMemoryProductRepository, Notification, RecordingNotificationService};
    use crate::domain::{Decision, Product, ProductId, ProductType};
    use crate::ports::FixedClock;
    use chrono::{Duration, TimeZone, Utc};

    struct Fixture {
        orders: Arc<InMemoryOrderRepository>,
        products: Arc<InMemoryProductRepository>,
        ns: Arc<RecordingNotificationService>,
        service: OrderService,
    }

    fn fixture() -> Fixture {
        let orders = Arc::new(InMemoryOrderRepository::new());
        let products = Arc::new(InMemoryProductRepository::new());
        let ns = Arc::new(RecordingNotificationService::new());
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
        let ps = ProductService::new(products.clone(), ns.clone()).with_clock(Arc::new(clock));
        let service = OrderService::new(orders.clone(), ps);
        Fixture { orders, products, ns, service }
    }

    #[tokio::test]
    async fn test_get_order() {
        let f = fixture();
        let order = Order::new(123).with_line(Product::new(1, "Product 1", ProductType::Normal), 1);
        f.orders.insert(order.clone());

        assert_eq!(f.service.get_order(OrderId(123)).await.unwrap(), Some(order));
        assert_eq!(f.service.get_order(OrderId(124)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_process_order() {
        let f = fixture();
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let cable = Product::new(1, "USB Cable", ProductType::Normal).with_stock(3);
        let milk = Product::new(2, "Milk", ProductType::Expirable).with_stock(5).with_expiry(now - Duration::days(2));
        let sled = Product::new(3, "Sled", ProductType::Normal).with_lead_time(7);
        for p in [&cable, &milk, &sled] {
            f.products.insert(p.clone());
        }
        f.orders.insert(Order::new(9).with_line(cable, 1).with_line(milk, 2).with_line(sled, 1));

        let outcomes = f.service.process_order(OrderId(9)).await.unwrap();

        let decisions: Vec<_> = outcomes.iter().map(|o| (o.product_id, o.decision.clone())).collect();
        assert_eq!(decisions, vec![
            (ProductId(1), Decision::Decrement),
            (ProductId(2), Decision::Expired { expiry_date: now - Duration::days(2) }),
            (ProductId(3), Decision::Delay { lead_time: 7 }),
        ]);
        assert_eq!(f.products.get(ProductId(1)).unwrap().available, 2);
        assert_eq!(f.products.get(ProductId(2)).unwrap().available, 0);
        assert_eq!(f.ns.sent().len(), 2);
        assert!(f.ns.sent().contains(&Notification::Delay { lead_time: 7, product_name: "Sled".into() }));
    }

    #[tokio::test]
    async fn test_process_missing_order() {
        let f = fixture();
        let result = f.service.process_order(OrderId(1)).await;
        assert!(matches!(result, Err(InventoryError::OrderNotFound(OrderId(1)))));
    }

    #[tokio::test]
    async fn test_process_empty_order() {
        let f = fixture();
        f.orders.insert(Order::new(2));
        assert!(f.service.process_order(OrderId(2)).await.unwrap().is_empty());
    }
}
