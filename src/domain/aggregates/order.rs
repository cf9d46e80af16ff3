//! Order Aggregate

use serde::{Deserialize, Serialize};

use crate::domain::aggregates::Product;
use crate::domain::value_objects::OrderId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub lines: Vec<OrderLine>,
}

/// One ordered product with its full catalog row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product: Product,
    pub quantity: i32,
}

impl Order {
    pub fn new(id: i32) -> Self { Self { id: OrderId(id), lines: vec![] } }

    pub fn with_line(mut self, product: Product, quantity: i32) -> Self {
        self.lines.push(OrderLine { product, quantity });
        self
    }
}

impl OrderLine {
    pub fn new(product: Product, quantity: i32) -> Self { Self { product, quantity } }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ProductType;

    #[test]
    fn test_order_lines() {
        let order = Order::new(123)
            .with_line(Product::new(1, "Product 1", ProductType::Normal), 2)
            .with_line(Product::new(2, "Product 2", ProductType::Seasonal), 1);
        assert_eq!(order.id, OrderId(123));
        assert_eq!(order.lines.len(), 2);
        assert_eq!(order.lines[1].product.product_type, ProductType::Seasonal);
        assert_eq!(order.lines[0].quantity, 2);
    }
}
