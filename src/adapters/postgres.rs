//! Postgres adapters
//!
//! Expects the `products`, `orders` and `order_products` tables; creating
//! and migrating them is left to the owning application.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;

use crate::domain::{Order, OrderId, OrderLine, Product, ProductId};
use crate::ports::{OrderRepository, ProductRepository};
use crate::{InventoryError, Result};

const PRODUCT_COLUMNS: &str = "p.id, p.name, p.\"type\", p.available, p.lead_time, p.expiry_date, \
     p.season_start_date, p.season_end_date, p.flash_sale_start_date, p.flash_sale_end_date";

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: i32,
    pub name: String,
    #[sqlx(rename = "type")]
    pub product_type: String,
    pub available: i32,
    pub lead_time: i32,
    pub expiry_date: Option<DateTime<Utc>>,
    pub season_start_date: Option<DateTime<Utc>>,
    pub season_end_date: Option<DateTime<Utc>>,
    pub flash_sale_start_date: Option<DateTime<Utc>>,
    pub flash_sale_end_date: Option<DateTime<Utc>>,
}

impl From<ProductRow> for Product {
    fn from(r: ProductRow) -> Self {
        Self {
            id: ProductId(r.id), name: r.name, product_type: r.product_type.into(),
            available: r.available, lead_time: r.lead_time, expiry_date: r.expiry_date,
            season_start_date: r.season_start_date, season_end_date: r.season_end_date,
            flash_sale_start_date: r.flash_sale_start_date, flash_sale_end_date: r.flash_sale_end_date,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderLineRow {
    quantity: i32,
    #[sqlx(flatten)]
    product: ProductRow,
}

#[derive(Clone)]
pub struct PgProductRepository { pool: PgPool }

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self { Self { pool } }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn update_product(&self, p: &Product) -> Result<()> {
        let result = sqlx::query(
            "UPDATE products SET name = $2, \"type\" = $3, available = $4, lead_time = $5, expiry_date = $6, \
             season_start_date = $7, season_end_date = $8, flash_sale_start_date = $9, flash_sale_end_date = $10 \
             WHERE id = $1",
        )
        .bind(p.id.0).bind(&p.name).bind(p.product_type.as_str()).bind(p.available).bind(p.lead_time)
        .bind(p.expiry_date).bind(p.season_start_date).bind(p.season_end_date)
        .bind(p.flash_sale_start_date).bind(p.flash_sale_end_date)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(InventoryError::ProductNotFound(p.id));
        }
        debug!(product_id = %p.id, available = p.available, lead_time = p.lead_time, "product updated");
        Ok(())
    }
}

#[derive(Clone)]
pub struct PgOrderRepository { pool: PgPool }

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self { Self { pool } }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn find_order(&self, order_id: OrderId) -> Result<Option<Order>> {
        let exists: Option<(i32,)> = sqlx::query_as("SELECT id FROM orders WHERE id = $1")
            .bind(order_id.0)
            .fetch_optional(&self.pool)
            .await?;
        if exists.is_none() {
            return Ok(None);
        }

        let sql = format!(
            "SELECT op.quantity, {PRODUCT_COLUMNS} FROM order_products op \
             JOIN products p ON p.id = op.product_id WHERE op.order_id = $1 ORDER BY p.id"
        );
        let rows = sqlx::query_as::<_, OrderLineRow>(&sql).bind(order_id.0).fetch_all(&self.pool).await?;

        let lines = rows.into_iter().map(|r| OrderLine::new(r.product.into(), r.quantity)).collect();
        Ok(Some(Order { id: order_id, lines }))
    }
}
