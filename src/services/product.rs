//! Product service
//!
//! Runs the product rules against order lines and carries out each
//! decision: the updated row is written first, then the customer is
//! notified.

use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::domain::rules::{self, Decision};
use crate::domain::{OrderLine, Product, ProductId, ProductType};
use crate::ports::{Clock, NotificationService, ProductRepository, SystemClock};
use crate::Result;

/// What happened to one processed line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProductOutcome {
    pub product_id: ProductId,
    pub product_type: ProductType,
    #[serde(flatten)]
    pub decision: Decision,
}

#[derive(Clone)]
pub struct ProductService {
    db: Arc<dyn ProductRepository>,
    ns: Arc<dyn NotificationService>,
    clock: Arc<dyn Clock>,
}

impl ProductService {
    pub fn new(db: Arc<dyn ProductRepository>, ns: Arc<dyn NotificationService>) -> Self {
        Self { db, ns, clock: Arc::new(SystemClock) }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self { self.clock = clock; self }

    /// Decides every line before writing anything, so a line the rules
    /// reject fails the batch with no row changed. The decisions are then
    /// carried out concurrently; every line runs to completion and the first
    /// failure, if any, is returned.
    #[instrument(skip_all, fields(run_id = %Uuid::now_v7(), lines = lines.len()))]
    pub async fn process_products(&self, lines: &[OrderLine]) -> Result<Vec<ProductOutcome>> {
        let now = self.clock.now();
        let decisions = lines.iter().map(|line| rules::evaluate(&line.product, now)).collect::<Result<Vec<_>>>()?;

        let results = join_all(lines.iter().zip(&decisions).map(|(line, d)| self.carry_out(&line.product, d))).await;
        let mut failure = None;
        for (line, result) in lines.iter().zip(results) {
            if let Err(e) = result {
                warn!(product_id = %line.product.id, error = %e, "line failed");
                failure.get_or_insert(e);
            }
        }
        if let Some(e) = failure {
            return Err(e);
        }

        let outcomes: Vec<ProductOutcome> = lines
            .iter()
            .zip(decisions)
            .map(|(line, decision)| ProductOutcome {
                product_id: line.product.id,
                product_type: line.product.product_type.clone(),
                decision,
            })
            .collect();
        info!(changed = outcomes.iter().filter(|o| o.decision.writes()).count(), "products processed");
        Ok(outcomes)
    }

    pub async fn update_product(&self, product: &Product) -> Result<()> {
        product.check()?;
        self.db.update_product(product).await
    }

    /// Records the new lead time and tells the customer about the delay.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn notify_delay(&self, lead_time: i32, product: &mut Product) -> Result<()> {
        product.lead_time = lead_time;
        self.update_product(product).await?;
        notified(self.ns.send_delay_notification(lead_time, &product.name).await, product, "delay");
        Ok(())
    }

    pub async fn handle_normal_product(&self, product: &Product) -> Result<Decision> {
        let decision = rules::normal(product);
        self.carry_out(product, &decision).await?;
        Ok(decision)
    }

    pub async fn handle_seasonal_product(&self, product: &Product) -> Result<Decision> {
        let decision = rules::seasonal(product, self.clock.now())?;
        self.carry_out(product, &decision).await?;
        Ok(decision)
    }

    pub async fn handle_expired_product(&self, product: &Product) -> Result<Decision> {
        let decision = rules::expirable(product, self.clock.now())?;
        self.carry_out(product, &decision).await?;
        Ok(decision)
    }

    pub async fn handle_flash_sale_product(&self, product: &Product) -> Result<Decision> {
        let decision = rules::flash_sale(product, self.clock.now())?;
        self.carry_out(product, &decision).await?;
        Ok(decision)
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn carry_out(&self, product: &Product, decision: &Decision) -> Result<()> {
        if let Decision::Delay { lead_time } = decision {
            let mut next = product.clone();
            return self.notify_delay(*lead_time, &mut next).await;
        }
        let Some(next) = rules::apply(product, decision) else { return Ok(()) };
        self.update_product(&next).await?;

        match decision {
            Decision::OutOfStock { .. } => {
                notified(self.ns.send_out_of_stock_notification(&next.name).await, &next, "out_of_stock")
            }
            Decision::Expired { expiry_date } => {
                notified(self.ns.send_expiration_notification(&next.name, *expiry_date).await, &next, "expiration")
            }
            _ => {}
        }
        Ok(())
    }
}

// A lost notification does not undo a stock change that is already stored.
fn notified(result: Result<()>, product: &Product, kind: &'static str) {
    if let Err(e) = result {
        warn!(product_id = %product.id, kind, error = %e, "notification failed");
    }
}
