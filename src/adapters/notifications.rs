//! Log-backed notification service.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::ports::NotificationService;
use crate::Result;

/// Emits each customer notification as a structured log event under the
/// `notifications` target, where a delivery pipeline can pick it up.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotificationService;

#[async_trait]
impl NotificationService for LogNotificationService {
    async fn send_delay_notification(&self, lead_time: i32, product_name: &str) -> Result<()> {
        info!(target: "notifications", kind = "delay", product = product_name, lead_time, "product delayed");
        Ok(())
    }

    async fn send_out_of_stock_notification(&self, product_name: &str) -> Result<()> {
        info!(target: "notifications", kind = "out_of_stock", product = product_name, "product out of stock");
        Ok(())
    }

    async fn send_expiration_notification(&self, product_name: &str, expiry_date: DateTime<Utc>) -> Result<()> {
        info!(target: "notifications", kind = "expiration", product = product_name, %expiry_date, "product expired");
        Ok(())
    }
}
