//! Product rules
//!
//! Pure stock decisions per product type. Nothing here touches storage or
//! sends anything; [`evaluate`] says what should happen and [`apply`] gives
//! the row to write back.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::aggregates::Product;
use crate::domain::value_objects::ProductType;
use crate::Result;

/// What processing one product line amounts to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Decision {
    /// Take one unit out of stock.
    Decrement,
    /// Nothing on hand; tell the customer it ships in `lead_time` days.
    Delay { lead_time: i32 },
    /// Cannot be supplied. `clear_stock` zeroes the stored quantity.
    OutOfStock { clear_stock: bool },
    /// Past its expiry date; stock is cleared.
    Expired { expiry_date: DateTime<Utc> },
    NoAction,
}

impl Decision {
    pub fn writes(&self) -> bool { !matches!(self, Self::NoAction) }
}

/// Decides what to do with `product` at `now`.
pub fn evaluate(product: &Product, now: DateTime<Utc>) -> Result<Decision> {
    match &product.product_type {
        ProductType::Normal => Ok(normal(product)),
        ProductType::Seasonal => seasonal(product, now),
        ProductType::Expirable => expirable(product, now),
        ProductType::FlashSale => flash_sale(product, now),
        ProductType::Other(tag) => {
            tracing::debug!(product_id = %product.id, product_type = %tag, "no rules for product type");
            Ok(Decision::NoAction)
        }
    }
}

/// The row to persist for `decision`, if any.
pub fn apply(product: &Product, decision: &Decision) -> Option<Product> {
    match decision {
        Decision::Decrement => Some(product.decremented()),
        Decision::Delay { lead_time } => Some(Product { lead_time: *lead_time, ..product.clone() }),
        Decision::OutOfStock { clear_stock: true } | Decision::Expired { .. } => Some(product.emptied()),
        Decision::OutOfStock { clear_stock: false } => Some(product.clone()),
        Decision::NoAction => None,
    }
}

pub fn normal(p: &Product) -> Decision {
    if p.is_in_stock() {
        Decision::Decrement
    } else if p.lead_time > 0 {
        Decision::Delay { lead_time: p.lead_time }
    } else {
        Decision::NoAction
    }
}

pub fn seasonal(p: &Product, now: DateTime<Utc>) -> Result<Decision> {
    let start = p.require(p.season_start_date, "season_start_date")?;
    let end = p.require(p.season_end_date, "season_end_date")?;

    let decision = if now > start && now < end && p.is_in_stock() {
        Decision::Decrement
    } else if restocked_after(now, p.lead_time, end) {
        Decision::OutOfStock { clear_stock: true }
    } else if start > now {
        Decision::OutOfStock { clear_stock: false }
    } else {
        Decision::Delay { lead_time: p.lead_time }
    };
    Ok(decision)
}

// A restock date past chrono's range is after any season end.
fn restocked_after(now: DateTime<Utc>, lead_time: i32, end: DateTime<Utc>) -> bool {
    now.checked_add_signed(Duration::days(i64::from(lead_time))).map_or(true, |restock| restock > end)
}

pub fn expirable(p: &Product, now: DateTime<Utc>) -> Result<Decision> {
    let expiry_date = p.require(p.expiry_date, "expiry_date")?;
    if p.is_in_stock() && expiry_date > now {
        Ok(Decision::Decrement)
    } else {
        Ok(Decision::Expired { expiry_date })
    }
}

pub fn flash_sale(p: &Product, now: DateTime<Utc>) -> Result<Decision> {
    let start = p.require(p.flash_sale_start_date, "flash_sale_start_date")?;
    let end = p.require(p.flash_sale_end_date, "flash_sale_end_date")?;

    let decision = if now > start && now < end && p.is_in_stock() {
        Decision::Decrement
    } else if now > end {
        Decision::OutOfStock { clear_stock: true }
    } else {
        Decision::NoAction
    };
    Ok(decision)
}
