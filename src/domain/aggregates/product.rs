//! Product Aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::value_objects::{ProductId, ProductType};
use crate::{InventoryError, Result};

/// A product row as the rules see it.
///
/// `available` counts units on hand; `lead_time` is the restock delay in
/// days. The date fields only matter for the type that reads them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    #[validate(range(min = 0))]
    pub available: i32,
    #[validate(range(min = 0))]
    pub lead_time: i32,
    pub expiry_date: Option<DateTime<Utc>>,
    pub season_start_date: Option<DateTime<Utc>>,
    pub season_end_date: Option<DateTime<Utc>>,
    pub flash_sale_start_date: Option<DateTime<Utc>>,
    pub flash_sale_end_date: Option<DateTime<Utc>>,
}

impl Product {
    pub fn new(id: i32, name: impl Into<String>, product_type: ProductType) -> Self {
        Self {
            id: ProductId(id), name: name.into(), product_type, available: 0, lead_time: 0,
            expiry_date: None, season_start_date: None, season_end_date: None,
            flash_sale_start_date: None, flash_sale_end_date: None,
        }
    }

    pub fn with_stock(mut self, available: i32) -> Self { self.available = available; self }
    pub fn with_lead_time(mut self, days: i32) -> Self { self.lead_time = days; self }
    pub fn with_expiry(mut self, at: DateTime<Utc>) -> Self { self.expiry_date = Some(at); self }

    pub fn with_season(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.season_start_date = Some(start);
        self.season_end_date = Some(end);
        self
    }

    pub fn with_flash_sale(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.flash_sale_start_date = Some(start);
        self.flash_sale_end_date = Some(end);
        self
    }

    pub fn is_in_stock(&self) -> bool { self.available > 0 }

    /// Copy with one unit taken out of stock.
    pub fn decremented(&self) -> Self { Self { available: self.available.saturating_sub(1).max(0), ..self.clone() } }

    /// Copy with stock cleared.
    pub fn emptied(&self) -> Self { Self { available: 0, ..self.clone() } }

    /// Rejects rows that must never be written back.
    pub fn check(&self) -> Result<()> {
        self.validate().map_err(|e| InventoryError::InvalidProduct(format!("product {}: {}", self.id, e)))
    }

    pub(crate) fn require(&self, value: Option<DateTime<Utc>>, field: &'static str) -> Result<DateTime<Utc>> {
        value.ok_or(InventoryError::MissingSchedule { product_id: self.id, field })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decrement() {
        let p = Product::new(1, "RJ45 Cable", ProductType::Normal).with_stock(3);
        let next = p.decremented();
        assert_eq!(next.available, 2);
        assert_eq!(next.name, p.name);
        assert_eq!(p.available, 3);
    }

    #[test]
    fn test_decrement_never_goes_negative() {
        let p = Product::new(1, "RJ45 Cable", ProductType::Normal);
        assert_eq!(p.decremented().available, 0);
    }

    #[test]
    fn test_check_rejects_negative_stock() {
        let mut p = Product::new(2, "Milk", ProductType::Expirable);
        assert!(p.check().is_ok());
        p.available = -1;
        assert!(matches!(p.check(), Err(InventoryError::InvalidProduct(_))));
    }

    #[test]
    fn test_check_rejects_empty_name() {
        let p = Product::new(3, "", ProductType::Normal);
        assert!(p.check().is_err());
    }

    #[test]
    fn test_require_reports_field() {
        let p = Product::new(4, "Sled", ProductType::Seasonal);
        match p.require(p.season_end_date, "season_end_date") {
            Err(InventoryError::MissingSchedule { product_id, field }) => {
                assert_eq!(product_id, ProductId(4));
                assert_eq!(field, "season_end_date");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_serde_shape() {
        let p = Product::new(5, "Ice cream", ProductType::FlashSale).with_stock(1);
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["type"], "FLASHSALE");
        assert_eq!(v["leadTime"], 0);
        assert!(v["flashSaleEndDate"].is_null());
    }
}
