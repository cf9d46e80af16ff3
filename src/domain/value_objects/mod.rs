//! Value Objects for inventory rules

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Product identifier (primary key of `products`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// Order identifier (primary key of `orders`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub i32);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// Product type tag.
///
/// Stored upper-case in the `type` column. Tags with no rules are kept as
/// `Other` so a catalog can carry types this service does not handle.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProductType {
    Normal,
    Seasonal,
    Expirable,
    FlashSale,
    Other(String),
}

impl ProductType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Normal => "NORMAL",
            Self::Seasonal => "SEASONAL",
            Self::Expirable => "EXPIRABLE",
            Self::FlashSale => "FLASHSALE",
            Self::Other(tag) => tag,
        }
    }
}

impl From<&str> for ProductType {
    fn from(tag: &str) -> Self {
        match tag {
            "NORMAL" => Self::Normal,
            "SEASONAL" => Self::Seasonal,
            "EXPIRABLE" => Self::Expirable,
            "FLASHSALE" => Self::FlashSale,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for ProductType {
    fn from(tag: String) -> Self { Self::from(tag.as_str()) }
}

impl From<ProductType> for String {
    fn from(t: ProductType) -> Self { t.as_str().to_string() }
}

impl FromStr for ProductType {
    type Err = std::convert::Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> { Ok(Self::from(s)) }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.as_str()) }
}
