//! Process configuration read from the environment (and `.env`).

use validator::Validate;

use crate::{InventoryError, Result};

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct Config {
    #[validate(length(min = 1))]
    pub database_url: String,
    #[validate(range(min = 1, max = 100))]
    pub max_connections: u32,
}

impl Config {
    /// Reads `DATABASE_URL` and `DATABASE_MAX_CONNECTIONS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = lookup("DATABASE_URL").ok_or_else(|| InventoryError::Config("DATABASE_URL is not set".into()))?;
        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v.trim().parse().map_err(|_| InventoryError::Config(format!("DATABASE_MAX_CONNECTIONS: not a number: {v}")))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let config = Self { database_url, max_connections };
        config.validate().map_err(|e| InventoryError::Config(e.to_string()))?;
        Ok(config)
    }
}
