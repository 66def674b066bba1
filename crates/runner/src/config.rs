use std::path::Path;

use agora_core::Good;
use agora_matching::{BookConfig, BookError, Market};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("No goods in config")]
    NoGoods,
    #[error("Invalid market: {0}")]
    Book(#[from] BookError),
}

/// Market configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketConfig {
    /// One book is opened per good
    pub goods: Vec<Good>,
    /// Settings shared by every book
    #[serde(default)]
    pub book: BookConfig,
}

/// Load market configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<MarketConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Load configuration from a JSON string
pub fn load_config_from_str(json: &str) -> Result<MarketConfig, ConfigError> {
    let config: MarketConfig = serde_json::from_str(json)?;
    Ok(config)
}

/// Load the default embedded configuration
pub fn load_default_config() -> Result<MarketConfig, ConfigError> {
    let default_config = include_str!("market_config.json");
    load_config_from_str(default_config)
}

impl MarketConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.goods.is_empty() {
            return Err(ConfigError::NoGoods);
        }
        Ok(())
    }

    /// Open a market with a book for every configured good
    pub fn build_market(&self) -> Result<Market, ConfigError> {
        self.validate()?;
        let market = Market::with_goods(self.book.clone(), self.goods.iter().cloned())?;
        Ok(market)
    }
}
