//! Agora Runner - demo driver
//!
//! Everything the engine treats as an external collaborator, kept just large
//! enough to exercise it:
//!
//! - **Config**: JSON market configuration (goods and pruning policy)
//! - **Logging trader**: a participant that logs and tallies its fills
//! - **Scenario**: the reference coffee market, replayable from a config

pub mod config;
pub mod logging_trader;
pub mod scenario;

// Re-export main types
pub use config::{ConfigError, MarketConfig, load_config, load_config_from_str, load_default_config};
pub use logging_trader::LoggingTrader;
pub use scenario::{ScenarioReport, run_coffee_market};
