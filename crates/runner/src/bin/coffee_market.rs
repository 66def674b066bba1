//! Coffee market binary
//!
//! Replays the reference coffee market and logs every fill.
//! Usage: `coffee-market [path/to/market_config.json]`

use agora_runner::{ConfigError, load_config, load_default_config, run_coffee_market};
use log::info;

fn main() -> Result<(), ConfigError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading market config from {}", path);
            load_config(path)?
        }
        None => load_default_config()?,
    };

    let report = run_coffee_market(&config)?;

    for trader in &report.traders {
        info!(
            "{:>14}: holding {:>5}, cash {:>9.2}",
            trader.name(),
            trader.holding(&"Coffee".into()),
            trader.cash()
        );
    }
    for ask in &report.asks {
        info!("resting ask {} x{}", ask.price, ask.quantity);
    }
    for bid in &report.bids {
        info!("resting bid {} x{}", bid.price, bid.quantity);
    }

    Ok(())
}
