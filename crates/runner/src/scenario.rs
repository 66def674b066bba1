//! Reference coffee market
//!
//! Three cafes offer coffee, two groups of customers bid for it, and the
//! book is balanced once.

use std::cell::RefCell;
use std::rc::Rc;

use agora_core::{Good, Price, Trade};
use agora_matching::{RestingOrder, SharedTrader};
use log::info;
use rust_decimal_macros::dec;

use crate::config::{ConfigError, MarketConfig};
use crate::logging_trader::LoggingTrader;

/// Outcome of one scenario run
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub trades: Vec<Trade>,
    pub asks: Vec<RestingOrder>,
    pub bids: Vec<RestingOrder>,
    pub volume: u64,
    pub market_price: Option<Price>,
    /// Final state of every participant, in arrival order
    pub traders: Vec<LoggingTrader>,
}

pub fn run_coffee_market(config: &MarketConfig) -> Result<ScenarioReport, ConfigError> {
    let mut market = config.build_market()?;
    let coffee = Good::new("Coffee");

    let starbucks = Rc::new(RefCell::new(LoggingTrader::new("Starbucks")));
    let cheapo = Rc::new(RefCell::new(LoggingTrader::new("Cheapo")));
    let bougie = Rc::new(RefCell::new(LoggingTrader::new("Bougie")));
    let working_class = Rc::new(RefCell::new(LoggingTrader::new("Working Class")));
    let connoisseurs = Rc::new(RefCell::new(LoggingTrader::new("Connoisseurs")));

    let handle = |trader: &Rc<RefCell<LoggingTrader>>| -> SharedTrader { Rc::clone(trader) as SharedTrader };

    market.ask(&coffee, dec!(3.50), 100, &handle(&starbucks))?;
    market.ask(&coffee, dec!(2.00), 200, &handle(&cheapo))?;
    market.ask(&coffee, dec!(7.50), 12, &handle(&bougie))?;
    market.bid(&coffee, dec!(2.50), 1000, &handle(&working_class))?;
    market.bid(&coffee, dec!(10.00), 100, &handle(&connoisseurs))?;

    let trades = market.balance_all();

    let book = market.book_mut(&coffee)?;
    let report = ScenarioReport {
        asks: book.asks().collect(),
        bids: book.bids().collect(),
        market_price: book.market_price(),
        volume: book.take_volume(),
        trades,
        traders: [starbucks, cheapo, bougie, working_class, connoisseurs]
            .iter()
            .map(|trader| trader.borrow().clone())
            .collect(),
    };

    info!(
        "Coffee market cleared {} trades, volume {}, market price {:?}",
        report.trades.len(),
        report.volume,
        report.market_price
    );
    Ok(report)
}
