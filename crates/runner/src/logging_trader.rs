//! Participant that logs every fill and keeps a running tally
//!
//! Useful as a stand-in for real agent policy when replaying a market.

use std::collections::BTreeMap;

use agora_core::{Good, Price, Quantity, TraderId};
use agora_ports::Trader;
use log::info;
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub struct LoggingTrader {
    id: TraderId,
    name: String,
    alive: bool,
    /// Net units held per good (bought minus sold)
    holdings: BTreeMap<Good, i128>,
    /// Cash received minus cash paid
    cash: Decimal,
    fills: usize,
}

impl LoggingTrader {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TraderId::new(),
            name: name.into(),
            alive: true,
            holdings: BTreeMap::new(),
            cash: Decimal::ZERO,
            fills: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Leave the market; resting orders stay until a book prunes them
    pub fn retire(&mut self) {
        info!("{} leaves the market", self.name);
        self.alive = false;
    }

    pub fn holding(&self, good: &Good) -> i128 {
        self.holdings.get(good).copied().unwrap_or(0)
    }

    pub fn cash(&self) -> Decimal {
        self.cash
    }

    /// Number of fills received
    pub fn fills(&self) -> usize {
        self.fills
    }
}

impl Trader for LoggingTrader {
    fn id(&self) -> TraderId {
        self.id
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn bought(&mut self, good: &Good, quantity: Quantity, price: Price) {
        info!("{} bought {} of {} at ${:.2}", self.name, quantity, good, price);
        *self.holdings.entry(good.clone()).or_default() += i128::from(quantity);
        self.cash -= price * Decimal::from(quantity);
        self.fills += 1;
    }

    fn sold(&mut self, good: &Good, quantity: Quantity, price: Price) {
        info!("{} sold {} of {} at ${:.2}", self.name, quantity, good, price);
        *self.holdings.entry(good.clone()).or_default() -= i128::from(quantity);
        self.cash += price * Decimal::from(quantity);
        self.fills += 1;
    }
}
