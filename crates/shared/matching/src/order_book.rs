//! Continuous double-auction order book for a single good
//!
//! Asks are kept cheapest first, bids highest first, and entries at one
//! price in arrival order. `balance` clears every crossing pair at the
//! midpoint of the two prices and reports fills to both owners.

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use agora_core::{Good, Price, Quantity, Side, Trade, TraderId, midpoint};
use agora_ports::{BookError, BookResult, SharedTrader};
use log::{debug, trace, warn};
use rust_decimal::Decimal;

use crate::config::BookConfig;
use crate::price_level::{LevelEntry, PriceLevel};

/// Read-only view of one resting entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestingOrder {
    pub price: Price,
    pub quantity: Quantity,
    pub owner: TraderId,
}

/// Capability of an owner with entries in this book
struct OwnerEntry {
    trader: SharedTrader,
    /// Number of entries (not quantity) the owner has resting here
    open_entries: usize,
}

/// Order book for one good
///
/// Orders are value records keyed by price level; owners are reached only
/// through the directory of trader handles, never through the records.
pub struct OrderBook {
    good: Good,
    config: BookConfig,
    /// Ask levels, ascending (lowest first)
    asks: BTreeMap<Price, PriceLevel>,
    /// Bid levels, iterated in reverse (highest first)
    bids: BTreeMap<Price, PriceLevel>,
    owners: HashMap<TraderId, OwnerEntry>,
    /// Quantity traded since the last `take_volume`
    volume: Quantity,
}

impl OrderBook {
    /// Create an empty book with the default configuration
    pub fn new(good: impl Into<Good>) -> Self {
        Self::with_config(good, BookConfig::default())
    }

    pub fn with_config(good: impl Into<Good>, config: BookConfig) -> Self {
        Self {
            good: good.into(),
            config,
            asks: BTreeMap::new(),
            bids: BTreeMap::new(),
            owners: HashMap::new(),
            volume: 0,
        }
    }

    pub fn good(&self) -> &Good {
        &self.good
    }

    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    /// Offer to sell `quantity` at `price`
    ///
    /// A zero quantity is a no-op. A repeat offer at the same price from the
    /// same owner is merged into the existing entry, which keeps its place
    /// in the queue. The asker must not be mutably borrowed by the caller.
    pub fn ask(&mut self, price: Price, quantity: Quantity, asker: &SharedTrader) -> BookResult<()> {
        self.submit(Side::Ask, price, quantity, asker)
    }

    /// Offer to buy `quantity` at `price`; same rules as [`OrderBook::ask`]
    pub fn bid(&mut self, price: Price, quantity: Quantity, bidder: &SharedTrader) -> BookResult<()> {
        self.submit(Side::Bid, price, quantity, bidder)
    }

    fn submit(
        &mut self,
        side: Side,
        price: Price,
        quantity: Quantity,
        owner: &SharedTrader,
    ) -> BookResult<()> {
        if price < Decimal::ZERO {
            return Err(BookError::NegativePrice {
                good: self.good.clone(),
                price,
            });
        }
        if quantity == 0 {
            return Ok(());
        }

        let owner_id = owner.borrow().id();
        let level = self.levels_mut(side).entry(price).or_default();
        if level.merge(owner_id, quantity) {
            trace!(
                "{}: merged {:?} {} x{} into existing entry of {}",
                self.good, side, price, quantity, owner_id
            );
            return Ok(());
        }
        level.push_back(owner_id, quantity);

        self.owners
            .entry(owner_id)
            .or_insert_with(|| OwnerEntry {
                trader: Rc::clone(owner),
                open_entries: 0,
            })
            .open_entries += 1;
        Ok(())
    }

    /// Clear every crossing bid/ask pair
    ///
    /// Matches the head bid against the head ask while the best bid is at
    /// or above the best ask. Each match trades the smaller of the two
    /// quantities at the midpoint price, tells the buyer and then the seller,
    /// and removes whichever head is exactly exhausted. Heads owned by
    /// inactive traders are dropped unmatched according to the pruning policy.
    ///
    /// Returns the trades in execution order.
    pub fn balance(&mut self) -> Vec<Trade> {
        let mut trades = Vec::new();

        loop {
            let (Some((bid_price, bid)), Some((ask_price, ask))) =
                (self.head(Side::Bid), self.head(Side::Ask))
            else {
                break;
            };
            if bid_price < ask_price {
                break;
            }

            if !self.is_owner_alive(bid.owner) {
                self.prune_head(Side::Bid, bid_price, bid);
                continue;
            }
            if self.config.pruning.prunes_asks() && !self.is_owner_alive(ask.owner) {
                self.prune_head(Side::Ask, ask_price, ask);
                continue;
            }

            trades.push(self.execute(bid_price, bid, ask_price, ask));
        }

        trades
    }

    fn execute(
        &mut self,
        bid_price: Price,
        bid: LevelEntry,
        ask_price: Price,
        ask: LevelEntry,
    ) -> Trade {
        let quantity = bid.quantity.min(ask.quantity);
        let trade = Trade::at_midpoint(
            self.good.clone(),
            bid.owner,
            ask.owner,
            bid_price,
            ask_price,
            quantity,
        );

        self.reduce_head(Side::Bid, quantity);
        self.reduce_head(Side::Ask, quantity);
        self.volume = self.volume.saturating_add(quantity);

        debug!(
            "{}: {} bought {} from {} at {} (bid={}, ask={})",
            self.good, trade.buyer, quantity, trade.seller, trade.price, bid_price, ask_price
        );

        self.notify(&trade);
        self.remove_exhausted_head(Side::Bid);
        self.remove_exhausted_head(Side::Ask);
        trade
    }

    /// Buyer first, then seller
    fn notify(&self, trade: &Trade) {
        match self.owners.get(&trade.buyer) {
            Some(owner) => {
                owner
                    .trader
                    .borrow_mut()
                    .bought(&trade.good, trade.quantity, trade.price)
            }
            None => warn!("{}: no handle for buyer {}", self.good, trade.buyer),
        }
        match self.owners.get(&trade.seller) {
            Some(owner) => {
                owner
                    .trader
                    .borrow_mut()
                    .sold(&trade.good, trade.quantity, trade.price)
            }
            None => warn!("{}: no handle for seller {}", self.good, trade.seller),
        }
    }

    fn is_owner_alive(&self, owner: TraderId) -> bool {
        self.owners
            .get(&owner)
            .is_some_and(|entry| entry.trader.borrow().is_alive())
    }

    fn prune_head(&mut self, side: Side, price: Price, entry: LevelEntry) {
        debug!(
            "{}: pruning {:?} of inactive trader {} ({} x{})",
            self.good, side, entry.owner, price, entry.quantity
        );
        let removed = {
            let Some(mut level) = self.head_level_entry(side) else {
                return;
            };
            let removed = level.get_mut().pop_front();
            if level.get().is_empty() {
                level.remove();
            }
            removed
        };
        if let Some(removed) = removed {
            self.release_owner(removed.owner);
        }
    }

    fn reduce_head(&mut self, side: Side, quantity: Quantity) {
        if let Some(mut level) = self.head_level_entry(side) {
            level.get_mut().reduce_front(quantity);
        }
    }

    fn remove_exhausted_head(&mut self, side: Side) {
        let removed = {
            let Some(mut level) = self.head_level_entry(side) else {
                return;
            };
            let removed = level.get_mut().pop_exhausted_front();
            if level.get().is_empty() {
                level.remove();
            }
            removed
        };
        if let Some(owner) = removed {
            self.release_owner(owner);
        }
    }

    fn release_owner(&mut self, owner: TraderId) {
        if let Some(entry) = self.owners.get_mut(&owner) {
            entry.open_entries -= 1;
            if entry.open_entries == 0 {
                self.owners.remove(&owner);
            }
        }
    }

    fn levels_mut(&mut self, side: Side) -> &mut BTreeMap<Price, PriceLevel> {
        match side {
            Side::Ask => &mut self.asks,
            Side::Bid => &mut self.bids,
        }
    }

    fn head_level_entry(
        &mut self,
        side: Side,
    ) -> Option<std::collections::btree_map::OccupiedEntry<'_, Price, PriceLevel>> {
        match side {
            Side::Ask => self.asks.first_entry(),
            Side::Bid => self.bids.last_entry(),
        }
    }

    fn head(&self, side: Side) -> Option<(Price, LevelEntry)> {
        let (price, level) = match side {
            Side::Ask => self.asks.first_key_value()?,
            Side::Bid => self.bids.last_key_value()?,
        };
        level.front().map(|entry| (*price, entry))
    }

    // === Queries ===

    /// Lowest ask price and the total quantity resting there
    pub fn best_ask(&self) -> Option<(Price, Quantity)> {
        self.asks
            .first_key_value()
            .map(|(price, level)| (*price, level.total_quantity()))
    }

    /// Highest bid price and the total quantity resting there
    pub fn best_bid(&self) -> Option<(Price, Quantity)> {
        self.bids
            .last_key_value()
            .map(|(price, level)| (*price, level.total_quantity()))
    }

    /// Midpoint of best ask and best bid, or whichever side exists
    ///
    /// `None` when the book is empty.
    pub fn market_price(&self) -> Option<Price> {
        match (self.best_ask(), self.best_bid()) {
            (Some((ask, _)), Some((bid, _))) => Some(midpoint(ask, bid)),
            (Some((ask, _)), None) => Some(ask),
            (None, Some((bid, _))) => Some(bid),
            (None, None) => None,
        }
    }

    /// Total resting quantity on one side, saturating at `Quantity::MAX`
    pub fn depth(&self, side: Side) -> Quantity {
        self.levels(side)
            .values()
            .map(PriceLevel::total_quantity)
            .fold(0, Quantity::saturating_add)
    }

    pub fn ask_depth(&self) -> Quantity {
        self.depth(Side::Ask)
    }

    pub fn bid_depth(&self) -> Quantity {
        self.depth(Side::Bid)
    }

    /// Top `levels` price levels of one side, best first
    pub fn depth_snapshot(&self, side: Side, levels: usize) -> Vec<(Price, Quantity)> {
        let book = self.levels(side);
        let iter: Box<dyn Iterator<Item = (&Price, &PriceLevel)>> = match side {
            Side::Ask => Box::new(book.iter()),
            Side::Bid => Box::new(book.iter().rev()),
        };
        iter.take(levels)
            .map(|(price, level)| (*price, level.total_quantity()))
            .collect()
    }

    /// Resting asks in matching priority (cheapest first, then arrival)
    pub fn asks(&self) -> impl Iterator<Item = RestingOrder> + '_ {
        self.asks.iter().flat_map(|(price, level)| resting(*price, level))
    }

    /// Resting bids in matching priority (highest first, then arrival)
    pub fn bids(&self) -> impl Iterator<Item = RestingOrder> + '_ {
        self.bids
            .iter()
            .rev()
            .flat_map(|(price, level)| resting(*price, level))
    }

    /// Number of resting entries on one side
    pub fn entry_count(&self, side: Side) -> usize {
        self.levels(side).values().map(PriceLevel::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.asks.is_empty() && self.bids.is_empty()
    }

    /// Number of distinct owners with something resting in this book
    pub fn owner_count(&self) -> usize {
        self.owners.len()
    }

    /// Quantity traded since the counter was last taken, saturating
    pub fn volume(&self) -> Quantity {
        self.volume
    }

    /// Return the traded quantity and reset the counter
    pub fn take_volume(&mut self) -> Quantity {
        std::mem::take(&mut self.volume)
    }

    fn levels(&self, side: Side) -> &BTreeMap<Price, PriceLevel> {
        match side {
            Side::Ask => &self.asks,
            Side::Bid => &self.bids,
        }
    }
}

fn resting(price: Price, level: &PriceLevel) -> impl Iterator<Item = RestingOrder> + '_ {
    level.iter().map(move |entry| RestingOrder {
        price,
        quantity: entry.quantity,
        owner: entry.owner,
    })
}

impl std::fmt::Debug for OrderBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderBook")
            .field("good", &self.good)
            .field("config", &self.config)
            .field("asks", &self.asks().collect::<Vec<_>>())
            .field("bids", &self.bids().collect::<Vec<_>>())
            .field("owners", &self.owners.len())
            .field("volume", &self.volume)
            .finish()
    }
}
