//! One order book per good
//!
//! The registry is owned by the driver; the books themselves know nothing
//! about each other.

use std::collections::BTreeMap;

use agora_core::{Good, Price, Quantity, Trade};
use agora_ports::{BookError, BookResult, SharedTrader};
use log::info;

use crate::config::BookConfig;
use crate::order_book::OrderBook;

/// Collection of order books keyed by good
#[derive(Debug, Default)]
pub struct Market {
    config: BookConfig,
    books: BTreeMap<Good, OrderBook>,
}

impl Market {
    pub fn new(config: BookConfig) -> Self {
        Self {
            config,
            books: BTreeMap::new(),
        }
    }

    /// Create a market with an empty book for each good
    pub fn with_goods<I, G>(config: BookConfig, goods: I) -> BookResult<Self>
    where
        I: IntoIterator<Item = G>,
        G: Into<Good>,
    {
        let mut market = Self::new(config);
        for good in goods {
            market.add_good(good)?;
        }
        Ok(market)
    }

    /// Open a book for `good`
    pub fn add_good(&mut self, good: impl Into<Good>) -> BookResult<()> {
        let good = good.into();
        if self.books.contains_key(&good) {
            return Err(BookError::DuplicateGood(good));
        }
        info!("Opening book for {} (pruning={:?})", good, self.config.pruning);
        let book = OrderBook::with_config(good.clone(), self.config.clone());
        self.books.insert(good, book);
        Ok(())
    }

    pub fn book(&self, good: &Good) -> BookResult<&OrderBook> {
        self.books
            .get(good)
            .ok_or_else(|| BookError::UnknownGood(good.clone()))
    }

    pub fn book_mut(&mut self, good: &Good) -> BookResult<&mut OrderBook> {
        self.books
            .get_mut(good)
            .ok_or_else(|| BookError::UnknownGood(good.clone()))
    }

    /// Goods with an open book, in order
    pub fn goods(&self) -> impl Iterator<Item = &Good> {
        self.books.keys()
    }

    pub fn ask(
        &mut self,
        good: &Good,
        price: Price,
        quantity: Quantity,
        asker: &SharedTrader,
    ) -> BookResult<()> {
        self.book_mut(good)?.ask(price, quantity, asker)
    }

    pub fn bid(
        &mut self,
        good: &Good,
        price: Price,
        quantity: Quantity,
        bidder: &SharedTrader,
    ) -> BookResult<()> {
        self.book_mut(good)?.bid(price, quantity, bidder)
    }

    /// Balance every book, in good order
    pub fn balance_all(&mut self) -> Vec<Trade> {
        self.books
            .values_mut()
            .flat_map(|book| book.balance())
            .collect()
    }

    /// Market price of every good that has one
    pub fn market_prices(&self) -> BTreeMap<Good, Price> {
        self.books
            .iter()
            .filter_map(|(good, book)| book.market_price().map(|price| (good.clone(), price)))
            .collect()
    }

    /// Take and reset every book's traded volume
    pub fn take_volumes(&mut self) -> BTreeMap<Good, Quantity> {
        self.books
            .iter_mut()
            .map(|(good, book)| (good.clone(), book.take_volume()))
            .collect()
    }
}
