//! Agora Matching
//!
//! Continuous double-auction order books with price-time priority.
//!
//! ## Usage
//!
//! ```ignore
//! use agora_matching::OrderBook;
//! use rust_decimal_macros::dec;
//!
//! let mut book = OrderBook::new("Coffee");
//! book.ask(dec!(2.00), 200, &cheapo)?;
//! book.bid(dec!(10.00), 100, &connoisseur)?;
//!
//! // Connoisseur buys 100 at 6.00; both traders are notified
//! let trades = book.balance();
//! ```

mod config;
mod market;
mod order_book;
mod price_level;

pub use config::{BookConfig, PruningPolicy};
pub use market::Market;
pub use order_book::{OrderBook, RestingOrder};
pub use price_level::{LevelEntry, PriceLevel};

// Re-export the ports for convenience
pub use agora_ports::{BookError, BookResult, SharedTrader, Trader};
