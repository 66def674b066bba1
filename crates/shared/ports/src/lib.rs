//! Agora Ports
//!
//! Port definitions (traits) for the Agora market-clearing engine.
//! These define the boundary between the engine and the participants that
//! trade through it.

mod error;
mod quoting;
mod trader;

pub use error::{BookError, BookResult};
pub use quoting::QuoteProvider;
pub use trader::{SharedTrader, Trader, shared};
