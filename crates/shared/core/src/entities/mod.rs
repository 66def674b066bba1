mod good;
mod quote;
mod side;
mod trade;
mod trader_id;

pub use good::{Good, QuantifiedGood};
pub use quote::{PendingCommit, Quote};
pub use side::Side;
pub use trade::Trade;
pub use trader_id::TraderId;
