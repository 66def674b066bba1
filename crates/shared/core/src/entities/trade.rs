use serde::{Deserialize, Serialize};

use super::{Good, TraderId};
use crate::values::{Price, Quantity, midpoint};

/// Trade resulting from one crossing bid/ask pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// The good that changed hands
    pub good: Good,
    pub buyer: TraderId,
    pub seller: TraderId,
    /// Bid price of the matched entry
    pub bid_price: Price,
    /// Ask price of the matched entry
    pub ask_price: Price,
    /// Execution price (midpoint of bid and ask)
    pub price: Price,
    pub quantity: Quantity,
}

impl Trade {
    /// Create a trade executed at the midpoint of the two crossing prices
    pub fn at_midpoint(
        good: Good,
        buyer: TraderId,
        seller: TraderId,
        bid_price: Price,
        ask_price: Price,
        quantity: Quantity,
    ) -> Self {
        Self {
            good,
            buyer,
            seller,
            bid_price,
            ask_price,
            price: midpoint(bid_price, ask_price),
            quantity,
        }
    }
}
