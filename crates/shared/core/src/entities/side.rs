use serde::{Deserialize, Serialize};

/// Book side (Ask = offer to sell, Bid = offer to buy)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Ask,
    Bid,
}
