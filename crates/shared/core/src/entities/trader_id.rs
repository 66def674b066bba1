use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a trading participant
///
/// Books compare owners by this id when merging repeat quotes, and look the
/// owner's capability up by it when a trade has to be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TraderId(pub Uuid);

impl TraderId {
    /// Create a fresh random id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Build a fixed id, mostly for tests and replayable scenarios
    pub fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }
}

impl Default for TraderId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TraderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
