use serde::{Deserialize, Serialize};

/// Which side of the book drops entries of inactive owners while balancing
///
/// Pruning is lazy either way: only an entry that reaches the head of its
/// side while the book is crossed is checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PruningPolicy {
    /// Only dead bidders are pruned; dead askers keep resting
    #[default]
    BidsOnly,
    /// Dead owners are pruned on both sides
    BothSides,
}

impl PruningPolicy {
    pub fn prunes_asks(&self) -> bool {
        matches!(self, PruningPolicy::BothSides)
    }
}

/// Per-book configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookConfig {
    #[serde(default)]
    pub pruning: PruningPolicy,
}

impl BookConfig {
    pub fn with_pruning(pruning: PruningPolicy) -> Self {
        Self { pruning }
    }
}
