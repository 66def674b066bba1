//! Price level with FIFO queue
//!
//! A price level holds every resting entry at one price point, in arrival
//! order. Entries from the same owner are merged instead of queued twice.

use std::collections::VecDeque;

use agora_core::{Quantity, TraderId};

/// One owner's resting quantity at a price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelEntry {
    pub owner: TraderId,
    pub quantity: Quantity,
}

/// Entries at a single price, oldest first
#[derive(Debug, Clone, Default)]
pub struct PriceLevel {
    entries: VecDeque<LevelEntry>,
}

impl PriceLevel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add quantity to an existing entry of `owner`, saturating at `Quantity::MAX`
    ///
    /// Returns false if the owner has no entry here; nothing changes then.
    pub fn merge(&mut self, owner: TraderId, quantity: Quantity) -> bool {
        match self.entries.iter_mut().find(|entry| entry.owner == owner) {
            Some(entry) => {
                entry.quantity = entry.quantity.saturating_add(quantity);
                true
            }
            None => false,
        }
    }

    /// Queue a new entry behind everything already at this price
    pub fn push_back(&mut self, owner: TraderId, quantity: Quantity) {
        debug_assert!(quantity > 0);
        self.entries.push_back(LevelEntry { owner, quantity });
    }

    /// Peek at the oldest entry
    pub fn front(&self) -> Option<LevelEntry> {
        self.entries.front().copied()
    }

    /// Take `quantity` off the oldest entry, leaving it in place even at zero
    pub fn reduce_front(&mut self, quantity: Quantity) {
        if let Some(entry) = self.entries.front_mut() {
            debug_assert!(quantity <= entry.quantity);
            entry.quantity -= quantity;
        }
    }

    /// Remove the oldest entry if it is exactly exhausted
    pub fn pop_exhausted_front(&mut self) -> Option<TraderId> {
        match self.entries.front() {
            Some(entry) if entry.quantity == 0 => self.entries.pop_front().map(|e| e.owner),
            _ => None,
        }
    }

    /// Remove the oldest entry regardless of its quantity
    pub fn pop_front(&mut self) -> Option<LevelEntry> {
        self.entries.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total quantity at this level, saturating at `Quantity::MAX`
    pub fn total_quantity(&self) -> Quantity {
        self.entries
            .iter()
            .fold(0, |total, entry| total.saturating_add(entry.quantity))
    }

    /// Number of entries at this level
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in time priority
    pub fn iter(&self) -> impl Iterator<Item = &LevelEntry> {
        self.entries.iter()
    }
}
