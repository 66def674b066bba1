//! Agora Core Domain
//!
//! Pure value types for the Agora market-clearing engine.
//! This crate contains no I/O and no trader logic, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    // Goods
    Good,
    // Deferred commits
    PendingCommit,
    QuantifiedGood,
    Quote,
    // Trading entities
    Side,
    Trade,
    TraderId,
};
pub use values::{Price, Quantity, UNATTAINABLE_PRICE, midpoint};
