//! Agora Router
//!
//! Best-execution buying across independent quote providers, without a
//! shared order book.
//!
//! - [`best_execution_buy`] repeatedly takes the cheapest per-unit quote
//!   until the request is filled or nobody can supply more.
//! - [`bundle_purchase`] buys several goods all-or-nothing.
//!
//! Both are pure searches: providers only change when the caller commits the
//! returned [`Quote`](agora_core::Quote). A discarded result leaves every
//! provider exactly as it was.
//!
//! ## Usage
//!
//! ```ignore
//! use agora_router::{best_execution_buy, bundle_purchase};
//!
//! let quote = best_execution_buy(&providers, &Good::new("Grain"), 8);
//! if quote.filled == 8 && quote.total_price <= budget {
//!     quote.commit();
//! }
//!
//! let bundle = bundle_purchase(&providers, &recipe);
//! if bundle.is_feasible() {
//!     bundle.commit();
//! }
//! ```

mod best_execution;
mod bundle;

pub use best_execution::best_execution_buy;
pub use bundle::bundle_purchase;

// Re-export the port for convenience
pub use agora_ports::QuoteProvider;
