use rust_decimal::Decimal;

use crate::values::{Price, Quantity, UNATTAINABLE_PRICE};

/// Deferred state change paired with a quote
///
/// Consuming `commit` is the only way to run it, so a commit runs at most
/// once. Dropping it without committing has no effect.
pub enum PendingCommit<'a> {
    /// Nothing to apply (zero fill)
    Noop,
    /// A single provider-side mutation
    Action(Box<dyn FnOnce() + 'a>),
    /// Commits applied strictly in order
    Chain(Vec<PendingCommit<'a>>),
    /// Placeholder for an infeasible purchase; must never be committed
    Unattainable,
}

impl<'a> PendingCommit<'a> {
    /// Wrap a single action
    pub fn new(action: impl FnOnce() + 'a) -> Self {
        PendingCommit::Action(Box::new(action))
    }

    pub fn noop() -> Self {
        PendingCommit::Noop
    }

    pub fn unattainable() -> Self {
        PendingCommit::Unattainable
    }

    /// True if this commit (or any part of a chain) is the infeasible placeholder
    pub fn is_unattainable(&self) -> bool {
        match self {
            PendingCommit::Unattainable => true,
            PendingCommit::Chain(parts) => parts.iter().any(PendingCommit::is_unattainable),
            PendingCommit::Noop | PendingCommit::Action(_) => false,
        }
    }

    /// Append `next` so that it runs after everything already in `self`
    pub fn then(self, next: PendingCommit<'a>) -> Self {
        match (self, next) {
            (PendingCommit::Noop, next) => next,
            (current, PendingCommit::Noop) => current,
            (PendingCommit::Chain(mut parts), next) => {
                parts.push(next);
                PendingCommit::Chain(parts)
            }
            (current, next) => PendingCommit::Chain(vec![current, next]),
        }
    }

    /// Apply the deferred state change
    ///
    /// # Panics
    ///
    /// Panics if the commit is, or contains, the unattainable placeholder.
    /// Nothing is applied in that case.
    pub fn commit(self) {
        assert!(
            !self.is_unattainable(),
            "attempted to commit an unattainable purchase"
        );
        self.run();
    }

    fn run(self) {
        match self {
            PendingCommit::Noop | PendingCommit::Unattainable => {}
            PendingCommit::Action(action) => action(),
            PendingCommit::Chain(parts) => {
                for part in parts {
                    part.run();
                }
            }
        }
    }
}

impl Default for PendingCommit<'_> {
    fn default() -> Self {
        PendingCommit::Noop
    }
}

impl std::fmt::Debug for PendingCommit<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PendingCommit::Noop => write!(f, "Noop"),
            PendingCommit::Action(_) => write!(f, "Action(..)"),
            PendingCommit::Chain(parts) => f.debug_tuple("Chain").field(parts).finish(),
            PendingCommit::Unattainable => write!(f, "Unattainable"),
        }
    }
}

/// Non-binding price offer for up to a requested quantity
///
/// Producing a quote never changes state; only `commit` does.
#[derive(Debug)]
pub struct Quote<'a> {
    /// Total price for the filled quantity
    pub total_price: Price,
    /// Units covered by this quote (never more than requested)
    pub filled: Quantity,
    commit: PendingCommit<'a>,
}

impl<'a> Quote<'a> {
    pub fn new(total_price: Price, filled: Quantity, commit: PendingCommit<'a>) -> Self {
        Self {
            total_price,
            filled,
            commit,
        }
    }

    /// A quote that fills nothing and costs nothing
    pub fn empty() -> Self {
        Self::new(Decimal::ZERO, 0, PendingCommit::Noop)
    }

    /// Sentinel for a purchase that cannot be completed
    pub fn unattainable() -> Self {
        Self::new(UNATTAINABLE_PRICE, 0, PendingCommit::Unattainable)
    }

    /// False for the unattainable sentinel; callers must not commit such quotes
    pub fn is_feasible(&self) -> bool {
        !self.commit.is_unattainable()
    }

    /// Price per unit, if anything is filled
    pub fn unit_price(&self) -> Option<Price> {
        if self.filled == 0 {
            return None;
        }
        Some(self.total_price / Decimal::from(self.filled))
    }

    /// Exact per-unit comparison by cross multiplication
    ///
    /// Zero-fill quotes are never cheaper than anything. When a cross
    /// product overflows the unit prices are compared instead.
    pub fn is_cheaper_per_unit_than(&self, other: &Quote<'_>) -> bool {
        if self.filled == 0 {
            return false;
        }
        if other.filled == 0 {
            return true;
        }
        let ours = self.total_price.checked_mul(Decimal::from(other.filled));
        let theirs = other.total_price.checked_mul(Decimal::from(self.filled));
        match (ours, theirs) {
            (Some(ours), Some(theirs)) => ours < theirs,
            _ => {
                self.total_price / Decimal::from(self.filled)
                    < other.total_price / Decimal::from(other.filled)
            }
        }
    }

    /// Split into (total_price, filled, commit)
    pub fn into_parts(self) -> (Price, Quantity, PendingCommit<'a>) {
        (self.total_price, self.filled, self.commit)
    }

    /// Accept the quote and apply its state change
    ///
    /// # Panics
    ///
    /// Panics on the unattainable sentinel (see [`PendingCommit::commit`]).
    pub fn commit(self) {
        self.commit.commit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::cell::RefCell;

    #[test]
    fn test_dropped_commit_has_no_effect() {
        let log = RefCell::new(Vec::new());
        {
            let _quote = Quote::new(dec!(4), 2, PendingCommit::new(|| log.borrow_mut().push(1)));
        }
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_chain_runs_in_order() {
        let log = RefCell::new(Vec::new());
        let commit = PendingCommit::new(|| log.borrow_mut().push("first"))
            .then(PendingCommit::noop())
            .then(PendingCommit::new(|| log.borrow_mut().push("second")))
            .then(PendingCommit::new(|| log.borrow_mut().push("third")));

        commit.commit();
        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_noop_then_keeps_next() {
        let commit = PendingCommit::noop().then(PendingCommit::new(|| {}));
        assert!(matches!(commit, PendingCommit::Action(_)));
    }

    #[test]
    #[should_panic(expected = "unattainable")]
    fn test_committing_unattainable_panics() {
        Quote::unattainable().commit();
    }

    #[test]
    fn test_unattainable_chain_applies_nothing() {
        let log = RefCell::new(Vec::new());
        let commit = PendingCommit::new(|| log.borrow_mut().push(1)).then(PendingCommit::unattainable());
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| commit.commit()));
        assert!(outcome.is_err());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_unattainable_quote_is_not_feasible() {
        let quote = Quote::unattainable();
        assert!(!quote.is_feasible());
        assert_eq!(quote.total_price, UNATTAINABLE_PRICE);
        assert!(Quote::empty().is_feasible());
    }

    #[test]
    fn test_per_unit_comparison() {
        let expensive = Quote::new(dec!(10), 5, PendingCommit::noop());
        let cheap = Quote::new(dec!(4), 3, PendingCommit::noop());
        assert!(cheap.is_cheaper_per_unit_than(&expensive));
        assert!(!expensive.is_cheaper_per_unit_than(&cheap));
        assert_eq!(expensive.unit_price(), Some(dec!(2)));
        assert!(!Quote::empty().is_cheaper_per_unit_than(&cheap));
        assert!(cheap.is_cheaper_per_unit_than(&Quote::empty()));
    }

    #[test]
    fn test_per_unit_comparison_with_huge_totals() {
        let modest = Quote::new(dec!(10), 4, PendingCommit::noop());
        let huge = Quote::new(Decimal::MAX / dec!(2), 3, PendingCommit::noop());
        assert!(modest.is_cheaper_per_unit_than(&huge));
        assert!(!huge.is_cheaper_per_unit_than(&modest));
        assert!(!Quote::unattainable().is_cheaper_per_unit_than(&huge));
    }

    #[test]
    fn test_equal_unit_prices_are_not_cheaper() {
        let a = Quote::new(dec!(6), 3, PendingCommit::noop());
        let b = Quote::new(dec!(4), 2, PendingCommit::noop());
        assert!(!a.is_cheaper_per_unit_than(&b));
        assert!(!b.is_cheaper_per_unit_than(&a));
    }
}
