//! Router scenarios against providers with internal state
//!
//! Providers here keep their inventory behind `Cell`s and only touch it in
//! the commit closure, the way producers in a simulation would.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use agora_core::{Good, PendingCommit, QuantifiedGood, Quantity, Quote, UNATTAINABLE_PRICE};
use agora_router::{QuoteProvider, best_execution_buy, bundle_purchase};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

type Journal = Rc<RefCell<Vec<String>>>;

/// Sells up to `available` units of one good, priced pro rata on a lot
struct LotSeller {
    name: String,
    good: Good,
    lot: Quantity,
    lot_price: Decimal,
    available: Cell<Quantity>,
    revenue: Cell<Decimal>,
    journal: Journal,
}

impl LotSeller {
    fn new(name: &str, good: &str, lot: Quantity, lot_price: Decimal, journal: &Journal) -> Self {
        Self {
            name: name.to_string(),
            good: Good::new(good),
            lot,
            lot_price,
            available: Cell::new(lot),
            revenue: Cell::new(Decimal::ZERO),
            journal: Rc::clone(journal),
        }
    }
}

impl QuoteProvider for LotSeller {
    fn quote(&self, good: &Good, quantity: Quantity) -> Quote<'_> {
        if *good != self.good {
            return Quote::empty();
        }
        let filled = quantity.min(self.available.get());
        let price = self.lot_price * Decimal::from(filled) / Decimal::from(self.lot);
        Quote::new(
            price,
            filled,
            PendingCommit::new(move || {
                self.available.set(self.available.get() - filled);
                self.revenue.set(self.revenue.get() + price);
                self.journal
                    .borrow_mut()
                    .push(format!("{} sold {} {}", self.name, filled, self.good));
            }),
        )
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[test]
fn test_cheaper_per_unit_provider_wins_first() {
    let journal = Journal::default();
    let providers = vec![
        LotSeller::new("P1", "Y", 5, dec!(10), &journal),
        LotSeller::new("P2", "Y", 3, dec!(4), &journal),
    ];

    let quote = best_execution_buy(&providers, &Good::new("Y"), 8);
    assert_eq!(quote.filled, 8);
    assert_eq!(quote.total_price, dec!(14));
    assert!(journal.borrow().is_empty());

    quote.commit();
    assert_eq!(*journal.borrow(), vec!["P2 sold 3 Y", "P1 sold 5 Y"]);
    assert_eq!(providers[0].revenue.get(), dec!(10));
    assert_eq!(providers[1].revenue.get(), dec!(4));
}

#[test]
fn test_router_works_over_trait_objects() {
    let journal = Journal::default();
    let p1 = LotSeller::new("P1", "Y", 5, dec!(10), &journal);
    let p2 = LotSeller::new("P2", "Y", 3, dec!(4), &journal);
    let providers: Vec<Box<dyn QuoteProvider + '_>> = vec![Box::new(&p1), Box::new(&p2)];

    let quote = best_execution_buy(&providers, &Good::new("Y"), 4);
    assert_eq!(quote.filled, 4);
    // All 3 from P2 at 4, then 1 from P1 at 2 per unit
    assert_eq!(quote.total_price, dec!(6));
}

#[test]
fn test_failed_bundle_leaves_winners_untouched() {
    let journal = Journal::default();
    let providers = vec![
        LotSeller::new("Farm", "Grain", 10, dec!(10), &journal),
        LotSeller::new("Well", "Water", 2, dec!(1), &journal),
    ];
    let recipe = vec![QuantifiedGood::new("Grain", 4), QuantifiedGood::new("Water", 3)];

    let quote = bundle_purchase(&providers, &recipe);
    assert!(!quote.is_feasible());

    // Grain was fully sourced before water fell short; nothing may stick
    assert_eq!(providers[0].available.get(), 10);
    assert_eq!(providers[0].revenue.get(), Decimal::ZERO);
    assert_eq!(providers[1].available.get(), 2);
    assert!(journal.borrow().is_empty());
}

#[test]
#[should_panic(expected = "unattainable")]
fn test_committing_failed_bundle_is_a_defect() {
    let journal = Journal::default();
    let providers = vec![LotSeller::new("Well", "Water", 2, dec!(1), &journal)];

    bundle_purchase(&providers, &[QuantifiedGood::new("Water", 3)]).commit();
}

#[test]
fn test_successful_bundle_spans_providers() {
    let journal = Journal::default();
    let providers = vec![
        LotSeller::new("FarmA", "Grain", 3, dec!(3), &journal),
        LotSeller::new("FarmB", "Grain", 3, dec!(6), &journal),
        LotSeller::new("Well", "Water", 5, dec!(5), &journal),
    ];
    let recipe = vec![QuantifiedGood::new("Grain", 5), QuantifiedGood::new("Water", 1)];

    let quote = bundle_purchase(&providers, &recipe);
    assert!(quote.is_feasible());
    assert_eq!(quote.filled, 6);
    assert_eq!(quote.total_price, dec!(3) + dec!(4) + dec!(1));

    quote.commit();
    assert_eq!(
        *journal.borrow(),
        vec!["FarmA sold 3 Grain", "FarmB sold 2 Grain", "Well sold 1 Water"]
    );
    assert_eq!(providers[1].available.get(), 1);
}

/// Quotes one fixed total for up to `lot` units, whatever the request
struct FixedPrice {
    good: Good,
    total: Decimal,
    lot: Quantity,
}

impl FixedPrice {
    fn new(good: &str, total: Decimal, lot: Quantity) -> Self {
        Self {
            good: Good::new(good),
            total,
            lot,
        }
    }
}

impl QuoteProvider for FixedPrice {
    fn quote(&self, good: &Good, quantity: Quantity) -> Quote<'_> {
        if *good != self.good {
            return Quote::empty();
        }
        Quote::new(self.total, quantity.min(self.lot), PendingCommit::noop())
    }
}

#[test]
fn test_huge_priced_provider_loses_without_overflow() {
    let providers = vec![
        FixedPrice::new("Y", dec!(10), 10),
        FixedPrice::new("Y", Decimal::MAX / dec!(2), 3),
    ];

    let quote = best_execution_buy(&providers, &Good::new("Y"), 4);
    assert_eq!(quote.filled, 4);
    assert_eq!(quote.total_price, dec!(10));
}

#[test]
fn test_quote_overflowing_running_total_is_skipped() {
    let big = Decimal::MAX * dec!(0.6);
    let providers = vec![FixedPrice::new("Y", big, 3), FixedPrice::new("Y", big, 3)];

    let quote = best_execution_buy(&providers, &Good::new("Y"), 6);
    assert_eq!(quote.filled, 3);
    assert_eq!(quote.total_price, big);
    assert!(quote.is_feasible());
}

#[test]
fn test_bundle_with_overflowing_total_is_unattainable() {
    let big = Decimal::MAX * dec!(0.6);
    let providers = vec![FixedPrice::new("Grain", big, 5), FixedPrice::new("Water", big, 5)];
    let recipe = vec![QuantifiedGood::new("Grain", 2), QuantifiedGood::new("Water", 2)];

    let quote = bundle_purchase(&providers, &recipe);
    assert!(!quote.is_feasible());
    assert_eq!(quote.total_price, UNATTAINABLE_PRICE);
}

proptest! {
    #[test]
    fn search_is_pure_and_never_overfills(
        stocks in prop::collection::vec((0u64..20, 1i64..500), 1..6),
        requested in 0u64..60,
    ) {
        let journal = Journal::default();
        let providers: Vec<LotSeller> = stocks
            .iter()
            .enumerate()
            .map(|(i, (lot, cents))| {
                let mut seller =
                    LotSeller::new(&format!("P{i}"), "Y", (*lot).max(1), Decimal::new(*cents, 2), &journal);
                seller.available = Cell::new(*lot);
                seller
            })
            .collect();
        let supply: Quantity = stocks.iter().map(|(lot, _)| *lot).sum();
        let good = Good::new("Y");

        let first = best_execution_buy(&providers, &good, requested);
        let second = best_execution_buy(&providers, &good, requested);

        prop_assert_eq!(first.filled, requested.min(supply));
        prop_assert_eq!((first.total_price, first.filled), (second.total_price, second.filled));
        drop(first);
        drop(second);

        for (provider, (lot, _)) in providers.iter().zip(&stocks) {
            prop_assert_eq!(provider.available.get(), *lot);
        }
        prop_assert!(journal.borrow().is_empty());
    }
}
