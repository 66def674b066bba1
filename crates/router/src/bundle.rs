use std::collections::HashMap;

use agora_core::{Good, PendingCommit, QuantifiedGood, Quantity, Quote};
use agora_ports::QuoteProvider;
use log::{debug, info};
use rust_decimal::Decimal;

use crate::best_execution::best_execution_buy;

/// Buy every good in `required`, or nothing at all
///
/// Runs [`best_execution_buy`] for each good in turn. If any good cannot be
/// filled completely the whole purchase is abandoned and
/// [`Quote::unattainable`] is returned; the commits collected so far are
/// dropped unapplied, so no provider changes. Otherwise the quote carries the
/// summed price, the total units, and a commit chaining the per-good commits
/// in processing order.
///
/// Duplicate goods are combined (first occurrence keeps its place) and zero
/// quantities are skipped. An empty bundle is a free no-op.
pub fn bundle_purchase<'a, P: QuoteProvider>(
    providers: &'a [P],
    required: &[QuantifiedGood],
) -> Quote<'a> {
    let mut total_price = Decimal::ZERO;
    let mut filled: Quantity = 0;
    let mut commit = PendingCommit::noop();

    for item in coalesce(required) {
        let quote = best_execution_buy(providers, &item.good, item.quantity);
        if quote.filled < item.quantity {
            info!(
                "Bundle abandoned: only {} of {} {} available",
                quote.filled, item.quantity, item.good
            );
            return Quote::unattainable();
        }

        let (price, units, action) = quote.into_parts();
        let Some(sum) = total_price.checked_add(price) else {
            info!("Bundle abandoned: total price overflows at {}", item.good);
            return Quote::unattainable();
        };
        total_price = sum;
        filled = filled.saturating_add(units);
        commit = commit.then(action);
    }

    debug!("Bundle sourced: {} units for {}", filled, total_price);
    Quote::new(total_price, filled, commit)
}

/// Merge duplicate goods and drop empty entries, keeping first-seen order
fn coalesce(required: &[QuantifiedGood]) -> Vec<QuantifiedGood> {
    let mut merged: Vec<QuantifiedGood> = Vec::with_capacity(required.len());
    let mut positions: HashMap<&Good, usize> = HashMap::new();

    for item in required.iter().filter(|item| !item.is_empty()) {
        match positions.get(&item.good) {
            Some(&index) => {
                merged[index].quantity = merged[index].quantity.saturating_add(item.quantity)
            }
            None => {
                positions.insert(&item.good, merged.len());
                merged.push(item.clone());
            }
        }
    }

    merged
}
