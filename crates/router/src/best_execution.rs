use agora_core::{Good, PendingCommit, Quantity, Quote};
use agora_ports::QuoteProvider;
use log::{debug, trace, warn};
use rust_decimal::Decimal;

/// Buy up to `quantity` of `good` at the best achievable total price
///
/// Each round asks every remaining provider for the outstanding quantity
/// and takes the lowest per-unit quote (first seen wins ties). A provider
/// that wins a round is not asked again: its quote already covered all it
/// would sell from its current state. The search stops when the request is
/// filled or no provider can supply anything, so the result may be partial.
///
/// The returned commit runs the winners' commits in the order they were won.
/// Nothing is applied unless the caller commits.
pub fn best_execution_buy<'a, P: QuoteProvider>(
    providers: &'a [P],
    good: &Good,
    quantity: Quantity,
) -> Quote<'a> {
    let mut remaining = quantity;
    let mut total_price = Decimal::ZERO;
    let mut filled: Quantity = 0;
    let mut commit = PendingCommit::noop();
    let mut eligible = vec![true; providers.len()];

    while remaining > 0 {
        let Some((winner, quote)) =
            cheapest_quote(providers, &eligible, good, remaining, total_price)
        else {
            debug!(
                "No provider can supply {} more {} ({} of {} filled)",
                remaining, good, filled, quantity
            );
            break;
        };
        eligible[winner] = false;

        trace!(
            "{} supplies {} {} for {}",
            providers[winner].name(),
            quote.filled,
            good,
            quote.total_price
        );

        let (price, units, action) = quote.into_parts();
        // Selection already rejected quotes that would overflow
        total_price += price;
        filled += units;
        remaining -= units;
        commit = commit.then(action);
    }

    Quote::new(total_price, filled, commit)
}

/// Lowest per-unit quote among eligible providers, with its provider index
///
/// Quotes whose price would overflow the running `spent` total are skipped.
fn cheapest_quote<'a, P: QuoteProvider>(
    providers: &'a [P],
    eligible: &[bool],
    good: &Good,
    quantity: Quantity,
    spent: Decimal,
) -> Option<(usize, Quote<'a>)> {
    let mut best: Option<(usize, Quote<'a>)> = None;

    for (index, provider) in providers.iter().enumerate() {
        if !eligible[index] {
            continue;
        }

        let quote = provider.quote(good, quantity);
        if quote.filled == 0 {
            continue;
        }
        if quote.filled > quantity || !quote.is_feasible() {
            warn!(
                "Ignoring quote from {}: {} {} for a request of {}",
                provider.name(),
                quote.filled,
                good,
                quantity
            );
            continue;
        }
        if spent.checked_add(quote.total_price).is_none() {
            warn!(
                "Ignoring quote from {}: {} for {} {} overflows the running total",
                provider.name(),
                quote.total_price,
                quote.filled,
                good
            );
            continue;
        }

        let better = match &best {
            Some((_, current)) => quote.is_cheaper_per_unit_than(current),
            None => true,
        };
        if better {
            best = Some((index, quote));
        }
    }

    best
}
