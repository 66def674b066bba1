use rust_decimal::Decimal;

/// Price value - uses Decimal so that midpoints are exact
/// Negative prices are rejected at the book boundary
pub type Price = Decimal;

/// Quantity value - whole units of a good
/// Unsigned, so a negative quantity cannot be expressed at all
pub type Quantity = u64;

/// Sentinel total price of a purchase that cannot be completed
pub const UNATTAINABLE_PRICE: Price = Decimal::MAX;

/// Exact midpoint of two non-negative prices
///
/// Computed from the lower price upward so it cannot overflow.
pub fn midpoint(a: Price, b: Price) -> Price {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    low + (high - low) / Decimal::TWO
}
