use std::cell::RefCell;
use std::rc::Rc;

use agora_core::{Good, Quantity, Quote};

/// Port for participants that sell through quotes instead of a book
///
/// Implementations must:
/// - never fill more than `quantity`
/// - leave all observable state untouched; only the returned commit mutates
/// - return equal quotes for equal arguments while nothing has been committed
pub trait QuoteProvider {
    fn quote(&self, good: &Good, quantity: Quantity) -> Quote<'_>;

    /// Display name used in logs
    fn name(&self) -> &str {
        "QuoteProvider"
    }
}

impl<T: QuoteProvider + ?Sized> QuoteProvider for &T {
    fn quote(&self, good: &Good, quantity: Quantity) -> Quote<'_> {
        (**self).quote(good, quantity)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: QuoteProvider + ?Sized> QuoteProvider for Box<T> {
    fn quote(&self, good: &Good, quantity: Quantity) -> Quote<'_> {
        (**self).quote(good, quantity)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: QuoteProvider + ?Sized> QuoteProvider for Rc<T> {
    fn quote(&self, good: &Good, quantity: Quantity) -> Quote<'_> {
        (**self).quote(good, quantity)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
