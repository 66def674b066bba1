use std::cell::RefCell;
use std::rc::Rc;

use agora_core::{Good, Price, Quantity, TraderId};

/// Port for participants that rest orders on a book
///
/// The book reports fills through `bought`/`sold` synchronously while it is
/// balancing; for a single match the buyer is always told first.
pub trait Trader {
    /// Stable identity; repeat orders at one price from the same id are merged
    fn id(&self) -> TraderId;

    /// Participants clear this to leave the market without cancelling orders
    fn is_alive(&self) -> bool {
        true
    }

    /// A bid of ours was matched
    fn bought(&mut self, good: &Good, quantity: Quantity, price: Price);

    /// An ask of ours was matched
    fn sold(&mut self, good: &Good, quantity: Quantity, price: Price);
}

/// Single-threaded shared handle to a trader
///
/// The driver keeps one clone, every book the trader rests on keeps another.
pub type SharedTrader = Rc<RefCell<dyn Trader>>;

/// Wrap a concrete trader into a [`SharedTrader`] handle
pub fn shared<T: Trader + 'static>(trader: T) -> Rc<RefCell<T>> {
    Rc::new(RefCell::new(trader))
}
