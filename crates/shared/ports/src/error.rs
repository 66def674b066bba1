use agora_core::{Good, Price};
use thiserror::Error;

/// Domain-level errors for order book operations
///
/// These signal a caller bug; the book is left untouched when one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    #[error("Negative price {price} submitted for {good}")]
    NegativePrice { good: Good, price: Price },

    #[error("No book for good: {0}")]
    UnknownGood(Good),

    #[error("Book already exists for good: {0}")]
    DuplicateGood(Good),
}

pub type BookResult<T> = std::result::Result<T, BookError>;
