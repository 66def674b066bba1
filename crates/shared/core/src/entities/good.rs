use serde::{Deserialize, Serialize};

use crate::values::Quantity;

/// Identifier for a tradeable commodity (e.g., "Coffee", "Labor")
///
/// Opaque apart from equality and ordering; used as a map key for books.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Good(pub String);

impl Good {
    /// Create a new good
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Good {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Good {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Good {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// An amount of a specific good
///
/// Zero-quantity entries carry no meaning; consumers treat them as no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuantifiedGood {
    pub good: Good,
    pub quantity: Quantity,
}

impl QuantifiedGood {
    pub fn new(good: impl Into<Good>, quantity: Quantity) -> Self {
        Self {
            good: good.into(),
            quantity,
        }
    }

    /// True when this entry asks for nothing
    pub fn is_empty(&self) -> bool {
        self.quantity == 0
    }
}
