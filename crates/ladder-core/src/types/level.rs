//! Price level type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A (price, size) pair in a ladder slot. Zero price marks an empty slot.
#[derive(Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceLevel {
    /// Price at this level
    pub price: f64,
    /// Resting size at this level
    pub size: f64,
}

impl PriceLevel {
    /// The empty slot (0, 0)
    pub const EMPTY: Self = Self {
        price: 0.0,
        size: 0.0,
    };

    /// Create a new level
    #[inline]
    #[must_use]
    pub const fn new(price: f64, size: f64) -> Self {
        Self { price, size }
    }

    /// Check if the slot is empty (zero price)
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.price == 0.0
    }

    /// Whether this slot survives re-normalization (positive price and size)
    #[inline]
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.price > 0.0 && self.size > 0.0
    }
}

impl fmt::Debug for PriceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.price, self.size)
    }
}

impl From<(f64, f64)> for PriceLevel {
    fn from((price, size): (f64, f64)) -> Self {
        Self::new(price, size)
    }
}
