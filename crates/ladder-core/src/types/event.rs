//! Tick event as read from the tick log.

use serde::{Deserialize, Serialize};

use crate::constants::BOOK_LEVELS;
use crate::error::{Error, Result};
use crate::types::EventSide;

/// One row of the tick log.
///
/// `level` is 1-based and only meaningful for bid/offer updates. Prices are
/// expected to arrive already rounded to `PRICE_DECIMALS` digits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickEvent {
    /// Side tag
    pub side: EventSide,
    /// Ladder level, 1 = best
    pub level: u8,
    /// Price
    pub price: f64,
    /// Size
    pub size: f64,
    /// Event time in nanoseconds
    pub event_time: i64,
}

impl TickEvent {
    /// Create a new event without validating the level
    #[must_use]
    pub const fn new(side: EventSide, level: u8, price: f64, size: f64, event_time: i64) -> Self {
        Self {
            side,
            level,
            price,
            size,
            event_time,
        }
    }

    /// Bid level update
    #[must_use]
    pub const fn bid(level: u8, price: f64, size: f64, event_time: i64) -> Self {
        Self::new(EventSide::Bid, level, price, size, event_time)
    }

    /// Offer level update
    #[must_use]
    pub const fn offer(level: u8, price: f64, size: f64, event_time: i64) -> Self {
        Self::new(EventSide::Offer, level, price, size, event_time)
    }

    /// Trade print; the level is not used
    #[must_use]
    pub const fn trade(price: f64, size: f64, event_time: i64) -> Self {
        Self::new(EventSide::Trade, 0, price, size, event_time)
    }

    /// Zero-based ladder slot for bid/offer updates, `None` for trades
    #[must_use]
    pub fn slot(&self) -> Option<usize> {
        match self.side {
            EventSide::Trade => None,
            EventSide::Bid | EventSide::Offer => Some(usize::from(self.level).wrapping_sub(1)),
        }
    }

    /// Reject bid/offer updates whose level falls outside `1..=BOOK_LEVELS`
    pub fn validate(&self) -> Result<()> {
        if self.side.is_trade() {
            return Ok(());
        }
        if self.level == 0 || usize::from(self.level) > BOOK_LEVELS {
            return Err(Error::MalformedEvent(format!(
                "{} level {} outside 1..={BOOK_LEVELS}",
                self.side, self.level
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot() {
        assert_eq!(TickEvent::bid(1, 100.0, 1.0, 0).slot(), Some(0));
        assert_eq!(TickEvent::offer(5, 100.0, 1.0, 0).slot(), Some(4));
        assert_eq!(TickEvent::trade(100.0, 1.0, 0).slot(), None);
    }

    #[test]
    fn test_validate_levels() {
        assert!(TickEvent::bid(1, 100.0, 1.0, 0).validate().is_ok());
        assert!(TickEvent::offer(5, 100.0, 1.0, 0).validate().is_ok());
        assert!(TickEvent::bid(0, 100.0, 1.0, 0).validate().is_err());
        assert!(TickEvent::offer(6, 100.0, 1.0, 0).validate().is_err());
    }

    #[test]
    fn test_trade_level_ignored() {
        let trade = TickEvent::new(EventSide::Trade, 42, 100.0, 1.0, 0);
        assert!(trade.validate().is_ok());
    }
}
