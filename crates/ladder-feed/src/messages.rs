//! Raw tick rows and their conversion into validated events.

use ladder_core::constants::PRICE_DECIMALS;
use ladder_core::error::{Error, Result};
use ladder_core::types::{EventSide, TickEvent};
use serde::{Deserialize, Serialize};

/// Round a price to `PRICE_DECIMALS` decimal digits
#[inline]
#[must_use]
pub fn round_price(price: f64) -> f64 {
    let scale = 10f64.powi(PRICE_DECIMALS);
    (price * scale).round() / scale
}

/// One tick log row as handed over by a tabular reader, before validation.
///
/// `side` holds either a tag (`BI`, `OF`, `TRADE`) or a numeric code
/// (`0`, `1`, `2`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTick {
    /// Side tag or numeric side code
    pub side: String,
    /// Ladder level, 1-based; ignored for trades
    pub level: i64,
    /// Price as read, not yet rounded
    pub price: f64,
    /// Size
    pub size: f64,
    /// Event time in nanoseconds
    pub event_time: i64,
}

impl RawTick {
    /// Create a raw row
    #[must_use]
    pub fn new(side: impl Into<String>, level: i64, price: f64, size: f64, event_time: i64) -> Self {
        Self {
            side: side.into(),
            level,
            price,
            size,
            event_time,
        }
    }

    /// Parse the side column
    pub fn event_side(&self) -> Result<EventSide> {
        match self.side.trim().parse::<u8>() {
            Ok(code) => EventSide::try_from(code),
            Err(_) => self.side.parse(),
        }
    }

    /// Validate the row and convert it into a `TickEvent` with a rounded price
    pub fn to_event(&self) -> Result<TickEvent> {
        let side = self.event_side()?;

        let level = if side.is_trade() {
            u8::try_from(self.level).unwrap_or(0)
        } else {
            u8::try_from(self.level)
                .map_err(|_| Error::MalformedEvent(format!("{side} level {} out of range", self.level)))?
        };

        let event = TickEvent::new(side, level, round_price(self.price), self.size, self.event_time);
        event.validate()?;
        Ok(event)
    }
}

impl TryFrom<&RawTick> for TickEvent {
    type Error = Error;

    fn try_from(raw: &RawTick) -> Result<Self> {
        raw.to_event()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_price() {
        assert_eq!(round_price(100.123_456_789), 100.123_457);
        assert_eq!(round_price(99.5), 99.5);
        assert_eq!(round_price(0.1 + 0.2), 0.3);
    }

    #[test]
    fn test_tag_rows() {
        let bid = RawTick::new("BI", 2, 99.5, 5.0, 10).to_event().unwrap();
        assert_eq!(bid, TickEvent::bid(2, 99.5, 5.0, 10));

        let offer = RawTick::new("OF", 1, 100.5, 8.0, 10).to_event().unwrap();
        assert_eq!(offer.side, EventSide::Offer);
    }

    #[test]
    fn test_numeric_codes() {
        let trade = RawTick::new("2", -1, 100.0, 3.0, 11).to_event().unwrap();
        assert_eq!(trade, TickEvent::trade(100.0, 3.0, 11));

        assert!(matches!(
            RawTick::new("7", 1, 100.0, 3.0, 11).to_event(),
            Err(Error::MalformedEvent(_))
        ));
    }

    #[test]
    fn test_rejects_bad_levels() {
        for level in [0, 6, -1, 300] {
            let result = RawTick::new("BI", level, 100.0, 1.0, 0).to_event();
            assert!(matches!(result, Err(Error::MalformedEvent(_))), "level {level}");
        }
    }

    #[test]
    fn test_rejects_unknown_tag() {
        let result = RawTick::new("ASK", 1, 100.0, 1.0, 0).to_event();
        assert!(matches!(result, Err(Error::MalformedEvent(_))));
    }

    #[test]
    fn test_price_rounded_on_conversion() {
        let event = RawTick::new("OF", 1, 100.500_000_4, 1.0, 0).to_event().unwrap();
        assert_eq!(event.price, 100.5);
    }
}
