//! Book side and event side tags.

use std::fmt;
use std::ops::Not;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Side of the book a ladder belongs to
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Side {
    /// Bid side, best price is the highest
    #[default]
    Bid = 0,
    /// Offer side, best price is the lowest
    Offer = 1,
}

impl Side {
    /// Get the opposite side
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Bid => Side::Offer,
            Side::Offer => Side::Bid,
        }
    }

    /// Whether `a` ranks ahead of `b` on this side of the book
    #[inline]
    #[must_use]
    pub fn is_better(self, a: f64, b: f64) -> bool {
        match self {
            Side::Bid => a > b,
            Side::Offer => a < b,
        }
    }
}

impl Not for Side {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        self.opposite()
    }
}

impl fmt::Debug for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bid => write!(f, "Bid"),
            Side::Offer => write!(f, "Offer"),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bid => write!(f, "BID"),
            Side::Offer => write!(f, "OFFER"),
        }
    }
}

/// Side tag carried by a tick event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum EventSide {
    /// Bid level snapshot
    Bid = 0,
    /// Offer level snapshot
    Offer = 1,
    /// Trade print
    Trade = 2,
}

impl EventSide {
    /// Book side this event writes to, `None` for trades
    #[inline]
    #[must_use]
    pub const fn book_side(self) -> Option<Side> {
        match self {
            EventSide::Bid => Some(Side::Bid),
            EventSide::Offer => Some(Side::Offer),
            EventSide::Trade => None,
        }
    }

    /// Check if this is a trade print
    #[inline]
    #[must_use]
    pub const fn is_trade(self) -> bool {
        matches!(self, EventSide::Trade)
    }

    /// Create from the numeric code used by compact tick logs (0 = bid, 1 = offer, 2 = trade)
    #[inline]
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(EventSide::Bid),
            1 => Some(EventSide::Offer),
            2 => Some(EventSide::Trade),
            _ => None,
        }
    }

    /// Tag as written in the tick log
    #[must_use]
    pub const fn as_tag(self) -> &'static str {
        match self {
            EventSide::Bid => "BI",
            EventSide::Offer => "OF",
            EventSide::Trade => "TRADE",
        }
    }
}

impl fmt::Display for EventSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl FromStr for EventSide {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "BI" | "BID" => Ok(EventSide::Bid),
            "OF" | "OFFER" => Ok(EventSide::Offer),
            "TRADE" => Ok(EventSide::Trade),
            other => Err(Error::MalformedEvent(format!("unknown side tag '{other}'"))),
        }
    }
}

impl TryFrom<u8> for EventSide {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        EventSide::from_code(value)
            .ok_or_else(|| Error::MalformedEvent(format!("unknown side code {value}")))
    }
}
