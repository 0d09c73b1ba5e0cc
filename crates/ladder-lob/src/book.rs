//! Five-level book state machine driven by a tick log.

use ladder_core::error::{Error, Result};
use ladder_core::traits::EventSource;
use ladder_core::types::{EventSide, PriceLevel, Side, TickEvent};
use serde::{Deserialize, Serialize};

use crate::features::FeatureVector;
use crate::ladder::Ladder;

/// Book state rebuilt from a tick log, one timestamp group at a time.
///
/// `advance` is the only mutator. Every other method is a read-only view used
/// for diagnostics and feature extraction.
///
/// ## Example
///
/// ```rust
/// use ladder_core::types::TickEvent;
/// use ladder_lob::BookState;
///
/// let events = vec![
///     TickEvent::bid(1, 100.0, 10.0, 1),
///     TickEvent::offer(1, 100.5, 8.0, 1),
/// ];
///
/// let mut book = BookState::new();
/// book.advance(&events).unwrap();
/// assert_eq!(book.extract_features().mid_price, 100.25);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookState {
    bid: Ladder,
    offer: Ladder,
    last_trade: PriceLevel,
    time: i64,
    previous_time: i64,
    last_trade_time: i64,
    best_bid: f64,
    previous_best_bid: f64,
    best_offer: f64,
    previous_best_offer: f64,
    bid_volume: f64,
    offer_volume: f64,
    /// Index of the next event to read from the source
    cursor: usize,
    update_count: u64,
    trade_count: u64,
    unmatched_trades: u64,
}

impl Default for BookState {
    fn default() -> Self {
        Self::new()
    }
}

impl BookState {
    /// Create an empty book at time zero
    #[must_use]
    pub fn new() -> Self {
        Self {
            bid: Ladder::new(Side::Bid),
            offer: Ladder::new(Side::Offer),
            last_trade: PriceLevel::EMPTY,
            time: 0,
            previous_time: 0,
            last_trade_time: 0,
            best_bid: 0.0,
            previous_best_bid: 0.0,
            best_offer: 0.0,
            previous_best_offer: 0.0,
            bid_volume: 0.0,
            offer_volume: 0.0,
            cursor: 0,
            update_count: 0,
            trade_count: 0,
            unmatched_trades: 0,
        }
    }

    /// Consume the next timestamp group from `source` and re-normalize.
    ///
    /// Reads the event at the cursor, then keeps reading while the next event
    /// carries the same time. Returns the number of events consumed, which is
    /// always at least one.
    ///
    /// Fails with `SourceExhausted` when no event is left at the cursor
    /// (including a first call on an empty source) and with `MalformedEvent`
    /// when a bid/offer level is out of range. Both are fatal: the book may
    /// hold a partially applied group afterwards and the replay should stop.
    pub fn advance<S: EventSource + ?Sized>(&mut self, source: &S) -> Result<usize> {
        let len = source.len();
        if self.cursor >= len {
            return Err(Error::SourceExhausted {
                cursor: self.cursor,
                len,
            });
        }

        let start = self.cursor;
        loop {
            let event = source.event(self.cursor)?;
            event.validate().map_err(|e| e.at_event(self.cursor))?;
            self.apply(&event)?;
            self.cursor += 1;

            if self.cursor >= len || source.event_time(self.cursor)? != self.time {
                break;
            }
        }

        self.renormalize();
        self.update_best_prices();
        self.bid_volume = self.bid.total_size();
        self.offer_volume = self.offer.total_size();
        self.update_count += 1;

        let consumed = self.cursor - start;
        tracing::trace!(
            time = self.time,
            events = consumed,
            best_bid = self.best_bid,
            best_offer = self.best_offer,
            "book advanced"
        );
        Ok(consumed)
    }

    /// Apply one event to the raw ladder slots
    fn apply(&mut self, event: &TickEvent) -> Result<()> {
        if event.event_time != self.time {
            self.previous_time = self.time;
            self.time = event.event_time;
        }

        let level = PriceLevel::new(event.price, event.size);
        match event.side {
            EventSide::Bid => self.bid.overwrite(usize::from(event.level) - 1, level)?,
            EventSide::Offer => self.offer.overwrite(usize::from(event.level) - 1, level)?,
            EventSide::Trade => {
                self.last_trade_time = event.event_time;
                self.last_trade = level;
                self.trade_count += 1;

                // Bid slots are scanned before offer slots.
                let matched = self.bid.consume(event.price, event.size)
                    || self.offer.consume(event.price, event.size);
                if !matched {
                    self.unmatched_trades += 1;
                    tracing::trace!(price = event.price, size = event.size, "trade matched no level");
                }
            }
        }
        Ok(())
    }

    /// Dedup, sort and pad both ladders
    pub fn renormalize(&mut self) {
        self.bid.normalize();
        self.offer.normalize();
    }

    /// Roll best prices forward. An empty side keeps its previous best.
    fn update_best_prices(&mut self) {
        let top_bid = self.bid.best_price();
        if top_bid != self.best_bid && top_bid != 0.0 {
            self.previous_best_bid = self.best_bid;
            self.best_bid = top_bid;
        }

        let top_offer = self.offer.best_price();
        if top_offer != self.best_offer && top_offer != 0.0 {
            self.previous_best_offer = self.best_offer;
            self.best_offer = top_offer;
        }
    }

    /// Compute the feature vector for the current state
    #[must_use]
    pub fn extract_features(&self) -> FeatureVector {
        FeatureVector::from_book(self)
    }

    /// Check if another group can be read from `source`
    #[must_use]
    pub fn has_next<S: EventSource + ?Sized>(&self, source: &S) -> bool {
        self.cursor < source.len()
    }

    /// Return to the empty state at cursor zero
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Bid ladder
    #[must_use]
    pub const fn bid(&self) -> &Ladder {
        &self.bid
    }

    /// Offer ladder
    #[must_use]
    pub const fn offer(&self) -> &Ladder {
        &self.offer
    }

    /// Ladder for `side`
    #[must_use]
    pub const fn ladder(&self, side: Side) -> &Ladder {
        match side {
            Side::Bid => &self.bid,
            Side::Offer => &self.offer,
        }
    }

    /// Last trade as (price, size)
    #[must_use]
    pub const fn last_trade(&self) -> PriceLevel {
        self.last_trade
    }

    /// Current event time
    #[must_use]
    pub const fn time(&self) -> i64 {
        self.time
    }

    /// Event time before the current one
    #[must_use]
    pub const fn previous_time(&self) -> i64 {
        self.previous_time
    }

    /// Time of the last trade
    #[must_use]
    pub const fn last_trade_time(&self) -> i64 {
        self.last_trade_time
    }

    /// Best bid price
    #[must_use]
    pub const fn best_bid(&self) -> f64 {
        self.best_bid
    }

    /// Best bid before the last change
    #[must_use]
    pub const fn previous_best_bid(&self) -> f64 {
        self.previous_best_bid
    }

    /// Best offer price
    #[must_use]
    pub const fn best_offer(&self) -> f64 {
        self.best_offer
    }

    /// Best offer before the last change
    #[must_use]
    pub const fn previous_best_offer(&self) -> f64 {
        self.previous_best_offer
    }

    /// Sum of bid sizes as of the last advance
    #[must_use]
    pub const fn bid_volume(&self) -> f64 {
        self.bid_volume
    }

    /// Sum of offer sizes as of the last advance
    #[must_use]
    pub const fn offer_volume(&self) -> f64 {
        self.offer_volume
    }

    /// Index of the next event to read
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of events consumed so far
    #[must_use]
    pub const fn events_processed(&self) -> usize {
        self.cursor
    }

    /// Number of successful `advance` calls
    #[must_use]
    pub const fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Number of trades seen
    #[must_use]
    pub const fn trade_count(&self) -> u64 {
        self.trade_count
    }

    /// Number of trades whose price matched no ladder slot
    #[must_use]
    pub const fn unmatched_trades(&self) -> u64 {
        self.unmatched_trades
    }

    /// Check if best bid is at or above best offer
    #[must_use]
    pub fn is_crossed(&self) -> bool {
        self.best_bid != 0.0 && self.best_offer != 0.0 && self.best_bid >= self.best_offer
    }
}
