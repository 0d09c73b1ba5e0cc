//! Feature extraction from the five-level book.

use ladder_core::constants::FEATURE_COUNT;
use serde::{Deserialize, Serialize};

use crate::book::BookState;

/// Feature names in output order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "time_since_last_trade",
    "time_since_last_update",
    "mid_price",
    "spread",
    "volume_bid",
    "volume_offer",
    "imbalance",
    "vwap_bid",
    "vwap_offer",
    "relative_spread",
    "log_spread",
    "price_imbalance",
    "depth_ratio",
    "direction_bid",
    "direction_offer",
];

/// Snapshot of the book's derived scalars.
///
/// Field order matches `FEATURE_NAMES` and `to_array`; downstream consumers
/// index by position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Current time minus last trade time
    pub time_since_last_trade: f64,
    /// Current time minus previous event time
    pub time_since_last_update: f64,
    /// (best offer + best bid) / 2
    pub mid_price: f64,
    /// Best offer minus best bid
    pub spread: f64,
    /// Sum of bid sizes
    pub volume_bid: f64,
    /// Sum of offer sizes
    pub volume_offer: f64,
    /// (bid volume - offer volume) / total volume, 0 on an empty book
    pub imbalance: f64,
    /// Sum of (price + size) over bid slots divided by bid volume
    pub vwap_bid: f64,
    /// Sum of (price + size) over offer slots divided by offer volume
    pub vwap_offer: f64,
    /// Spread over mid price
    pub relative_spread: f64,
    /// ln(best offer / best bid)
    pub log_spread: f64,
    /// (vwap offer - vwap bid) / mid price
    pub price_imbalance: f64,
    /// Bid volume minus offer volume
    pub depth_ratio: f64,
    /// 1 if best bid rose on its last change
    pub direction_bid: f64,
    /// 1 if best offer rose on its last change
    pub direction_offer: f64,
}

impl FeatureVector {
    /// Compute features from the current book state
    #[must_use]
    pub fn from_book(book: &BookState) -> Self {
        let best_bid = book.best_bid();
        let best_offer = book.best_offer();

        let mid_price = (best_offer + best_bid) / 2.0;
        let spread = best_offer - best_bid;
        let volume_bid = book.bid().total_size();
        let volume_offer = book.offer().total_size();

        let vwap_bid = ratio_or_zero(book.bid().price_plus_size_sum(), volume_bid);
        let vwap_offer = ratio_or_zero(book.offer().price_plus_size_sum(), volume_offer);

        let log_spread = if best_bid == 0.0 {
            0.0
        } else {
            (best_offer / best_bid).ln()
        };

        // Differences are taken in f64 so extreme i64 timestamps cannot overflow.
        let time = book.time() as f64;

        Self {
            time_since_last_trade: time - book.last_trade_time() as f64,
            time_since_last_update: time - book.previous_time() as f64,
            mid_price,
            spread,
            volume_bid,
            volume_offer,
            imbalance: ratio_or_zero(volume_bid - volume_offer, volume_bid + volume_offer),
            vwap_bid,
            vwap_offer,
            relative_spread: ratio_or_zero(spread, mid_price),
            log_spread,
            price_imbalance: ratio_or_zero(vwap_offer - vwap_bid, mid_price),
            depth_ratio: volume_bid - volume_offer,
            direction_bid: indicator(best_bid > book.previous_best_bid()),
            direction_offer: indicator(best_offer > book.previous_best_offer()),
        }
    }

    /// Features as a flat array in `FEATURE_NAMES` order
    #[must_use]
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.time_since_last_trade,
            self.time_since_last_update,
            self.mid_price,
            self.spread,
            self.volume_bid,
            self.volume_offer,
            self.imbalance,
            self.vwap_bid,
            self.vwap_offer,
            self.relative_spread,
            self.log_spread,
            self.price_imbalance,
            self.depth_ratio,
            self.direction_bid,
            self.direction_offer,
        ]
    }

    /// Single-precision copy for model input
    #[must_use]
    pub fn to_f32_array(&self) -> [f32; FEATURE_COUNT] {
        self.to_array().map(|v| v as f32)
    }

    /// Feature at position `index`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.to_array().get(index).copied()
    }

    /// Feature by name
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .and_then(|i| self.get(i))
    }

    /// (name, value) pairs in output order
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> {
        FEATURE_NAMES.into_iter().zip(self.to_array())
    }

    /// Check that no feature is NaN or infinite
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }
}

impl From<FeatureVector> for [f64; FEATURE_COUNT] {
    fn from(features: FeatureVector) -> Self {
        features.to_array()
    }
}

impl From<&BookState> for FeatureVector {
    fn from(book: &BookState) -> Self {
        Self::from_book(book)
    }
}

#[inline]
fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

#[inline]
fn indicator(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}
