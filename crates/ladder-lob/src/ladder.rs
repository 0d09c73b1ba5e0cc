//! Fixed five-slot price ladder for one side of the book.

use std::fmt;

use ladder_core::constants::BOOK_LEVELS;
use ladder_core::error::{Error, Result};
use ladder_core::types::{PriceLevel, Side};
use serde::{Deserialize, Serialize};

/// Five price levels on one side of the book.
///
/// Between batches the ladder is normalized: live levels (positive price and
/// size) come first, best price first, with distinct prices, and every
/// remaining slot is exactly `(0, 0)`. While a batch is applied the slots hold
/// raw level overwrites and may be in any order.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ladder {
    side: Side,
    levels: [PriceLevel; BOOK_LEVELS],
}

impl Ladder {
    /// Create an empty ladder
    #[must_use]
    pub const fn new(side: Side) -> Self {
        Self {
            side,
            levels: [PriceLevel::EMPTY; BOOK_LEVELS],
        }
    }

    /// Create a ladder from raw slot contents, without normalizing
    #[must_use]
    pub const fn from_levels(side: Side, levels: [PriceLevel; BOOK_LEVELS]) -> Self {
        Self { side, levels }
    }

    /// Side of the book
    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }

    /// All five slots, best first once normalized
    #[must_use]
    pub const fn levels(&self) -> &[PriceLevel; BOOK_LEVELS] {
        &self.levels
    }

    /// Slot at `index` (0 = best)
    #[must_use]
    pub fn level(&self, index: usize) -> Option<&PriceLevel> {
        self.levels.get(index)
    }

    /// Top slot
    #[must_use]
    pub const fn best(&self) -> PriceLevel {
        self.levels[0]
    }

    /// Top price, zero when the ladder is empty
    #[must_use]
    pub const fn best_price(&self) -> f64 {
        self.levels[0].price
    }

    /// Number of non-empty slots
    #[must_use]
    pub fn depth(&self) -> usize {
        self.levels.iter().filter(|l| !l.is_empty()).count()
    }

    /// Check if every slot is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.iter().all(PriceLevel::is_empty)
    }

    /// Sum of sizes across all slots
    #[must_use]
    pub fn total_size(&self) -> f64 {
        self.levels.iter().map(|l| l.size).sum()
    }

    /// Sum of `price + size` across all slots.
    ///
    /// This is the numerator of the `vwap_*` features as they are defined
    /// downstream. It is not a notional sum.
    #[must_use]
    pub fn price_plus_size_sum(&self) -> f64 {
        self.levels.iter().map(|l| l.price + l.size).sum()
    }

    /// Overwrite the raw slot at `slot` (0-based)
    pub fn overwrite(&mut self, slot: usize, level: PriceLevel) -> Result<()> {
        let target = self.levels.get_mut(slot).ok_or_else(|| {
            Error::MalformedEvent(format!("{} slot {slot} outside 0..{BOOK_LEVELS}", self.side))
        })?;
        *target = level;
        Ok(())
    }

    /// Take `size` off the first slot quoted at exactly `price`.
    ///
    /// Returns whether a slot matched. Sizes may go to zero or below; such
    /// slots are dropped by the next `normalize`.
    pub fn consume(&mut self, price: f64, size: f64) -> bool {
        match self.levels.iter_mut().find(|l| l.price == price) {
            Some(level) => {
                level.size -= size;
                true
            }
            None => false,
        }
    }

    /// Dedup, sort and pad the slots.
    ///
    /// Slots are scanned from index 0 upward. Only live slots are kept, and
    /// when two slots share a price the lower index wins and the other is
    /// dropped (sizes are not summed). Survivors are sorted best first and
    /// the tail is padded with `(0, 0)`. Normalizing a normalized ladder is a
    /// no-op.
    pub fn normalize(&mut self) {
        let mut unique = [PriceLevel::EMPTY; BOOK_LEVELS];
        let mut count = 0;

        for level in &self.levels {
            if !level.is_live() {
                continue;
            }
            if unique[..count].iter().any(|u| u.price == level.price) {
                continue;
            }
            unique[count] = *level;
            count += 1;
        }

        let live = &mut unique[..count];
        match self.side {
            Side::Bid => live.sort_unstable_by(|a, b| b.price.total_cmp(&a.price)),
            Side::Offer => live.sort_unstable_by(|a, b| a.price.total_cmp(&b.price)),
        }

        self.levels = unique;
    }

    /// Check the normalized-ladder invariant
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        let live = self.levels.iter().take_while(|l| !l.is_empty()).count();

        let ordered = self.levels[..live]
            .windows(2)
            .all(|pair| self.side.is_better(pair[0].price, pair[1].price));
        let all_live = self.levels[..live].iter().all(PriceLevel::is_live);
        let padded = self.levels[live..].iter().all(|l| *l == PriceLevel::EMPTY);

        ordered && all_live && padded
    }

    /// Iterate over non-empty slots
    pub fn iter(&self) -> impl Iterator<Item = &PriceLevel> {
        self.levels.iter().filter(|l| !l.is_empty())
    }

    /// Reset every slot to `(0, 0)`
    pub fn clear(&mut self) {
        self.levels = [PriceLevel::EMPTY; BOOK_LEVELS];
    }
}

impl Default for Ladder {
    fn default() -> Self {
        Self::new(Side::Bid)
    }
}

impl fmt::Debug for Ladder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ladder")
            .field("side", &self.side)
            .field("levels", &self.levels)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lv(price: f64, size: f64) -> PriceLevel {
        PriceLevel::new(price, size)
    }

    #[test]
    fn test_empty_ladder() {
        let ladder = Ladder::new(Side::Bid);
        assert!(ladder.is_empty());
        assert!(ladder.is_normalized());
        assert_eq!(ladder.depth(), 0);
        assert_eq!(ladder.best_price(), 0.0);
    }

    #[test]
    fn test_bid_sorted_descending() {
        let mut ladder = Ladder::from_levels(
            Side::Bid,
            [lv(99.0, 1.0), lv(100.0, 2.0), PriceLevel::EMPTY, lv(99.5, 3.0), PriceLevel::EMPTY],
        );
        ladder.normalize();

        assert_eq!(
            ladder.levels(),
            &[lv(100.0, 2.0), lv(99.5, 3.0), lv(99.0, 1.0), PriceLevel::EMPTY, PriceLevel::EMPTY]
        );
        assert!(ladder.is_normalized());
    }

    #[test]
    fn test_offer_sorted_ascending() {
        let mut ladder = Ladder::from_levels(
            Side::Offer,
            [lv(101.0, 1.0), lv(100.5, 2.0), lv(102.0, 3.0), PriceLevel::EMPTY, PriceLevel::EMPTY],
        );
        ladder.normalize();

        assert_eq!(ladder.best(), lv(100.5, 2.0));
        assert_eq!(ladder.level(2), Some(&lv(102.0, 3.0)));
        assert!(ladder.is_normalized());
    }

    #[test]
    fn test_duplicate_price_lowest_slot_wins() {
        let mut ladder = Ladder::from_levels(
            Side::Bid,
            [lv(100.0, 4.0), lv(99.0, 1.0), lv(100.0, 9.0), PriceLevel::EMPTY, PriceLevel::EMPTY],
        );
        ladder.normalize();

        assert_eq!(ladder.best(), lv(100.0, 4.0));
        assert_eq!(ladder.depth(), 2);
        assert_eq!(ladder.total_size(), 5.0);
    }

    #[test]
    fn test_dead_levels_dropped() {
        let mut ladder = Ladder::from_levels(
            Side::Offer,
            [lv(100.0, 0.0), lv(101.0, -3.0), lv(-1.0, 5.0), lv(102.0, 1.0), PriceLevel::EMPTY],
        );
        ladder.normalize();

        assert_eq!(ladder.depth(), 1);
        assert_eq!(ladder.best(), lv(102.0, 1.0));
    }

    #[test]
    fn test_normalize_idempotent() {
        let mut ladder = Ladder::from_levels(
            Side::Bid,
            [lv(98.0, 1.0), lv(100.0, 2.0), lv(98.0, 7.0), lv(99.0, 0.0), lv(97.5, 4.0)],
        );
        ladder.normalize();
        let once = ladder;
        ladder.normalize();

        assert_eq!(ladder, once);
    }

    #[test]
    fn test_consume_first_match_only() {
        let mut ladder = Ladder::from_levels(
            Side::Bid,
            [lv(100.0, 10.0), lv(100.0, 6.0), PriceLevel::EMPTY, PriceLevel::EMPTY, PriceLevel::EMPTY],
        );

        assert!(ladder.consume(100.0, 3.0));
        assert_eq!(ladder.level(0), Some(&lv(100.0, 7.0)));
        assert_eq!(ladder.level(1), Some(&lv(100.0, 6.0)));
        assert!(!ladder.consume(101.0, 1.0));
    }

    #[test]
    fn test_overwrite_bounds() {
        let mut ladder = Ladder::new(Side::Offer);
        assert!(ladder.overwrite(4, lv(100.0, 1.0)).is_ok());
        assert!(matches!(
            ladder.overwrite(5, lv(100.0, 1.0)),
            Err(Error::MalformedEvent(_))
        ));
    }

    #[test]
    fn test_sums() {
        let ladder = Ladder::from_levels(
            Side::Bid,
            [lv(100.0, 10.0), lv(99.5, 5.0), PriceLevel::EMPTY, PriceLevel::EMPTY, PriceLevel::EMPTY],
        );

        assert_eq!(ladder.total_size(), 15.0);
        assert_eq!(ladder.price_plus_size_sum(), 214.5);
    }
}
