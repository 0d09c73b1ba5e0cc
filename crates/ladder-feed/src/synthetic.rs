//! Synthetic tick logs for testing and development.

use ladder_core::constants::BOOK_LEVELS;
use ladder_core::error::Result;
use ladder_core::types::{EventSide, TickEvent};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::messages::round_price;
use crate::source::TickLog;

/// Configuration for synthetic tick generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticConfig {
    /// Initial mid price
    pub initial_mid: f64,
    /// Tick size
    pub tick_size: f64,
    /// Spread in ticks
    pub spread_ticks: u32,
    /// Average size per level
    pub avg_size: u32,
    /// Number of levels published per side (capped at `BOOK_LEVELS`)
    pub num_levels: usize,
    /// Mid price change per group in ticks (uniform half-width)
    pub volatility: f64,
    /// Probability that a timestamp group carries a trade
    pub trade_frequency: f64,
    /// Average trade size
    pub avg_trade_size: u32,
    /// Maximum level updates per timestamp group
    pub max_updates_per_group: usize,
    /// Start time in nanoseconds
    pub start_time_ns: i64,
    /// Average time between groups in nanoseconds
    pub avg_group_interval_ns: i64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            initial_mid: 100.0,
            tick_size: 0.5,
            spread_ticks: 1,
            avg_size: 10,
            num_levels: BOOK_LEVELS,
            volatility: 0.6,
            trade_frequency: 0.3,
            avg_trade_size: 3,
            max_updates_per_group: 4,
            start_time_ns: 1_700_000_000_000_000_000,
            avg_group_interval_ns: 1_000_000,
        }
    }
}

impl SyntheticConfig {
    /// Thin book with few levels and frequent trades
    #[must_use]
    pub fn thin_book() -> Self {
        Self {
            num_levels: 2,
            avg_size: 3,
            trade_frequency: 0.6,
            avg_trade_size: 2,
            ..Default::default()
        }
    }

    /// Fine tick size with six-decimal prices
    #[must_use]
    pub fn fine_ticks() -> Self {
        Self {
            initial_mid: 0.512_345,
            tick_size: 0.000_001,
            spread_ticks: 3,
            volatility: 2.0,
            ..Default::default()
        }
    }
}

/// Seeded generator of well-formed tick logs.
///
/// Every call to `next_group` yields the events of one timestamp. The first
/// group publishes every configured level on both sides; later groups update a
/// few random levels and sometimes print a trade at a touch price.
pub struct SyntheticGenerator {
    config: SyntheticConfig,
    rng: StdRng,
    mid_ticks: i64,
    current_time: i64,
    bid_levels: Vec<(f64, f64)>,
    offer_levels: Vec<(f64, f64)>,
    snapshot_pending: bool,
}

impl SyntheticGenerator {
    /// Create a new generator with the given config
    #[must_use]
    pub fn new(config: SyntheticConfig) -> Self {
        Self::with_seed(config, 42)
    }

    /// Create a new generator with a specific seed
    #[must_use]
    pub fn with_seed(config: SyntheticConfig, seed: u64) -> Self {
        let mid_ticks = (config.initial_mid / config.tick_size).round() as i64;
        let mut gen = Self {
            mid_ticks,
            current_time: config.start_time_ns,
            bid_levels: Vec::new(),
            offer_levels: Vec::new(),
            snapshot_pending: true,
            rng: StdRng::seed_from_u64(seed),
            config,
        };
        gen.reprice_levels(true);
        gen
    }

    fn levels(&self) -> usize {
        self.config.num_levels.clamp(1, BOOK_LEVELS)
    }

    fn random_size(&mut self) -> f64 {
        let dist = Uniform::new_inclusive(1, self.config.avg_size.max(1) * 2);
        f64::from(dist.sample(&mut self.rng))
    }

    /// Recompute level prices around the current mid; optionally redraw every size
    fn reprice_levels(&mut self, redraw_all: bool) {
        let tick = self.config.tick_size;
        let spread = i64::from(self.config.spread_ticks.max(1));
        let best_bid_ticks = self.mid_ticks - spread / 2 - spread % 2;
        let best_offer_ticks = best_bid_ticks + spread;
        let levels = self.levels();

        let mut bids = Vec::with_capacity(levels);
        let mut offers = Vec::with_capacity(levels);
        for i in 0..levels {
            let keep_bid = !redraw_all && self.rng.gen_bool(0.7);
            let keep_offer = !redraw_all && self.rng.gen_bool(0.7);

            let bid_size = match self.bid_levels.get(i) {
                Some(&(_, size)) if keep_bid => size,
                _ => self.random_size(),
            };
            let offer_size = match self.offer_levels.get(i) {
                Some(&(_, size)) if keep_offer => size,
                _ => self.random_size(),
            };

            let bid_price = round_price((best_bid_ticks - i as i64) as f64 * tick);
            let offer_price = round_price((best_offer_ticks + i as i64) as f64 * tick);
            bids.push((bid_price, bid_size));
            offers.push((offer_price, offer_size));
        }

        self.bid_levels = bids;
        self.offer_levels = offers;
    }

    fn level_event(&self, side: EventSide, index: usize) -> TickEvent {
        let (price, size) = match side {
            EventSide::Offer => self.offer_levels[index],
            _ => self.bid_levels[index],
        };
        TickEvent::new(side, (index + 1) as u8, price, size, self.current_time)
    }

    /// Generate the events of the next timestamp group
    pub fn next_group(&mut self) -> Vec<TickEvent> {
        if self.snapshot_pending {
            self.snapshot_pending = false;
            return self.snapshot();
        }

        let interval = self.config.avg_group_interval_ns.max(2);
        let time_dist = Uniform::new_inclusive(interval / 2, interval * 2);
        self.current_time += time_dist.sample(&mut self.rng);

        let drift: f64 = self.rng.gen::<f64>() * 2.0 - 1.0;
        let floor = i64::from(self.config.spread_ticks) + self.levels() as i64 + 1;
        self.mid_ticks = (self.mid_ticks + (drift * self.config.volatility).round() as i64).max(floor);
        self.reprice_levels(false);

        let levels = self.levels();
        let updates = self
            .rng
            .gen_range(1..=self.config.max_updates_per_group.max(1));
        let mut group = Vec::with_capacity(updates + 1);
        for _ in 0..updates {
            let side = if self.rng.gen_bool(0.5) {
                EventSide::Bid
            } else {
                EventSide::Offer
            };
            let index = self.rng.gen_range(0..levels);
            group.push(self.level_event(side, index));
        }

        if self.rng.gen::<f64>() < self.config.trade_frequency {
            group.push(self.trade());
        }

        group
    }

    /// Print a trade at the current touch and consume its size
    fn trade(&mut self) -> TickEvent {
        let hits_bid = self.rng.gen_bool(0.5);
        let size = f64::from(
            self.rng
                .gen_range(1..=self.config.avg_trade_size.max(1) * 2),
        );

        let touch = if hits_bid {
            &mut self.bid_levels[0]
        } else {
            &mut self.offer_levels[0]
        };
        let price = touch.0;
        touch.1 = (touch.1 - size).max(1.0);

        TickEvent::trade(price, size, self.current_time)
    }

    /// Publish every level on both sides at the current time
    #[must_use]
    pub fn snapshot(&self) -> Vec<TickEvent> {
        let levels = self.levels();
        let mut events = Vec::with_capacity(levels * 2);
        for i in 0..levels {
            events.push(self.level_event(EventSide::Bid, i));
            events.push(self.level_event(EventSide::Offer, i));
        }
        events
    }

    /// Current mid price
    #[must_use]
    pub fn current_mid(&self) -> f64 {
        round_price(self.mid_ticks as f64 * self.config.tick_size)
    }

    /// Current group time
    #[must_use]
    pub fn current_time(&self) -> i64 {
        self.current_time
    }

    /// Generate exactly `n` events; the final group may be cut short
    pub fn generate_n(&mut self, n: usize) -> Vec<TickEvent> {
        let mut events = Vec::with_capacity(n);
        while events.len() < n {
            events.extend(self.next_group());
        }
        events.truncate(n);
        events
    }

    /// Generate `groups` complete timestamp groups
    pub fn generate_groups(&mut self, groups: usize) -> Vec<TickEvent> {
        (0..groups).flat_map(|_| self.next_group()).collect()
    }

    /// Generate `n` events into a validated tick log
    pub fn generate_log(&mut self, n: usize) -> Result<TickLog> {
        let events = self.generate_n(n);
        tracing::debug!(events = events.len(), "generated synthetic tick log");
        TickLog::from_events(events)
    }

    /// Create an iterator over generated groups
    pub fn iter(&mut self) -> SyntheticIterator<'_> {
        SyntheticIterator { generator: self }
    }
}

/// Iterator over synthetic timestamp groups
pub struct SyntheticIterator<'a> {
    generator: &'a mut SyntheticGenerator,
}

impl<'a> Iterator for SyntheticIterator<'a> {
    type Item = Vec<TickEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generator.next_group())
    }
}
