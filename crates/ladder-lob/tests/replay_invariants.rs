//! Replay-level invariants of the book state machine
//!
//! These tests drive `BookState` over seeded synthetic logs and hand-built
//! sources and check properties that must hold after every batch:
//! - both ladders are normalized (ordered, live, distinct, zero padded)
//! - feature extraction is pure and repeatable
//! - renormalizing a normalized book changes nothing
//! - bad rows stop the replay with a positioned error

use ladder_core::constants::{BOOK_LEVELS, FEATURE_COUNT};
use ladder_core::error::Error;
use ladder_core::types::{PriceLevel, Side, TickEvent};
use ladder_feed::{RawTick, RawTickTable, SyntheticConfig, SyntheticGenerator, TickLog};
use ladder_lob::{BookState, FeatureVector, FeatureWindow};

fn synthetic_log(config: SyntheticConfig, seed: u64, events: usize) -> TickLog {
    SyntheticGenerator::with_seed(config, seed)
        .generate_log(events)
        .unwrap()
}

fn assert_ladder_invariants(book: &BookState, side: Side) {
    let ladder = book.ladder(side);
    assert!(ladder.is_normalized(), "{side} ladder not normalized: {ladder:?}");
    assert!(ladder.depth() <= BOOK_LEVELS);

    let live: Vec<f64> = ladder.iter().map(|l| l.price).collect();
    for (i, a) in live.iter().enumerate() {
        for b in &live[i + 1..] {
            assert_ne!(a, b, "{side} ladder holds duplicate price {a}");
        }
    }
    for slot in &ladder.levels()[ladder.depth()..] {
        assert_eq!(*slot, PriceLevel::EMPTY);
    }
}

#[test]
fn test_invariants_hold_after_every_batch() {
    for seed in [1, 7, 42, 1_234] {
        let log = synthetic_log(SyntheticConfig::default(), seed, 2_000);
        let mut book = BookState::new();
        let mut consumed = 0;

        while book.has_next(&log) {
            consumed += book.advance(&log).unwrap();

            assert_ladder_invariants(&book, Side::Bid);
            assert_ladder_invariants(&book, Side::Offer);
            assert_eq!(book.best_bid(), book.bid().best_price());
            assert_eq!(book.best_offer(), book.offer().best_price());
            assert_eq!(book.bid_volume(), book.bid().total_size());
            assert_eq!(book.offer_volume(), book.offer().total_size());
            assert!(book.previous_time() <= book.time());
        }

        assert_eq!(consumed, log.len());
        assert_eq!(book.events_processed(), log.len());
        assert_eq!(book.update_count() as usize, log.group_count());
    }
}

#[test]
fn test_thin_book_invariants() {
    let log = synthetic_log(SyntheticConfig::thin_book(), 99, 1_500);
    let mut book = BookState::new();

    while book.has_next(&log) {
        book.advance(&log).unwrap();
        assert_ladder_invariants(&book, Side::Bid);
        assert_ladder_invariants(&book, Side::Offer);
        assert!(book.bid().depth() <= 2);
        assert!(book.offer().depth() <= 2);
    }

    assert!(book.trade_count() > 0);
    assert!(book.unmatched_trades() <= book.trade_count());
}

#[test]
fn test_extraction_is_repeatable() {
    let log = synthetic_log(SyntheticConfig::default(), 5, 1_000);
    let mut book = BookState::new();

    while book.has_next(&log) {
        book.advance(&log).unwrap();
        let snapshot = book.clone();

        let first = book.extract_features();
        let second = FeatureVector::from(&book);
        assert_eq!(first.to_array(), second.to_array());
        assert_eq!(book, snapshot);

        if book.best_bid() > 0.0 && book.best_offer() > 0.0 {
            assert!(first.is_finite(), "non-finite features: {first:?}");
        }
    }
}

#[test]
fn test_renormalize_is_idempotent_mid_replay() {
    let log = synthetic_log(SyntheticConfig::fine_ticks(), 3, 800);
    let mut book = BookState::new();

    while book.has_next(&log) {
        book.advance(&log).unwrap();
        let before = book.clone();
        book.renormalize();
        assert_eq!(book, before);
    }
}

#[test]
fn test_same_seed_same_features() {
    let run = |seed| {
        let log = synthetic_log(SyntheticConfig::default(), seed, 600);
        let mut book = BookState::new();
        let mut window = FeatureWindow::new(1_000);
        while book.has_next(&log) {
            book.advance(&log).unwrap();
            window.push_book(&book);
        }
        window.to_matrix(window.len()).unwrap()
    };

    let a = run(11);
    let b = run(11);
    assert_eq!(a.ncols(), FEATURE_COUNT);
    assert_eq!(a, b);
}

#[test]
fn test_exhausted_source_is_an_error() {
    let log = synthetic_log(SyntheticConfig::default(), 1, 50);
    let mut book = BookState::new();
    while book.has_next(&log) {
        book.advance(&log).unwrap();
    }

    let before = book.clone();
    assert_eq!(
        book.advance(&log),
        Err(Error::SourceExhausted {
            cursor: 50,
            len: 50
        })
    );
    assert_eq!(book, before);
}

#[test]
fn test_empty_source_first_call_fails() {
    let empty: Vec<TickEvent> = Vec::new();
    let mut book = BookState::new();

    assert!(!book.has_next(&empty));
    assert!(matches!(
        book.advance(&empty),
        Err(Error::SourceExhausted { cursor: 0, len: 0 })
    ));
    assert_eq!(book.extract_features(), FeatureVector::default());
}

#[test]
fn test_malformed_row_stops_replay() {
    let table = RawTickTable::new(vec![
        RawTick::new("BI", 1, 100.0, 10.0, 1_000),
        RawTick::new("OF", 1, 100.5, 8.0, 1_000),
        RawTick::new("BI", 2, 99.5, 4.0, 2_000),
        RawTick::new("OF", 9, 101.0, 4.0, 2_000),
        RawTick::new("BI", 1, 100.0, 3.0, 3_000),
    ]);
    let mut book = BookState::new();

    assert_eq!(book.advance(&table), Ok(2));
    assert_eq!(book.best_bid(), 100.0);

    let err = book.advance(&table).unwrap_err();
    match err {
        Error::MalformedEvent(msg) => assert!(msg.contains("event #3"), "{msg}"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unknown_side_tag_stops_replay() {
    let table = RawTickTable::new(vec![
        RawTick::new("BI", 1, 100.0, 10.0, 1_000),
        RawTick::new("ASK", 1, 100.5, 8.0, 2_000),
    ]);
    let mut book = BookState::new();

    assert!(book.advance(&table).is_ok());
    assert!(matches!(book.advance(&table), Err(Error::MalformedEvent(_))));
}

#[test]
fn test_raw_table_and_log_replay_identically() {
    let rows = vec![
        RawTick::new("BI", 1, 100.000_000_4, 10.0, 1_000),
        RawTick::new("OF", 1, 100.5, 8.0, 1_000),
        RawTick::new("2", 0, 100.0, 4.0, 1_500),
        RawTick::new("0", 2, 99.5, 6.0, 2_000),
        RawTick::new("1", 2, 101.0, 2.0, 2_000),
    ];
    let table = RawTickTable::new(rows.clone());
    let log = TickLog::from_raw(&rows).unwrap();

    let mut from_table = BookState::new();
    let mut from_log = BookState::new();
    while from_log.has_next(&log) {
        from_log.advance(&log).unwrap();
        from_table.advance(&table).unwrap();
        assert_eq!(from_table.extract_features(), from_log.extract_features());
    }

    assert_eq!(from_log.best_bid(), 100.0);
    assert_eq!(from_log.bid().level(0), Some(&PriceLevel::new(100.0, 6.0)));
    assert!(!from_table.has_next(&table));
}

/// Unsorted, duplicated and dead levels mixed with trades at random prices
fn random_events(seed: u64, count: usize) -> Vec<TickEvent> {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(seed);
    let mut time = 0i64;
    let mut events = Vec::with_capacity(count);

    for _ in 0..count {
        if rng.gen_bool(0.4) {
            time += rng.gen_range(1..1_000);
        }
        let price = f64::from(rng.gen_range(190..=210)) * 0.5;
        let size = f64::from(rng.gen_range(-2..=12));
        let level = rng.gen_range(1..=BOOK_LEVELS as u8);
        let event = match rng.gen_range(0..10) {
            0..=3 => TickEvent::bid(level, price, size, time),
            4..=7 => TickEvent::offer(level, price, size, time),
            _ => TickEvent::trade(price, size.abs(), time),
        };
        events.push(event);
    }
    events
}

#[test]
fn test_random_overwrites_keep_ladders_normalized() {
    for seed in 0..20 {
        let events = random_events(seed, 500);
        let mut book = BookState::new();

        while book.has_next(&events) {
            book.advance(&events).unwrap();
            assert_ladder_invariants(&book, Side::Bid);
            assert_ladder_invariants(&book, Side::Offer);

            let before = book.clone();
            book.renormalize();
            assert_eq!(book, before);
        }

        assert_eq!(book.events_processed(), events.len());
        assert!(book.unmatched_trades() <= book.trade_count());
    }
}
