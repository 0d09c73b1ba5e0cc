//! # ladder-feed
//!
//! Tick log events and in-memory sources for book replay.
//!
//! This crate provides:
//! - `RawTick` rows and their validation into `TickEvent`s
//! - `TickLog` and `RawTickTable` implementations of `EventSource`
//! - A seeded synthetic tick generator for tests and benchmarks
//!
//! ## Tick log layout
//!
//! Each row carries a side tag, a 1-based level, a price, a size and an
//! integer event time. Rows sharing one event time form a timestamp group
//! that the book consumes in a single step:
//!
//! - `BI` / `OF`: overwrite the bid/offer ladder slot at `level`
//! - `TRADE`: record the last trade and consume size at the matching price
//!
//! ## Example
//!
//! ```rust
//! use ladder_feed::messages::RawTick;
//! use ladder_feed::source::TickLog;
//!
//! let rows = vec![
//!     RawTick::new("BI", 1, 100.0, 10.0, 1),
//!     RawTick::new("OF", 1, 100.5, 8.0, 1),
//! ];
//! let log = TickLog::from_raw(&rows).unwrap();
//! assert_eq!(log.group_count(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap,
    clippy::float_cmp
)]

pub mod messages;
pub mod source;
pub mod synthetic;

pub use messages::{round_price, RawTick};
pub use source::{RawTickTable, TickLog};
pub use synthetic::{SyntheticConfig, SyntheticGenerator};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::messages::{round_price, RawTick};
    pub use crate::source::{RawTickTable, TickLog};
    pub use crate::synthetic::{SyntheticConfig, SyntheticGenerator};
}
