//! # ladder-lob
//!
//! Five-level limit order book replay and feature extraction.
//!
//! This crate provides:
//! - `Ladder`: fixed five-slot price ladder with dedup/sort normalization
//! - `BookState`: state machine consuming one timestamp group per `advance`
//! - `FeatureVector`: the 15 derived scalars read from a `BookState`
//! - `FeatureWindow`: ring buffer of recent feature vectors
//!
//! ## Example
//!
//! ```rust
//! use ladder_feed::synthetic::{SyntheticConfig, SyntheticGenerator};
//! use ladder_lob::{BookState, FeatureWindow};
//!
//! let log = SyntheticGenerator::new(SyntheticConfig::default())
//!     .generate_log(500)
//!     .unwrap();
//!
//! let mut book = BookState::new();
//! let mut window = FeatureWindow::new(16);
//! while book.has_next(&log) {
//!     book.advance(&log).unwrap();
//!     window.push(book.extract_features());
//! }
//! assert!(window.is_full());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::float_cmp,
    clippy::missing_errors_doc
)]

pub mod book;
pub mod features;
pub mod ladder;
pub mod window;

pub use book::BookState;
pub use features::{FeatureVector, FEATURE_NAMES};
pub use ladder::Ladder;
pub use window::FeatureWindow;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::book::BookState;
    pub use crate::features::{FeatureVector, FEATURE_NAMES};
    pub use crate::ladder::Ladder;
    pub use crate::window::FeatureWindow;
}
