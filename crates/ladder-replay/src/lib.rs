//! # ladder-replay
//!
//! Replay driver and configuration for the five-level book.
//!
//! This crate provides:
//! - `ReplayConfig`, loaded from TOML
//! - `Replayer`, which walks an event source batch by batch and hands each
//!   feature vector to a callback
//! - The `ladder-replay` binary

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::missing_errors_doc
)]

pub mod config;
pub mod replay;

pub use config::ReplayConfig;
pub use replay::{ReplaySummary, Replayer};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::ReplayConfig;
    pub use crate::replay::{ReplaySummary, Replayer};
}
