//! # ladder-core
//!
//! Core types, traits, and errors shared by the TickLadder replay crates.
//!
//! This crate provides:
//! - Domain types: `PriceLevel`, `Side`, `EventSide`
//! - The `EventSource` contract for indexable tick logs
//! - A single error type for fatal replay conditions
//!
//! ## Example
//!
//! ```rust
//! use ladder_core::types::{EventSide, PriceLevel, Side};
//!
//! let level = PriceLevel::new(100.0, 10.0);
//! assert!(!level.is_empty());
//!
//! let side: EventSide = "BI".parse().unwrap();
//! assert_eq!(side.book_side(), Some(Side::Bid));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::float_cmp)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

pub use constants::*;
pub use error::{Error, Result};
pub use traits::*;
pub use types::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::constants::*;
    pub use crate::error::{Error, Result};
    pub use crate::traits::*;
    pub use crate::types::*;
}
