//! Core domain types for book replay.

mod event;
mod level;
mod side;

pub use event::TickEvent;
pub use level::PriceLevel;
pub use side::{EventSide, Side};
