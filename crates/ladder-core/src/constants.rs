//! Constants used throughout the TickLadder crates.

/// Number of price levels tracked per side of the book
pub const BOOK_LEVELS: usize = 5;

/// Number of scalars in a feature vector
pub const FEATURE_COUNT: usize = 15;

/// Decimal digits prices are rounded to by the event source
pub const PRICE_DECIMALS: i32 = 6;

/// Number of feature vectors kept by default in a feature window
pub const DEFAULT_WINDOW_SIZE: usize = 100;
