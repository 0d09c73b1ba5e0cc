//! Error types for book replay.

use thiserror::Error;

/// Core error type for replay.
///
/// Every variant is fatal to the replay it occurs in. Zero denominators in
/// feature math and trades that match no resting level are not errors and
/// never surface here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The cursor needs another event but the source has none left
    #[error("Event source exhausted: cursor {cursor} of {len} events")]
    SourceExhausted {
        /// Cursor position that was requested
        cursor: usize,
        /// Length of the event source
        len: usize,
    },

    /// Side tag or level outside the accepted domain
    #[error("Malformed event: {0}")]
    MalformedEvent(String),
}

impl Error {
    /// Build a `MalformedEvent` for the event at `index`
    #[must_use]
    pub fn malformed_at(index: usize, reason: impl std::fmt::Display) -> Self {
        Error::MalformedEvent(format!("event #{index}: {reason}"))
    }

    /// Attach an event index to a `MalformedEvent`; other variants pass through
    #[must_use]
    pub fn at_event(self, index: usize) -> Self {
        match self {
            Error::MalformedEvent(reason) => Error::malformed_at(index, reason),
            other => other,
        }
    }
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;
