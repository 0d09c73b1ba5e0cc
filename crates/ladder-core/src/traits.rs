//! Core traits for book replay.

use crate::error::{Error, Result};
use crate::types::TickEvent;

/// Indexable, read-only sequence of tick events.
///
/// Rows are ordered by non-decreasing `event_time`. Implementations signal a
/// read past the end with `Error::SourceExhausted` and a row they cannot
/// interpret with `Error::MalformedEvent`.
pub trait EventSource {
    /// Number of events in the source
    fn len(&self) -> usize;

    /// Check if the source holds no events
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the event at `index`
    fn event(&self, index: usize) -> Result<TickEvent>;

    /// Read only the timestamp of the event at `index`
    fn event_time(&self, index: usize) -> Result<i64> {
        self.event(index).map(|e| e.event_time)
    }
}

impl EventSource for [TickEvent] {
    fn len(&self) -> usize {
        <[TickEvent]>::len(self)
    }

    fn event(&self, index: usize) -> Result<TickEvent> {
        self.get(index).copied().ok_or(Error::SourceExhausted {
            cursor: index,
            len: <[TickEvent]>::len(self),
        })
    }
}

impl EventSource for Vec<TickEvent> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn event(&self, index: usize) -> Result<TickEvent> {
        self.as_slice().event(index)
    }
}

impl<S: EventSource + ?Sized> EventSource for &S {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn event(&self, index: usize) -> Result<TickEvent> {
        (**self).event(index)
    }

    fn event_time(&self, index: usize) -> Result<i64> {
        (**self).event_time(index)
    }
}
