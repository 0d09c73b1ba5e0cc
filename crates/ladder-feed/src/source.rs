//! In-memory event sources.

use ladder_core::error::{Error, Result};
use ladder_core::traits::EventSource;
use ladder_core::types::TickEvent;

use crate::messages::RawTick;

/// Validated, time-ordered tick log held in memory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickLog {
    events: Vec<TickEvent>,
}

impl TickLog {
    /// Create an empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a log from events, validating levels and time ordering
    pub fn from_events(events: Vec<TickEvent>) -> Result<Self> {
        let mut log = Self::with_capacity(events.len());
        for event in events {
            log.push(event)?;
        }
        Ok(log)
    }

    /// Convert and validate raw rows
    pub fn from_raw(rows: &[RawTick]) -> Result<Self> {
        let mut log = Self::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            let event = row.to_event().map_err(|e| e.at_event(index))?;
            log.push(event).map_err(|e| e.at_event(index))?;
        }
        tracing::debug!(events = log.len(), "tick log loaded from raw rows");
        Ok(log)
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity),
        }
    }

    /// Append an event. Times must not decrease.
    pub fn push(&mut self, event: TickEvent) -> Result<()> {
        event.validate()?;
        if let Some(last) = self.events.last() {
            if event.event_time < last.event_time {
                return Err(Error::MalformedEvent(format!(
                    "event time {} precedes {}",
                    event.event_time, last.event_time
                )));
            }
        }
        self.events.push(event);
        Ok(())
    }

    /// Number of events
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events in order
    #[must_use]
    pub fn events(&self) -> &[TickEvent] {
        &self.events
    }

    /// Iterate over runs of events sharing one event time
    pub fn groups(&self) -> impl Iterator<Item = &[TickEvent]> {
        self.events.chunk_by(|a, b| a.event_time == b.event_time)
    }

    /// Number of distinct timestamp groups
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups().count()
    }
}

impl EventSource for TickLog {
    fn len(&self) -> usize {
        self.events.len()
    }

    fn event(&self, index: usize) -> Result<TickEvent> {
        self.events.as_slice().event(index)
    }
}

/// Raw rows validated lazily as the replay reads them.
///
/// A malformed row surfaces only when the cursor reaches it, which mirrors a
/// tabular reader that hands over unparsed columns.
#[derive(Debug, Clone, Default)]
pub struct RawTickTable {
    rows: Vec<RawTick>,
}

impl RawTickTable {
    /// Wrap raw rows
    #[must_use]
    pub fn new(rows: Vec<RawTick>) -> Self {
        Self { rows }
    }

    /// Raw rows
    #[must_use]
    pub fn rows(&self) -> &[RawTick] {
        &self.rows
    }
}

impl EventSource for RawTickTable {
    fn len(&self) -> usize {
        self.rows.len()
    }

    fn event(&self, index: usize) -> Result<TickEvent> {
        let row = self.rows.get(index).ok_or(Error::SourceExhausted {
            cursor: index,
            len: self.rows.len(),
        })?;
        row.to_event().map_err(|e| e.at_event(index))
    }

    fn event_time(&self, index: usize) -> Result<i64> {
        self.rows
            .get(index)
            .map(|row| row.event_time)
            .ok_or(Error::SourceExhausted {
                cursor: index,
                len: self.rows.len(),
            })
    }
}
