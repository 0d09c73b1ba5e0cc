//! Batch-by-batch replay of an event source through the book.

use ladder_core::error::Result;
use ladder_core::traits::EventSource;
use ladder_lob::{BookState, FeatureVector, FeatureWindow};
use serde::{Deserialize, Serialize};

/// Counters gathered over a replay
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ReplaySummary {
    /// Timestamp groups applied
    pub batches: u64,
    /// Raw events consumed
    pub events: usize,
    /// Trade events seen
    pub trades: u64,
    /// Trades that matched no resting level
    pub unmatched_trades: u64,
    /// Features after the last batch, `None` if nothing was replayed
    pub final_features: Option<FeatureVector>,
}

/// Replay state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayState {
    /// Nothing replayed yet
    Ready,
    /// Some batches applied, source not exhausted
    Running,
    /// Source fully consumed
    Completed,
    /// Stopped on an error; the book may hold a partial batch
    Failed,
}

/// Drives a `BookState` over an event source and keeps recent features.
#[derive(Debug, Clone)]
pub struct Replayer {
    book: BookState,
    window: FeatureWindow,
    state: ReplayState,
}

impl Replayer {
    /// Create a replayer keeping `window_size` feature vectors
    #[must_use]
    pub fn new(window_size: usize) -> Self {
        Self {
            book: BookState::new(),
            window: FeatureWindow::new(window_size),
            state: ReplayState::Ready,
        }
    }

    /// Apply one batch and return its features
    pub fn step<S: EventSource + ?Sized>(&mut self, source: &S) -> Result<FeatureVector> {
        if let Err(e) = self.book.advance(source) {
            self.state = ReplayState::Failed;
            tracing::warn!(cursor = self.book.cursor(), error = %e, "replay stopped");
            return Err(e);
        }

        let features = self.book.extract_features();
        self.window.push(features);
        self.state = if self.book.has_next(source) {
            ReplayState::Running
        } else {
            ReplayState::Completed
        };
        Ok(features)
    }

    /// Replay until the source is consumed, calling `on_batch` after every
    /// batch with the book and its features.
    pub fn run<S, F>(&mut self, source: &S, mut on_batch: F) -> Result<ReplaySummary>
    where
        S: EventSource + ?Sized,
        F: FnMut(&BookState, &FeatureVector),
    {
        while self.book.has_next(source) {
            let features = self.step(source)?;
            on_batch(&self.book, &features);
        }

        let summary = self.summary();
        tracing::debug!(
            batches = summary.batches,
            events = summary.events,
            "replay complete"
        );
        Ok(summary)
    }

    /// Replay at most `max_batches` batches; returns how many were applied
    pub fn run_n<S: EventSource + ?Sized>(&mut self, source: &S, max_batches: usize) -> Result<usize> {
        let mut applied = 0;
        while applied < max_batches && self.book.has_next(source) {
            self.step(source)?;
            applied += 1;
        }
        Ok(applied)
    }

    /// Counters so far
    #[must_use]
    pub fn summary(&self) -> ReplaySummary {
        ReplaySummary {
            batches: self.book.update_count(),
            events: self.book.events_processed(),
            trades: self.book.trade_count(),
            unmatched_trades: self.book.unmatched_trades(),
            final_features: self.window.latest().copied(),
        }
    }

    /// Book state
    #[must_use]
    pub fn book(&self) -> &BookState {
        &self.book
    }

    /// Recent feature history
    #[must_use]
    pub fn window(&self) -> &FeatureWindow {
        &self.window
    }

    /// Current replay state
    #[must_use]
    pub fn state(&self) -> ReplayState {
        self.state
    }

    /// Forget all progress, keeping the window capacity
    pub fn reset(&mut self) {
        self.book.reset();
        self.window.clear();
        self.state = ReplayState::Ready;
    }
}

impl Default for Replayer {
    fn default() -> Self {
        Self::new(ladder_core::constants::DEFAULT_WINDOW_SIZE)
    }
}
