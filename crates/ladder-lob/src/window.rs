//! Ring buffer of recent feature vectors for sequence models.

use ladder_core::constants::{DEFAULT_WINDOW_SIZE, FEATURE_COUNT};
use ndarray::Array2;

use crate::book::BookState;
use crate::features::FeatureVector;

/// Fixed-capacity history of feature vectors, most recent last in time
#[derive(Debug, Clone)]
pub struct FeatureWindow {
    /// Storage for feature vectors
    buffer: Vec<FeatureVector>,
    /// Current write position
    head: usize,
    /// Number of vectors stored
    count: usize,
    /// Maximum capacity
    capacity: usize,
}

impl Default for FeatureWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE)
    }
}

impl FeatureWindow {
    /// Create a window holding up to `capacity` vectors (at least one)
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buffer: vec![FeatureVector::default(); capacity],
            head: 0,
            count: 0,
            capacity,
        }
    }

    /// Push a feature vector, evicting the oldest when full
    pub fn push(&mut self, features: FeatureVector) {
        self.buffer[self.head] = features;
        self.head = (self.head + 1) % self.capacity;
        if self.count < self.capacity {
            self.count += 1;
        }
    }

    /// Push the features of the current book state
    pub fn push_book(&mut self, book: &BookState) {
        self.push(book.extract_features());
    }

    /// Get vector at index (0 = most recent, 1 = the one before, etc.)
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&FeatureVector> {
        if index >= self.count {
            return None;
        }
        let idx = (self.head + self.capacity - 1 - index) % self.capacity;
        self.buffer.get(idx)
    }

    /// Most recent vector
    #[must_use]
    pub fn latest(&self) -> Option<&FeatureVector> {
        self.get(0)
    }

    /// Vector pushed before the most recent one
    #[must_use]
    pub fn previous(&self) -> Option<&FeatureVector> {
        self.get(1)
    }

    /// Number of vectors stored
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Check if the window is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Check if the window is full
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.count == self.capacity
    }

    /// Get capacity
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every stored vector
    pub fn clear(&mut self) {
        self.head = 0;
        self.count = 0;
    }

    /// Iterator over stored vectors (most recent first)
    pub fn iter(&self) -> impl Iterator<Item = &FeatureVector> {
        (0..self.count).filter_map(move |i| self.get(i))
    }

    /// Matrix of the most recent `rows` vectors, shape (rows, `FEATURE_COUNT`),
    /// oldest first. `None` when the window is empty.
    #[must_use]
    pub fn to_matrix(&self, rows: usize) -> Option<Array2<f64>> {
        let actual = rows.min(self.count);
        if actual == 0 {
            return None;
        }

        let mut matrix = Array2::zeros((actual, FEATURE_COUNT));
        for t in 0..actual {
            if let Some(features) = self.get(actual - 1 - t) {
                for (j, value) in features.to_array().into_iter().enumerate() {
                    matrix[[t, j]] = value;
                }
            }
        }

        Some(matrix)
    }

    /// Element-wise change from the previous vector to the latest
    #[must_use]
    pub fn latest_delta(&self) -> Option<[f64; FEATURE_COUNT]> {
        let latest = self.latest()?.to_array();
        let previous = self.previous()?.to_array();
        Some(std::array::from_fn(|i| latest[i] - previous[i]))
    }
}
