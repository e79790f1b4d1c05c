// Bounded FIFO window shared by the history table, chart series and alert queue
use serde::Serialize;
use std::collections::VecDeque;

/// Sliding window that keeps at most `capacity` entries, evicting the oldest.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct BoundedWindow<T> {
    #[serde(skip)]
    capacity: usize,
    entries: VecDeque<T>,
}

impl<T> BoundedWindow<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity + 1),
        }
    }

    /// Append an entry; returns the evicted entry when the bound was exceeded.
    pub fn push(&mut self, entry: T) -> Option<T> {
        self.entries.push_back(entry);
        if self.entries.len() > self.capacity {
            self.entries.pop_front()
        } else {
            None
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T: Clone> BoundedWindow<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.entries.iter().cloned().collect()
    }
}

impl<T> Extend<T> for BoundedWindow<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for entry in iter {
            self.push(entry);
        }
    }
}
