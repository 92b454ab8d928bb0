use std::collections::VecDeque;

use crate::model::prediction::PredictionResult;

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Most-recent-first log of predictions, trimmed to `capacity` on every push.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<PredictionResult>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl History {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn push(&mut self, prediction: PredictionResult) {
        self.entries.push_front(prediction);
        self.entries.truncate(self.capacity);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<&PredictionResult> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PredictionResult> {
        self.entries.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/history.rs"]
mod tests;
