//! Common interface over double-ended queues

use crate::LinkedDeque;
use std::collections::VecDeque;

/// Operations shared by every deque in the crate.
///
/// Removal and lookup report a missing element as `None` rather than an
/// error: an empty deque or an out-of-range index is an ordinary outcome.
pub trait Deque<T> {
    /// Inserts a value at the front
    fn add_first(&mut self, value: T);

    /// Inserts a value at the back
    fn add_last(&mut self, value: T);

    /// Removes and returns the front value
    fn remove_first(&mut self) -> Option<T>;

    /// Removes and returns the back value
    fn remove_last(&mut self) -> Option<T>;

    /// Returns the element at a zero-based index
    fn get(&self, index: usize) -> Option<&T>;

    /// Number of elements
    fn size(&self) -> usize;

    /// Returns true if there are no elements
    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

impl<T> Deque<T> for LinkedDeque<T> {
    fn add_first(&mut self, value: T) {
        Self::add_first(self, value);
    }

    fn add_last(&mut self, value: T) {
        Self::add_last(self, value);
    }

    fn remove_first(&mut self) -> Option<T> {
        Self::remove_first(self)
    }

    fn remove_last(&mut self) -> Option<T> {
        Self::remove_last(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        Self::get(self, index)
    }

    fn size(&self) -> usize {
        self.len()
    }
}

// The array-backed counterpart
impl<T> Deque<T> for VecDeque<T> {
    fn add_first(&mut self, value: T) {
        self.push_front(value);
    }

    fn add_last(&mut self, value: T) {
        self.push_back(value);
    }

    fn remove_first(&mut self) -> Option<T> {
        self.pop_front()
    }

    fn remove_last(&mut self) -> Option<T> {
        self.pop_back()
    }

    fn get(&self, index: usize) -> Option<&T> {
        Self::get(self, index)
    }

    fn size(&self) -> usize {
        self.len()
    }
}
