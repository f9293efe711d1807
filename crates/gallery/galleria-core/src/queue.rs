//! Bounded FIFO of deferred events.
//!
//! Events offered while the queue is full are discarded; the oldest pending
//! events are never evicted.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Result of [`EventQueue::enqueue`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Enqueue {
    Queued { pending: usize },
    Dropped,
}

#[derive(Debug, Clone)]
pub struct EventQueue<E> {
    items: VecDeque<E>,
    capacity: usize,
    dropped: u64,
}

impl<E> EventQueue<E> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    /// Append `event` if there is room, otherwise drop it.
    pub fn enqueue(&mut self, event: E) -> Enqueue {
        if self.items.len() >= self.capacity {
            self.dropped = self.dropped.wrapping_add(1);
            return Enqueue::Dropped;
        }
        self.items.push_back(event);
        Enqueue::Queued {
            pending: self.items.len(),
        }
    }

    /// Remove the head entry, if any.
    #[inline]
    pub fn take_next(&mut self) -> Option<E> {
        self.items.pop_front()
    }

    /// Remove the head entry and hand it to `handler`. Returns whether an
    /// entry was run.
    pub fn run_next<F: FnOnce(E)>(&mut self, handler: F) -> bool {
        match self.items.pop_front() {
            Some(event) => {
                handler(event);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of events discarded because the queue was full.
    #[inline]
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.items.iter()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
