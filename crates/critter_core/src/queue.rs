//! Thread-safe priority event queue.
//!
//! Entries are ordered by `(priority, sequence)`: lower priority value first,
//! and within one tier strictly in post order. Many producers may `post`
//! concurrently; exactly one consumer calls `pop`.

use crate::event::{Event, Priority};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Notify;
use tokio::time::Instant;

/// Returned by [`EventQueue::post`] when a bounded queue is full.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("event queue full ({capacity} pending), dropped '{name}'")]
pub struct QueueFull {
    pub capacity: usize,
    pub name: String,
}

/// Returned by [`EventQueue::pop`] when nothing arrived in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no event within {0:?}")]
pub struct PopTimeout(pub Duration);

/// A queued event with its ordering key.
#[derive(Debug, Clone)]
pub struct QueueEntry {
    pub priority: Priority,
    pub sequence: u64,
    pub event: Event,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.sequence == other.sequence
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then(self.sequence.cmp(&other.sequence))
    }
}

#[derive(Default)]
struct Inner {
    heap: BinaryHeap<Reverse<QueueEntry>>,
    next_sequence: u64,
}

/// Min-priority queue shared between producers and the controller.
pub struct EventQueue {
    inner: Mutex<Inner>,
    available: Notify,
    capacity: Option<usize>,
}

impl EventQueue {
    /// Unbounded queue.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            available: Notify::new(),
            capacity: None,
        }
    }

    /// Queue that rejects posts once `capacity` entries are pending.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::new()
        }
    }

    // A panicking producer must not take the queue down with it.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert an event and return the sequence number it was given.
    ///
    /// Never blocks. Fails only for a bounded queue at capacity; callers treat
    /// that as a dropped event.
    pub fn post(&self, event: Event) -> Result<u64, QueueFull> {
        let sequence = {
            let mut inner = self.lock();
            if let Some(capacity) = self.capacity {
                if inner.heap.len() >= capacity {
                    return Err(QueueFull {
                        capacity,
                        name: event.name().to_string(),
                    });
                }
            }
            let sequence = inner.next_sequence;
            inner.next_sequence += 1;
            inner.heap.push(Reverse(QueueEntry {
                priority: event.priority(),
                sequence,
                event,
            }));
            sequence
        };
        self.available.notify_one();
        Ok(sequence)
    }

    /// Post and log a rejection instead of returning it.
    pub fn post_or_log(&self, event: Event) {
        if let Err(e) = self.post(event) {
            tracing::warn!("[QUEUE] {}", e);
        }
    }

    /// Remove the lowest `(priority, sequence)` entry without waiting.
    pub fn try_pop(&self) -> Option<QueueEntry> {
        self.lock().heap.pop().map(|Reverse(entry)| entry)
    }

    /// Wait up to `timeout` for an entry.
    pub async fn pop(&self, timeout: Duration) -> Result<QueueEntry, PopTimeout> {
        // `None` when the timeout runs past the clock: wait without one.
        let deadline = Instant::now().checked_add(timeout);
        loop {
            if let Some(entry) = self.try_pop() {
                return Ok(entry);
            }
            let Some(deadline) = deadline else {
                self.available.notified().await;
                continue;
            };
            if tokio::time::timeout_at(deadline, self.available.notified())
                .await
                .is_err()
            {
                return self.try_pop().ok_or(PopTimeout(timeout));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.lock().heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}
