//! The controller's private state.
//!
//! Only the consumer loop holds a `&mut ControllerState`; everyone else sees
//! the [`Snapshot`] it publishes.

use critter_core::{Mood, Snapshot, State};
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct ControllerState {
    state: State,
    locked_until: Option<Instant>,
    mood: Mood,
    last_activity: Instant,
    /// Bumped on every transition; continuations carry the epoch they were
    /// scheduled under and are discarded once it moves on.
    epoch: u64,
}

impl ControllerState {
    pub fn new(now: Instant) -> Self {
        Self {
            state: State::Start,
            locked_until: None,
            mood: Mood::default(),
            last_activity: now,
            epoch: 0,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn last_activity(&self) -> Instant {
        self.last_activity
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn locked_until(&self) -> Option<Instant> {
        self.locked_until
    }

    pub fn is_locked(&self, now: Instant) -> bool {
        matches!(self.locked_until, Some(until) if now < until)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.state, self.last_activity)
    }

    /// Move to `next`, returning the new epoch.
    pub(crate) fn enter(&mut self, next: State) -> u64 {
        tracing::info!("[FSM] {} → {}", self.state, next);
        self.state = next;
        self.epoch += 1;
        self.epoch
    }

    pub(crate) fn lock_for(&mut self, now: Instant, duration: Duration) {
        match now.checked_add(duration) {
            Some(until) => {
                self.locked_until = Some(until);
                tracing::debug!("[LOCK] locked for {:?}", duration);
            }
            None => tracing::warn!("[LOCK] window of {:?} overflows the clock, not locking", duration),
        }
    }

    pub(crate) fn stamp(&mut self, now: Instant) {
        self.last_activity = now;
    }

    pub(crate) fn set_mood(&mut self, mood: Mood) {
        if mood != self.mood {
            tracing::info!("[MOOD] {} → {}", self.mood, mood);
        }
        self.mood = mood;
    }
}
