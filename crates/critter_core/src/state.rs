//! Behavioral states, mood, and the read-only snapshot watchers observe.

use std::fmt;
use tokio::time::Instant;

/// Exactly one of these is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    /// Initial and transient: the controller posts `start` immediately
    Start,
    WakeUp,
    Idle,
    Sleeping,
    Snoring,
    Listening,
    /// Speaking or performing an intent
    Busy,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            State::Start => "START",
            State::WakeUp => "WAKEUP",
            State::Idle => "IDLE",
            State::Sleeping => "SLEEPING",
            State::Snoring => "SNORING",
            State::Listening => "LISTENING",
            State::Busy => "BUSY",
        };
        f.write_str(label)
    }
}

/// Discrete affective state set by touch-class events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mood {
    #[default]
    Happy,
    Sad,
    Angry,
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Mood::Happy => "HAPPY",
            Mood::Sad => "SAD",
            Mood::Angry => "ANGRY",
        };
        f.write_str(label)
    }
}

/// What the controller publishes after every mutation.
///
/// Watchers only ever see this copy; they never hold a reference into the
/// controller's own state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub state: State,
    pub last_activity: Instant,
}

impl Snapshot {
    pub fn new(state: State, last_activity: Instant) -> Self {
        Self {
            state,
            last_activity,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == State::Idle
    }

    /// Time since the last stamped activity, measured against `now`.
    pub fn idle_for(&self, now: Instant) -> std::time::Duration {
        now.saturating_duration_since(self.last_activity)
    }
}
