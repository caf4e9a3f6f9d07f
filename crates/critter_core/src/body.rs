//! Contracts for the toy's external collaborators.
//!
//! The controller never talks to audio hardware, motors, or speech engines
//! directly. It goes through these traits, so the same state machine runs on
//! the device, in the console simulator, and in tests.

use crate::event::Payload;
use async_trait::async_trait;
use std::time::Duration;

/// Speaker and motors.
#[async_trait]
pub trait Body: Send + Sync {
    /// Fire-and-forget playback. A missing asset is logged, never an error.
    async fn play(&self, sound: &str);

    /// Run an animation, resolving once it has finished.
    async fn animate(&self, name: &str, duration: Duration);
}

/// Wake-word engine, polled by the wake-word watcher.
#[async_trait]
pub trait WakeWordDetector: Send + Sync {
    async fn detected(&self) -> bool;

    fn name(&self) -> &'static str;
}

/// A pre-classified command: intent name plus slot map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedIntent {
    pub name: String,
    pub slots: Payload,
}

impl ClassifiedIntent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: Payload::new(),
        }
    }

    pub fn with_slot(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.slots.insert(key.into(), value.into());
        self
    }

    pub fn slot(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

/// Speech-to-intent service, invoked once per completed listening window.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(&self) -> anyhow::Result<ClassifiedIntent>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_slots() {
        let intent = ClassifiedIntent::new("COUNT").with_slot("number", "12");
        assert_eq!(intent.slot("number"), Some("12"));
        assert_eq!(intent.slot("missing"), None);
    }
}
