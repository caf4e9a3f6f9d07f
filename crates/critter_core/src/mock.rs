//! Mock collaborators: deterministic stand-ins for tests and the simulator.

use crate::body::{Body, ClassifiedIntent, IntentClassifier, WakeWordDetector};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// One call made against a [`RecordingBody`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyAction {
    Play(String),
    Animate { name: String, duration: Duration },
}

/// Body that remembers every call instead of moving anything.
#[derive(Debug, Default)]
pub struct RecordingBody {
    actions: Mutex<Vec<BodyAction>>,
}

impl RecordingBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn actions(&self) -> Vec<BodyAction> {
        self.actions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Sounds played so far, in order.
    pub fn played(&self) -> Vec<String> {
        self.actions()
            .into_iter()
            .filter_map(|a| match a {
                BodyAction::Play(sound) => Some(sound),
                BodyAction::Animate { .. } => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.actions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn record(&self, action: BodyAction) {
        self.actions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(action);
    }
}

#[async_trait]
impl Body for RecordingBody {
    async fn play(&self, sound: &str) {
        self.record(BodyAction::Play(sound.to_string()));
    }

    async fn animate(&self, name: &str, duration: Duration) {
        self.record(BodyAction::Animate {
            name: name.to_string(),
            duration,
        });
        tokio::time::sleep(duration).await;
    }
}

/// Detector that replays a fixed script of poll results, then reports
/// nothing forever.
#[derive(Debug, Default)]
pub struct ScriptedWakeWord {
    script: Mutex<VecDeque<bool>>,
    polls: Mutex<usize>,
}

impl ScriptedWakeWord {
    pub fn new(script: impl IntoIterator<Item = bool>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            polls: Mutex::new(0),
        }
    }

    /// How many times `detected` has been called.
    pub fn polls(&self) -> usize {
        *self.polls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl WakeWordDetector for ScriptedWakeWord {
    async fn detected(&self) -> bool {
        *self.polls.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Classifier that always hears the same command.
#[derive(Debug, Clone)]
pub struct FixedClassifier {
    intent: ClassifiedIntent,
}

impl FixedClassifier {
    pub fn new(intent: ClassifiedIntent) -> Self {
        Self { intent }
    }

    /// The stand-in used until a real speech service is wired up.
    pub fn stand_in() -> Self {
        Self::new(ClassifiedIntent::new("SINGASONG").with_slot("song", "golden"))
    }
}

#[async_trait]
impl IntentClassifier for FixedClassifier {
    async fn classify(&self) -> anyhow::Result<ClassifiedIntent> {
        Ok(self.intent.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_recording_body_keeps_order() {
        let body = RecordingBody::new();
        body.play("yawn").await;
        body.animate("yawn", Duration::from_secs(1)).await;
        body.play("purr").await;
        assert_eq!(body.played(), vec!["yawn", "purr"]);
        assert_eq!(body.actions().len(), 3);
        body.clear();
        assert!(body.actions().is_empty());
    }

    #[tokio::test]
    async fn test_scripted_wake_word_runs_out() {
        let detector = ScriptedWakeWord::new([false, true]);
        assert!(!detector.detected().await);
        assert!(detector.detected().await);
        assert!(!detector.detected().await);
        assert_eq!(detector.polls(), 3);
    }

    #[tokio::test]
    async fn test_stand_in_classifier() {
        let intent = FixedClassifier::stand_in().classify().await.unwrap();
        assert_eq!(intent.name, "SINGASONG");
        assert_eq!(intent.slot("song"), Some("golden"));
    }
}
