//! Ordered play/animate sequences.

use critter_core::Body;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Play(String),
    Animate { name: String, duration: Duration },
}

/// A sequence of actions run in order on one body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Performance {
    actions: Vec<Action>,
}

impl Performance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn play(mut self, sound: impl Into<String>) -> Self {
        self.actions.push(Action::Play(sound.into()));
        self
    }

    pub fn animate(mut self, name: impl Into<String>, duration: Duration) -> Self {
        self.actions.push(Action::Animate {
            name: name.into(),
            duration,
        });
        self
    }

    /// Play a sound and run the animation of the same name.
    pub fn act(self, name: &str, duration: Duration) -> Self {
        self.play(name).animate(name, duration)
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Sounds in play order.
    pub fn sounds(&self) -> Vec<&str> {
        self.actions
            .iter()
            .filter_map(|a| match a {
                Action::Play(s) => Some(s.as_str()),
                Action::Animate { .. } => None,
            })
            .collect()
    }

    /// Total animation time. Playback is fire-and-forget and adds nothing.
    pub fn duration(&self) -> Duration {
        self.actions
            .iter()
            .map(|a| match a {
                Action::Animate { duration, .. } => *duration,
                Action::Play(_) => Duration::ZERO,
            })
            .sum()
    }

    /// Run every action in order. Animations resolve after their duration,
    /// so call this from a task that is allowed to wait.
    pub async fn run(&self, body: &dyn Body) {
        for action in &self.actions {
            match action {
                Action::Play(sound) => body.play(sound).await,
                Action::Animate { name, duration } => body.animate(name, *duration).await,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use critter_core::mock::{BodyAction, RecordingBody};

    #[test]
    fn test_duration_sums_animations() {
        let p = Performance::new()
            .act("yawn", Duration::from_secs(5))
            .play("greeting_morning1")
            .animate("greeting_morning1", Duration::from_secs(2));
        assert_eq!(p.duration(), Duration::from_secs(7));
        assert_eq!(p.sounds(), vec!["yawn", "greeting_morning1"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_in_order() {
        let body = RecordingBody::new();
        let p = Performance::new()
            .act("purr", Duration::from_secs(3))
            .play("giggle");
        p.run(&body).await;
        assert_eq!(
            body.actions(),
            vec![
                BodyAction::Play("purr".into()),
                BodyAction::Animate {
                    name: "purr".into(),
                    duration: Duration::from_secs(3)
                },
                BodyAction::Play("giggle".into()),
            ]
        );
    }
}
