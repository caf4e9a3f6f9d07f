//! Console stand-ins for the speaker, motors and wake-word engine.

use async_trait::async_trait;
use critter_core::{Body, WakeWordDetector};
use rand::Rng;
use std::path::PathBuf;
use std::time::Duration;

/// Body that logs each action. With a sound folder configured, a sound
/// whose `.wav` is missing is reported and skipped.
#[derive(Debug, Clone, Default)]
pub struct LoggingBody {
    sound_dir: Option<PathBuf>,
}

impl LoggingBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sound_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            sound_dir: Some(dir.into()),
        }
    }

    fn asset_path(&self, sound: &str) -> Option<PathBuf> {
        self.sound_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.wav", sound)))
    }
}

#[async_trait]
impl Body for LoggingBody {
    async fn play(&self, sound: &str) {
        if let Some(path) = self.asset_path(sound) {
            if !path.exists() {
                tracing::warn!("Missing sound: {}", path.display());
                return;
            }
        }
        tracing::info!("[PLAY] {}", sound);
    }

    async fn animate(&self, name: &str, duration: Duration) {
        tracing::info!("[ANIM] {} ({:.1}s)", name, duration.as_secs_f64());
        tokio::time::sleep(duration).await;
    }
}

/// Simulated wake-word engine firing with a fixed probability per poll.
#[derive(Debug, Clone)]
pub struct RandomWakeWord {
    probability: f64,
}

impl RandomWakeWord {
    pub fn new(probability: f64) -> Self {
        Self {
            probability: probability.clamp(0.0, 1.0),
        }
    }
}

#[async_trait]
impl WakeWordDetector for RandomWakeWord {
    async fn detected(&self) -> bool {
        self.probability > 0.0 && rand::thread_rng().gen_bool(self.probability)
    }

    fn name(&self) -> &'static str {
        "random"
    }
}
