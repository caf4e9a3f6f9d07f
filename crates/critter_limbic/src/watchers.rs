//! The background drive watchers.
//!
//! Each watcher is a producer: it reads the controller's published
//! [`Snapshot`] and posts events to the queue. Only the hunger watcher
//! mutates anything, and only the [`HungerDrive`](critter_core::HungerDrive)
//! pair under its lock.

use crate::heartbeat::HeartbeatConfig;
use critter_core::{EventKind, EventQueue, Running, SharedHunger, Snapshot, State, WakeWordDetector};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Everything the watcher loops share.
#[derive(Clone)]
pub struct Watchers {
    queue: Arc<EventQueue>,
    snapshot: watch::Receiver<Snapshot>,
    hunger: SharedHunger,
    running: Running,
    config: HeartbeatConfig,
}

impl Watchers {
    pub fn new(
        queue: Arc<EventQueue>,
        snapshot: watch::Receiver<Snapshot>,
        hunger: SharedHunger,
        running: Running,
        config: HeartbeatConfig,
    ) -> Self {
        Self {
            queue,
            snapshot,
            hunger,
            running,
            config,
        }
    }

    /// Spawn all four watchers.
    pub fn spawn_all(&self, detector: Arc<dyn WakeWordDetector>) -> Vec<JoinHandle<()>> {
        vec![
            self.spawn_random_behavior(),
            self.spawn_idle_sleep(),
            self.spawn_hunger(),
            self.spawn_wake_word(detector),
        ]
    }

    /// Posts `random` once the toy has been idle past the random threshold.
    pub fn spawn_random_behavior(&self) -> JoinHandle<()> {
        let threshold = self.config.idle_random_after;
        self.spawn_idle_trigger("random", threshold, EventKind::Random)
    }

    /// Posts `idle_timeout` once the toy has been idle past the sleep threshold.
    pub fn spawn_idle_sleep(&self) -> JoinHandle<()> {
        let threshold = self.config.idle_timeout;
        self.spawn_idle_trigger("idle-sleep", threshold, EventKind::IdleTimeout)
    }

    fn spawn_idle_trigger(
        &self,
        label: &'static str,
        threshold: std::time::Duration,
        kind: EventKind,
    ) -> JoinHandle<()> {
        let queue = Arc::clone(&self.queue);
        let snapshot = self.snapshot.clone();
        let mut running = self.running.clone();
        let interval = self.config.interval;

        tokio::spawn(async move {
            tracing::debug!("{} watcher started", label);
            while running.sleep(interval).await {
                let current = *snapshot.borrow();
                if current.is_idle() && current.idle_for(Instant::now()) > threshold {
                    queue.post_or_log(kind.event());
                }
            }
            tracing::debug!("{} watcher stopped", label);
        })
    }

    /// Decays hunger on the hunger tick, except while the toy is asleep.
    pub fn spawn_hunger(&self) -> JoinHandle<()> {
        let hunger = Arc::clone(&self.hunger);
        let snapshot = self.snapshot.clone();
        let mut running = self.running.clone();
        let interval = self.config.interval;
        let tick = self.config.hunger_tick;
        let decay = self.config.hunger_decay;

        tokio::spawn(async move {
            while running.sleep(interval).await {
                if snapshot.borrow().state == State::Sleeping {
                    continue;
                }
                let decayed = hunger.write().await.tick(Instant::now(), tick, decay);
                if let Some(level) = decayed {
                    tracing::info!("[HUNGER] level = {}", level);
                }
            }
            tracing::debug!("hunger watcher stopped");
        })
    }

    /// Polls the detector while the toy is idle and posts `listening` on a hit.
    pub fn spawn_wake_word(&self, detector: Arc<dyn WakeWordDetector>) -> JoinHandle<()> {
        let queue = Arc::clone(&self.queue);
        let snapshot = self.snapshot.clone();
        let mut running = self.running.clone();
        let poll = self.config.wake_word_poll;
        let debounce = self.config.wake_word_debounce;

        tokio::spawn(async move {
            tracing::debug!("wake-word watcher polling {}", detector.name());
            while running.is_running() {
                let idle = snapshot.borrow().is_idle();
                let pause = if idle && detector.detected().await {
                    tracing::info!("[WAKEWORD] detected");
                    queue.post_or_log(EventKind::Listening.event());
                    debounce
                } else {
                    poll
                };
                if !running.sleep(pause).await {
                    break;
                }
            }
            tracing::debug!("wake-word watcher stopped");
        })
    }
}
