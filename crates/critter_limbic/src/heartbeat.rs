//! Heartbeat configuration for the drive watchers
//!
//! Each watcher wakes on its own fixed interval and compares the latest
//! controller snapshot against these thresholds.

use critter_core::CritterConfig;
use std::time::Duration;

/// Intervals and thresholds shared by the watcher loops
#[derive(Debug, Clone)]
pub struct HeartbeatConfig {
    /// How often the random-behavior, idle-sleep and hunger watchers wake (default: 5s)
    pub interval: Duration,
    /// Idle time before a random behavior is requested
    pub idle_random_after: Duration,
    /// Idle time before the toy is sent to sleep
    pub idle_timeout: Duration,
    /// Minimum gap between two hunger decays
    pub hunger_tick: Duration,
    pub hunger_decay: u8,
    /// Wake-word poll interval when nothing was heard
    pub wake_word_poll: Duration,
    /// Pause after a detection so one utterance is not posted twice
    pub wake_word_debounce: Duration,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self::from_config(&CritterConfig::default())
    }
}

impl HeartbeatConfig {
    pub fn from_config(config: &CritterConfig) -> Self {
        let timing = &config.timing;
        Self {
            interval: timing.watcher_interval(),
            idle_random_after: timing.idle_random_after(),
            idle_timeout: timing.idle_timeout(),
            hunger_tick: timing.hunger_tick(),
            hunger_decay: config.drives.hunger_decay,
            wake_word_poll: timing.wake_word_poll(),
            wake_word_debounce: timing.wake_word_debounce(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_config_defaults() {
        let hb = HeartbeatConfig::default();
        assert_eq!(hb.interval, Duration::from_secs(5));
        assert_eq!(hb.idle_random_after, Duration::from_secs(5));
        assert_eq!(hb.idle_timeout, Duration::from_secs(30));
        assert_eq!(hb.hunger_tick, Duration::from_secs(60));
        assert_eq!(hb.hunger_decay, 10);
        assert_eq!(hb.wake_word_poll, Duration::from_millis(500));
        assert_eq!(hb.wake_word_debounce, Duration::from_secs(1));
    }
}
