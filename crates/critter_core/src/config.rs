use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CritterConfig {
    pub timing: TimingConfig,
    pub drives: DriveConfig,
    pub audio: AudioConfig,
    pub queue: QueueConfig,
    pub wake_word: WakeWordConfig,
}

impl CritterConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: CritterConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        config.timing.validate()?;
        Ok(config)
    }

    /// Try to load from path; if file doesn't exist, return defaults with env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({:#}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    /// Apply environment variable overrides on top of file-based config.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("CRITTER_SOUND_DIR") {
            self.audio.sound_dir = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("CRITTER_IDLE_TIMEOUT_SECS") {
            match v.parse::<f64>() {
                Ok(n) if n.is_finite() && n <= MAX_TIMING_SECS => {
                    self.timing.idle_timeout_secs = n;
                }
                _ => tracing::warn!("Ignoring CRITTER_IDLE_TIMEOUT_SECS={}", v),
            }
        }
        if let Ok(v) = std::env::var("CRITTER_WAKE_WORD_PROBABILITY") {
            if let Ok(p) = v.parse::<f64>() {
                self.wake_word.probability = p.clamp(0.0, 1.0);
            }
        }
        if let Ok(v) = std::env::var("CRITTER_QUEUE_CAPACITY") {
            if let Ok(n) = v.parse() {
                self.queue.capacity = Some(n);
            }
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

/// Lock windows, idle thresholds and loop intervals, all in seconds unless
/// the field says otherwise.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub wakeup_lock_secs: f64,
    pub snore_lock_secs: f64,
    pub listening_lock_secs: f64,
    /// Length of the greeting animation after the yawn
    pub normal_lock_secs: f64,
    /// Idle time before a random behavior fires
    pub idle_random_after_secs: f64,
    /// Idle time before the toy dozes off
    pub idle_timeout_secs: f64,
    pub watcher_interval_secs: f64,
    pub hunger_tick_secs: f64,
    pub wake_word_poll_ms: u64,
    pub wake_word_debounce_ms: u64,
    /// Consumer pop timeout; bounds shutdown latency
    pub pop_timeout_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            wakeup_lock_secs: 5.0,
            snore_lock_secs: 5.0,
            listening_lock_secs: 5.0,
            normal_lock_secs: 5.0,
            idle_random_after_secs: 5.0,
            idle_timeout_secs: 30.0,
            watcher_interval_secs: 5.0,
            hunger_tick_secs: 60.0,
            wake_word_poll_ms: 500,
            wake_word_debounce_ms: 1000,
            pop_timeout_ms: 500,
        }
    }
}

/// Upper bound for every timing value: one day.
pub const MAX_TIMING_SECS: f64 = 86_400.0;

fn secs(v: f64) -> Duration {
    Duration::try_from_secs_f64(v.clamp(0.0, MAX_TIMING_SECS)).unwrap_or(Duration::ZERO)
}

impl TimingConfig {
    /// Reject values that are not finite or exceed [`MAX_TIMING_SECS`].
    /// Negative seconds are allowed and read as zero.
    pub fn validate(&self) -> Result<()> {
        let seconds = [
            ("wakeup_lock_secs", self.wakeup_lock_secs),
            ("snore_lock_secs", self.snore_lock_secs),
            ("listening_lock_secs", self.listening_lock_secs),
            ("normal_lock_secs", self.normal_lock_secs),
            ("idle_random_after_secs", self.idle_random_after_secs),
            ("idle_timeout_secs", self.idle_timeout_secs),
            ("watcher_interval_secs", self.watcher_interval_secs),
            ("hunger_tick_secs", self.hunger_tick_secs),
        ];
        for (name, value) in seconds {
            if !value.is_finite() || value > MAX_TIMING_SECS {
                bail!("timing.{} = {} is out of range (max {}s)", name, value, MAX_TIMING_SECS);
            }
        }

        let max_ms = (MAX_TIMING_SECS as u64) * 1_000;
        let millis = [
            ("wake_word_poll_ms", self.wake_word_poll_ms),
            ("wake_word_debounce_ms", self.wake_word_debounce_ms),
            ("pop_timeout_ms", self.pop_timeout_ms),
        ];
        for (name, value) in millis {
            if value > max_ms {
                bail!("timing.{} = {} is out of range (max {}ms)", name, value, max_ms);
            }
        }
        Ok(())
    }

    pub fn wakeup_lock(&self) -> Duration {
        secs(self.wakeup_lock_secs)
    }
    pub fn snore_lock(&self) -> Duration {
        secs(self.snore_lock_secs)
    }
    pub fn listening_lock(&self) -> Duration {
        secs(self.listening_lock_secs)
    }
    pub fn normal_lock(&self) -> Duration {
        secs(self.normal_lock_secs)
    }
    pub fn idle_random_after(&self) -> Duration {
        secs(self.idle_random_after_secs)
    }
    pub fn idle_timeout(&self) -> Duration {
        secs(self.idle_timeout_secs)
    }
    pub fn watcher_interval(&self) -> Duration {
        secs(self.watcher_interval_secs)
    }
    pub fn hunger_tick(&self) -> Duration {
        secs(self.hunger_tick_secs)
    }
    pub fn wake_word_poll(&self) -> Duration {
        Duration::from_millis(self.wake_word_poll_ms)
    }
    pub fn wake_word_debounce(&self) -> Duration {
        Duration::from_millis(self.wake_word_debounce_ms)
    }
    pub fn pop_timeout(&self) -> Duration {
        Duration::from_millis(self.pop_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DriveConfig {
    pub initial_hunger: u8,
    pub hunger_decay: u8,
    pub feed_amount: u8,
    pub starving_below: u8,
    pub hungry_below: u8,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            initial_hunger: 100,
            hunger_decay: 10,
            feed_amount: 40,
            starving_below: 20,
            hungry_below: 40,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Folder holding `<name>.wav` assets; pools are discovered by prefix
    pub sound_dir: PathBuf,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sound_dir: PathBuf::from("sounds"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// `None` keeps the queue unbounded
    pub capacity: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WakeWordConfig {
    /// Chance per poll that the simulated detector fires (0 disables it)
    pub probability: f64,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = CritterConfig::default();
        assert_eq!(cfg.timing.wakeup_lock(), Duration::from_secs(5));
        assert_eq!(cfg.timing.idle_timeout(), Duration::from_secs(30));
        assert_eq!(cfg.timing.pop_timeout(), Duration::from_millis(500));
        assert_eq!(cfg.drives.initial_hunger, 100);
        assert_eq!(cfg.drives.feed_amount, 40);
        assert_eq!(cfg.audio.sound_dir, PathBuf::from("sounds"));
        assert!(cfg.queue.capacity.is_none());
        assert_eq!(cfg.wake_word.probability, 0.0);
    }

    #[test]
    fn test_parse_minimal_toml() {
        let toml_str = r#"
[timing]
idle_timeout_secs = 12.5
"#;
        let cfg: CritterConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.timing.idle_timeout(), Duration::from_secs_f64(12.5));
        // Defaults for unspecified fields
        assert_eq!(cfg.timing.snore_lock(), Duration::from_secs(5));
        assert_eq!(cfg.drives.hunger_decay, 10);
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
[timing]
wakeup_lock_secs = 2
snore_lock_secs = 3
listening_lock_secs = 4
normal_lock_secs = 1
idle_random_after_secs = 8
idle_timeout_secs = 45
watcher_interval_secs = 1
hunger_tick_secs = 30
wake_word_poll_ms = 250
wake_word_debounce_ms = 2000
pop_timeout_ms = 100

[drives]
initial_hunger = 70
hunger_decay = 5
feed_amount = 25
starving_below = 10
hungry_below = 30

[audio]
sound_dir = "/opt/critter/sounds"

[queue]
capacity = 64

[wake_word]
probability = 0.05
"#;
        let cfg: CritterConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.timing.wakeup_lock(), Duration::from_secs(2));
        assert_eq!(cfg.timing.hunger_tick(), Duration::from_secs(30));
        assert_eq!(cfg.timing.wake_word_debounce(), Duration::from_secs(2));
        assert_eq!(cfg.drives.initial_hunger, 70);
        assert_eq!(cfg.drives.hungry_below, 30);
        assert_eq!(cfg.audio.sound_dir, PathBuf::from("/opt/critter/sounds"));
        assert_eq!(cfg.queue.capacity, Some(64));
        assert!((cfg.wake_word.probability - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_negative_durations_clamp_to_zero() {
        let cfg: CritterConfig = toml::from_str("[timing]\nsnore_lock_secs = -3.0\n").unwrap();
        assert_eq!(cfg.timing.snore_lock(), Duration::ZERO);
    }

    #[test]
    fn test_infinite_timing_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("critter.toml");
        std::fs::write(&path, "[timing]\nidle_timeout_secs = inf\n").unwrap();

        let err = CritterConfig::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("idle_timeout_secs"));
    }

    #[test]
    fn test_huge_timing_is_rejected() {
        let cfg: CritterConfig = toml::from_str("[timing]\nwakeup_lock_secs = 1e19\n").unwrap();
        assert!(cfg.timing.validate().is_err());

        let cfg: CritterConfig = toml::from_str("[timing]\npop_timeout_ms = 9999999999999\n").unwrap();
        assert!(cfg.timing.validate().is_err());

        let cfg: CritterConfig = toml::from_str("[timing]\nsnore_lock_secs = nan\n").unwrap();
        assert!(cfg.timing.validate().is_err());
    }

    #[test]
    fn test_out_of_range_accessors_saturate() {
        let mut timing = TimingConfig::default();
        timing.wakeup_lock_secs = f64::INFINITY;
        timing.snore_lock_secs = f64::NAN;
        assert_eq!(timing.wakeup_lock(), Duration::from_secs(86_400));
        assert_eq!(timing.snore_lock(), Duration::ZERO);
        assert!(TimingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_env_overrides_and_defaults() {
        // Part 1: env overrides
        std::env::set_var("CRITTER_SOUND_DIR", "/tmp/critter-sounds");
        std::env::set_var("CRITTER_QUEUE_CAPACITY", "8");

        let mut cfg = CritterConfig::default();
        cfg.apply_env_overrides();

        assert_eq!(cfg.audio.sound_dir, PathBuf::from("/tmp/critter-sounds"));
        assert_eq!(cfg.queue.capacity, Some(8));

        // Clean up env vars before testing defaults
        std::env::remove_var("CRITTER_SOUND_DIR");
        std::env::remove_var("CRITTER_QUEUE_CAPACITY");

        // Part 2: nonexistent path returns defaults (no env interference)
        let cfg = CritterConfig::load_or_default("/nonexistent/critter.toml");
        assert_eq!(cfg.audio.sound_dir, PathBuf::from("sounds"));
        assert!(cfg.queue.capacity.is_none());
    }
}
