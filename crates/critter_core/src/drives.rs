//! Hunger drive.
//!
//! `level` and `last_tick` always move together: the hunger watcher decays
//! them from outside the controller, so both live behind one lock
//! ([`SharedHunger`]).

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

pub const MAX_HUNGER: u8 = 100;

/// Hunger as seen by behavior selection. Starving takes precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appetite {
    Starving,
    Hungry,
    Satisfied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HungerDrive {
    level: u8,
    last_tick: Instant,
}

pub type SharedHunger = Arc<RwLock<HungerDrive>>;

impl HungerDrive {
    pub fn new(level: u8, now: Instant) -> Self {
        Self {
            level: level.min(MAX_HUNGER),
            last_tick: now,
        }
    }

    pub fn shared(level: u8, now: Instant) -> SharedHunger {
        Arc::new(RwLock::new(Self::new(level, now)))
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn last_tick(&self) -> Instant {
        self.last_tick
    }

    /// Raise hunger by `amount`, capped at 100. Returns the new level.
    pub fn feed(&mut self, amount: u8) -> u8 {
        self.level = self.level.saturating_add(amount).min(MAX_HUNGER);
        self.level
    }

    /// Decay by `amount` if more than `interval` has passed since the last
    /// decay. Returns the new level when a decay happened.
    pub fn tick(&mut self, now: Instant, interval: Duration, amount: u8) -> Option<u8> {
        if now.saturating_duration_since(self.last_tick) <= interval {
            return None;
        }
        self.level = self.level.saturating_sub(amount);
        self.last_tick = now;
        Some(self.level)
    }

    pub fn appetite(&self, starving_below: u8, hungry_below: u8) -> Appetite {
        if self.level < starving_below {
            Appetite::Starving
        } else if self.level < hungry_below {
            Appetite::Hungry
        } else {
            Appetite::Satisfied
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_clamps_at_max() {
        let mut h = HungerDrive::new(10, Instant::now());
        assert_eq!(h.feed(40), 50);
        assert_eq!(h.feed(40), 90);
        assert_eq!(h.feed(40), 100);
        assert_eq!(h.feed(250), 100);
    }

    #[test]
    fn test_new_clamps_initial_level() {
        assert_eq!(HungerDrive::new(180, Instant::now()).level(), 100);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_waits_for_interval() {
        let mut h = HungerDrive::new(100, Instant::now());
        let minute = Duration::from_secs(60);

        tokio::time::advance(Duration::from_secs(60)).await;
        // Strictly more than the interval is required
        assert_eq!(h.tick(Instant::now(), minute, 10), None);

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(h.tick(Instant::now(), minute, 10), Some(90));
        assert_eq!(h.last_tick(), Instant::now());

        // Tick was reset, so an immediate retry does nothing
        assert_eq!(h.tick(Instant::now(), minute, 10), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_floors_at_zero() {
        let mut h = HungerDrive::new(5, Instant::now());
        tokio::time::advance(Duration::from_secs(61)).await;
        assert_eq!(h.tick(Instant::now(), Duration::from_secs(60), 10), Some(0));
    }

    #[test]
    fn test_appetite_thresholds() {
        let now = Instant::now();
        assert_eq!(HungerDrive::new(19, now).appetite(20, 40), Appetite::Starving);
        assert_eq!(HungerDrive::new(20, now).appetite(20, 40), Appetite::Hungry);
        assert_eq!(HungerDrive::new(39, now).appetite(20, 40), Appetite::Hungry);
        assert_eq!(HungerDrive::new(40, now).appetite(20, 40), Appetite::Satisfied);
    }
}
