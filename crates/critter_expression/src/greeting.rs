//! Time-of-day greetings.

use crate::sounds::{
    SoundLibrary, GREETING_AFTERNOON, GREETING_EVENING, GREETING_MORNING, GREETING_NIGHT,
};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPeriod {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl DayPeriod {
    /// Morning 5–12h, afternoon 12–17h, evening 17–21h, night otherwise.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => DayPeriod::Morning,
            12..=16 => DayPeriod::Afternoon,
            17..=20 => DayPeriod::Evening,
            _ => DayPeriod::Night,
        }
    }

    pub fn pool(self) -> &'static str {
        match self {
            DayPeriod::Morning => GREETING_MORNING,
            DayPeriod::Afternoon => GREETING_AFTERNOON,
            DayPeriod::Evening => GREETING_EVENING,
            DayPeriod::Night => GREETING_NIGHT,
        }
    }
}

/// Random greeting for the given local hour.
pub fn greeting<R: Rng + ?Sized>(library: &SoundLibrary, hour: u32, rng: &mut R) -> String {
    library.pick(DayPeriod::from_hour(hour).pool(), rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_period_boundaries() {
        assert_eq!(DayPeriod::from_hour(4), DayPeriod::Night);
        assert_eq!(DayPeriod::from_hour(5), DayPeriod::Morning);
        assert_eq!(DayPeriod::from_hour(11), DayPeriod::Morning);
        assert_eq!(DayPeriod::from_hour(12), DayPeriod::Afternoon);
        assert_eq!(DayPeriod::from_hour(17), DayPeriod::Evening);
        assert_eq!(DayPeriod::from_hour(20), DayPeriod::Evening);
        assert_eq!(DayPeriod::from_hour(21), DayPeriod::Night);
        assert_eq!(DayPeriod::from_hour(0), DayPeriod::Night);
    }

    #[test]
    fn test_greeting_picks_from_period_pool() {
        let lib = SoundLibrary::from_ids([
            "greeting_morning1",
            "greeting_morning2",
            "greeting_night1",
        ]);
        let mut rng = StdRng::seed_from_u64(11);
        assert!(greeting(&lib, 8, &mut rng).starts_with("greeting_morning"));
        assert_eq!(greeting(&lib, 23, &mut rng), "greeting_night1");
        // No afternoon assets: falls back to the pool name
        assert_eq!(greeting(&lib, 14, &mut rng), "greeting_afternoon");
    }
}
