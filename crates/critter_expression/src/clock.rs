//! Talking clock and date speaker.
//!
//! Both build the clip sequence only; clips live in the `clock/` sub-folder
//! of the sound directory (`clock/its`, `clock/7`, `clock/oclock`, ...).

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use rand::Rng;

pub const CLOCK_DIR: &str = "clock";

const TIME_INTROS: u32 = 9;
const DATE_INTROS: u32 = 8;
const DATE_OUTROS: u32 = 8;

/// Two phrasings of the time; they differ only on the full hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockStyle {
    /// "its seven oclock" / "its seven twenty PM"
    A,
    /// "its seven oclock PM" / "its seven twenty PM"
    B,
}

pub fn clip(name: impl std::fmt::Display) -> String {
    format!("{}/{}", CLOCK_DIR, name)
}

pub fn time_phrase<R: Rng + ?Sized>(time: NaiveTime, rng: &mut R) -> Vec<String> {
    let intro = rng.gen_range(1..=TIME_INTROS);
    let style = if rng.gen_bool(0.5) {
        ClockStyle::A
    } else {
        ClockStyle::B
    };
    time_phrase_with(time, style, intro)
}

pub fn time_phrase_with(time: NaiveTime, style: ClockStyle, intro: u32) -> Vec<String> {
    let (is_pm, hour) = time.hour12();
    let minute = time.minute();
    let ampm = if is_pm { "PM" } else { "AM" };

    let mut clips = vec![
        clip(format!("intro{}", intro)),
        clip("its"),
        clip(hour),
    ];

    if minute == 0 {
        clips.push(clip("oclock"));
        if style == ClockStyle::B {
            clips.push(clip(ampm));
        }
    } else {
        clips.push(clip(minute));
        clips.push(clip(ampm));
    }
    clips
}

pub fn date_phrase<R: Rng + ?Sized>(date: NaiveDate, rng: &mut R) -> Vec<String> {
    let intro = rng.gen_range(1..=DATE_INTROS);
    let outro = rng.gen_range(1..=DATE_OUTROS);
    date_phrase_with(date, intro, outro)
}

pub fn date_phrase_with(date: NaiveDate, intro: u32, outro: u32) -> Vec<String> {
    let weekday = date.format("%A").to_string().to_lowercase();

    let mut clips = vec![
        clip(format!("dateintro{}", intro)),
        clip(weekday),
        clip(format!("date{}", date.day())),
        clip("of"),
        clip(format!("month{}", date.month())),
    ];
    clips.extend(year_clips(date.year()));
    clips.push(clip(format!("dateoutro{}", outro)));
    clips
}

/// 2025 is spoken "2 thousand 25".
fn year_clips(year: i32) -> Vec<String> {
    let year = year.max(0);
    vec![clip(year / 1000), clip("thousand"), clip(year % 1000)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_style_a_on_the_hour_omits_ampm() {
        let clips = time_phrase_with(t(19, 0), ClockStyle::A, 3);
        assert_eq!(
            clips,
            vec!["clock/intro3", "clock/its", "clock/7", "clock/oclock"]
        );
    }

    #[test]
    fn test_style_b_on_the_hour_keeps_ampm() {
        let clips = time_phrase_with(t(7, 0), ClockStyle::B, 1);
        assert_eq!(
            clips,
            vec!["clock/intro1", "clock/its", "clock/7", "clock/oclock", "clock/AM"]
        );
    }

    #[test]
    fn test_minutes_are_spoken_with_ampm_in_both_styles() {
        for style in [ClockStyle::A, ClockStyle::B] {
            let clips = time_phrase_with(t(0, 5), style, 2);
            assert_eq!(
                clips,
                vec!["clock/intro2", "clock/its", "clock/12", "clock/5", "clock/AM"]
            );
        }
    }

    #[test]
    fn test_random_intro_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let clips = time_phrase(t(15, 30), &mut rng);
            let n: u32 = clips[0].trim_start_matches("clock/intro").parse().unwrap();
            assert!((1..=TIME_INTROS).contains(&n));
            assert_eq!(clips.last().map(String::as_str), Some("clock/PM"));
        }
    }

    #[test]
    fn test_date_phrase() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 23).unwrap();
        let clips = date_phrase_with(date, 4, 6);
        assert_eq!(
            clips,
            vec![
                "clock/dateintro4",
                "clock/thursday",
                "clock/date23",
                "clock/of",
                "clock/month1",
                "clock/2",
                "clock/thousand",
                "clock/25",
                "clock/dateoutro6",
            ]
        );
    }

    #[test]
    fn test_round_year() {
        assert_eq!(
            year_clips(2000),
            vec!["clock/2", "clock/thousand", "clock/0"]
        );
    }
}
