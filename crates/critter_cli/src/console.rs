//! Line console: one token per line, each standing in for a sensor.

use critter_core::{Event, EventKind};

pub const USAGE: &str = "Commands: wake, head, belly, feed, tilt, shake, dance, wakeword, exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    Wake,
    Head,
    Belly,
    Feed,
    Tilt,
    Shake,
    Dance,
    WakeWord,
    Exit,
}

impl ConsoleCommand {
    /// Parse one input line. Blank lines and unknown tokens give `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let cmd = match line.trim().to_ascii_lowercase().as_str() {
            "wake" => ConsoleCommand::Wake,
            "head" => ConsoleCommand::Head,
            "belly" => ConsoleCommand::Belly,
            "feed" => ConsoleCommand::Feed,
            "tilt" => ConsoleCommand::Tilt,
            "shake" => ConsoleCommand::Shake,
            "dance" => ConsoleCommand::Dance,
            "wakeword" => ConsoleCommand::WakeWord,
            "exit" | "quit" => ConsoleCommand::Exit,
            _ => return None,
        };
        Some(cmd)
    }

    /// The event this command synthesizes; `None` for `exit`.
    pub fn to_event(self) -> Option<Event> {
        let kind = match self {
            ConsoleCommand::Wake => EventKind::Wake,
            ConsoleCommand::Head => EventKind::TouchHead,
            ConsoleCommand::Belly => EventKind::TouchBelly,
            ConsoleCommand::Feed => EventKind::Feed,
            ConsoleCommand::Tilt => EventKind::Tilt,
            ConsoleCommand::Shake => EventKind::Shake,
            ConsoleCommand::Dance => EventKind::Dance,
            ConsoleCommand::WakeWord => EventKind::Listening,
            ConsoleCommand::Exit => return None,
        };
        Some(kind.event())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use critter_core::Priority;

    #[test]
    fn test_parse_tokens() {
        assert_eq!(ConsoleCommand::parse("head"), Some(ConsoleCommand::Head));
        assert_eq!(ConsoleCommand::parse("  Feed \n"), Some(ConsoleCommand::Feed));
        assert_eq!(ConsoleCommand::parse("quit"), Some(ConsoleCommand::Exit));
        assert_eq!(ConsoleCommand::parse(""), None);
        assert_eq!(ConsoleCommand::parse("jump"), None);
    }

    #[test]
    fn test_events_carry_their_tier() {
        let cases = [
            (ConsoleCommand::Wake, "wake", Priority::Generic),
            (ConsoleCommand::Head, "touch_head", Priority::Touch),
            (ConsoleCommand::Belly, "touch_belly", Priority::Touch),
            (ConsoleCommand::Feed, "feed", Priority::Feed),
            (ConsoleCommand::Tilt, "tilt", Priority::Touch),
            (ConsoleCommand::Shake, "shake", Priority::Touch),
            (ConsoleCommand::Dance, "dance", Priority::Touch),
            (ConsoleCommand::WakeWord, "listening", Priority::WakeWord),
        ];
        for (cmd, name, priority) in cases {
            let event = cmd.to_event().unwrap();
            assert_eq!(event.name(), name);
            assert_eq!(event.priority(), priority);
        }
        assert!(ConsoleCommand::Exit.to_event().is_none());
    }
}
