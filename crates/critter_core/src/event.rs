//! Events posted into the controller queue.
//!
//! An event is an immutable, prioritized, named message with an optional
//! slot map. Producers (watchers, sensors, the console) build events and
//! hand them to the [`EventQueue`](crate::EventQueue); only the controller
//! consumes them.

use std::collections::BTreeMap;
use std::fmt;

/// Priority tier of an event. Lower numeric value is served first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    /// Wake word heard: pre-empts everything else waiting in the queue
    WakeWord = 0,
    Feed = 1,
    Touch = 2,
    Generic = 3,
}

impl Priority {
    pub fn value(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::WakeWord => "WAKEWORD",
            Priority::Feed => "FEED",
            Priority::Touch => "TOUCH",
            Priority::Generic => "GENERIC",
        };
        f.write_str(label)
    }
}

/// Slot map carried by an event or a classified intent.
pub type Payload = BTreeMap<String, String>;

/// Immutable event record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    priority: Priority,
    name: String,
    payload: Payload,
}

impl Event {
    pub fn new(priority: Priority, name: impl Into<String>) -> Self {
        Self {
            priority,
            name: name.into(),
            payload: Payload::new(),
        }
    }

    pub fn with_payload(priority: Priority, name: impl Into<String>, payload: Payload) -> Self {
        Self {
            priority,
            name: name.into(),
            payload,
        }
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }
}

/// Every event name the controller knows how to handle.
///
/// Event names arrive as strings (console tokens, sensors); they are resolved
/// to this enum once at dispatch time so handler selection is a `match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Start,
    IdleTimeout,
    Random,
    Listening,
    Wake,
    TouchHead,
    TouchBelly,
    Tilt,
    Shake,
    Feed,
    Dance,
}

impl EventKind {
    pub const ALL: [EventKind; 11] = [
        EventKind::Start,
        EventKind::IdleTimeout,
        EventKind::Random,
        EventKind::Listening,
        EventKind::Wake,
        EventKind::TouchHead,
        EventKind::TouchBelly,
        EventKind::Tilt,
        EventKind::Shake,
        EventKind::Feed,
        EventKind::Dance,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            EventKind::Start => "start",
            EventKind::IdleTimeout => "idle_timeout",
            EventKind::Random => "random",
            EventKind::Listening => "listening",
            EventKind::Wake => "wake",
            EventKind::TouchHead => "touch_head",
            EventKind::TouchBelly => "touch_belly",
            EventKind::Tilt => "tilt",
            EventKind::Shake => "shake",
            EventKind::Feed => "feed",
            EventKind::Dance => "dance",
        }
    }

    /// The tier this kind is posted at by the built-in producers.
    pub fn default_priority(self) -> Priority {
        match self {
            EventKind::Listening => Priority::WakeWord,
            EventKind::Feed => Priority::Feed,
            EventKind::TouchHead
            | EventKind::TouchBelly
            | EventKind::Tilt
            | EventKind::Shake
            | EventKind::Dance => Priority::Touch,
            EventKind::Start | EventKind::IdleTimeout | EventKind::Random | EventKind::Wake => {
                Priority::Generic
            }
        }
    }

    /// Build an event of this kind at its default tier.
    pub fn event(self) -> Event {
        Event::new(self.default_priority(), self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        assert!(Priority::WakeWord < Priority::Feed);
        assert!(Priority::Feed < Priority::Touch);
        assert!(Priority::Touch < Priority::Generic);
        assert_eq!(Priority::Generic.value(), 3);
    }

    #[test]
    fn test_event_kind_names_resolve() {
        for kind in EventKind::ALL {
            assert_eq!(EventKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(EventKind::from_name("fly"), None);
    }

    #[test]
    fn test_default_tiers() {
        assert_eq!(EventKind::Listening.event().priority(), Priority::WakeWord);
        assert_eq!(EventKind::Feed.event().priority(), Priority::Feed);
        assert_eq!(EventKind::Dance.event().priority(), Priority::Touch);
        assert_eq!(EventKind::Wake.event().priority(), Priority::Generic);
    }

    #[test]
    fn test_payload_is_kept() {
        let mut payload = Payload::new();
        payload.insert("song".into(), "golden".into());
        let ev = Event::with_payload(Priority::Generic, "random", payload);
        assert_eq!(ev.payload().get("song").map(String::as_str), Some("golden"));
        assert_eq!(ev.name(), "random");
    }
}
