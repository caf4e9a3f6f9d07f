//! How the toy expresses itself: which sounds it picks, what it says, and
//! how each voice command turns into a performance.

mod body;
pub mod clock;
mod greeting;
mod idle;
pub mod intents;
mod performance;
pub mod sounds;

pub use body::{LoggingBody, RandomWakeWord};
pub use greeting::{greeting, DayPeriod};
pub use idle::{choose_idle_behavior, IdleBehavior};
pub use intents::{AfterPerformance, Intent, IntentContext, IntentDispatcher, IntentResponse};
pub use performance::{Action, Performance};
pub use sounds::SoundLibrary;
