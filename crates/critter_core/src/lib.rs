//! # Critter core
//!
//! Shared vocabulary for the toy's behavioral controller: events and their
//! priority queue, the state and mood enums, the hunger drive, the
//! collaborator traits, and configuration.

pub mod body;
pub mod config;
pub mod drives;
pub mod event;
pub mod mock;
pub mod queue;
pub mod shutdown;
pub mod state;

pub use body::{Body, ClassifiedIntent, IntentClassifier, WakeWordDetector};
pub use config::CritterConfig;
pub use drives::{Appetite, HungerDrive, SharedHunger, MAX_HUNGER};
pub use event::{Event, EventKind, Payload, Priority};
pub use queue::{EventQueue, PopTimeout, QueueEntry, QueueFull};
pub use shutdown::{running_flag, Running, ShutdownSwitch};
pub use state::{Mood, Snapshot, State};
