//! # Critter Controller
//!
//! The state machine at the heart of the toy. A single consumer pops events
//! from the priority queue, drops them while a lock window is open, and
//! routes the rest to their handlers. Timed transitions (wake-up settling,
//! snoring into sleep, listening into a performance) run as deferred
//! continuations that report back to the consumer.

pub mod continuation;
mod controller;
mod performer;
mod state;

pub use continuation::{Continuation, Deferred};
pub use controller::{Collaborators, Controller};
pub use performer::Performer;
pub use state::ControllerState;
