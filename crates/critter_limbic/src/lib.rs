//! # Critter Limbic System
//!
//! The toy's background drives. Four watchers run beside the controller:
//!
//! - **Random behavior**: nudges an idle toy into doing something
//! - **Idle sleep**: sends a long-idle toy to sleep
//! - **Hunger**: decays the hunger drive while the toy is awake
//! - **Wake word**: polls the detector while the toy is idle
//!
//! Watchers are producers only. They read the controller's published
//! snapshot and post events; the controller decides what happens.

mod heartbeat;
mod watchers;

pub use heartbeat::HeartbeatConfig;
pub use watchers::Watchers;
