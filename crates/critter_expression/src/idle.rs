//! What the toy does on its own while idle.
//!
//! Hunger takes strict precedence over mood: a starving or hungry toy
//! complains no matter how it feels.

use crate::sounds::{SoundLibrary, COUGH, HUNGRY, RANDOM, SICK, SNEEZE};
use critter_core::{Appetite, Mood};
use rand::seq::SliceRandom;
use rand::Rng;

const SAD_SOUNDS: [&str; 2] = ["sigh", "slow_blink"];
const ANGRY_SOUNDS: [&str; 2] = ["grr", "shake_head"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdleBehavior {
    Starving(String),
    Hungry(String),
    Mood(Mood, String),
}

impl IdleBehavior {
    pub fn sound(&self) -> &str {
        match self {
            IdleBehavior::Starving(s) | IdleBehavior::Hungry(s) | IdleBehavior::Mood(_, s) => s,
        }
    }
}

pub fn choose_idle_behavior<R: Rng + ?Sized>(
    appetite: Appetite,
    mood: Mood,
    library: &SoundLibrary,
    rng: &mut R,
) -> IdleBehavior {
    match appetite {
        Appetite::Starving => {
            IdleBehavior::Starving(library.pick_any(&[SNEEZE, COUGH, SICK], rng))
        }
        Appetite::Hungry => IdleBehavior::Hungry(library.pick(HUNGRY, rng)),
        Appetite::Satisfied => {
            let sound = match mood {
                Mood::Happy => library.pick(RANDOM, rng),
                Mood::Sad => pick_fixed(&SAD_SOUNDS, rng),
                Mood::Angry => pick_fixed(&ANGRY_SOUNDS, rng),
            };
            IdleBehavior::Mood(mood, sound)
        }
    }
}

fn pick_fixed<R: Rng + ?Sized>(sounds: &[&str], rng: &mut R) -> String {
    sounds.choose(rng).map(|s| (*s).to_string()).unwrap_or_default()
}
