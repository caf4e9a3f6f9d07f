//! Intent dispatch: the toy's skills.
//!
//! A classified intent (name + slots) is parsed into [`Intent`] and routed to
//! exactly one handler. Handlers never touch controller state; they describe
//! what to perform and where the state machine should go once the
//! performance is over.

use crate::clock::{self, clip};
use crate::greeting::greeting;
use crate::performance::Performance;
use crate::sounds::{
    SoundLibrary, BYE, HATE_REPLY, HOW_ARE_YOU_REPLY, HUNGRY, LAUGH, LOVE_REPLY, SONG,
};
use chrono::{NaiveDateTime, Timelike};
use critter_core::{Appetite, ClassifiedIntent};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

/// Largest number the counting clips cover.
const MAX_COUNT: u32 = 99;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SingASong { song: Option<String> },
    GoToSleep,
    WakeUp,
    TellAJoke,
    TellAStory,
    TellTime,
    TellDate,
    PlayGame,
    SingRhyme,
    Dance,
    ILoveYou,
    IHateYou,
    WhatIsYourName,
    WhoAreYou,
    HowAreYou,
    Count { number: Option<String> },
    SayAbc,
    TeachMe,
    Mouth { state: Option<String> },
    TellANumber,
    AreYouHungry,
    MoveEars,
    Eyes { state: Option<String> },
    Look { state: Option<String> },
    HeyFurby,
    Bye,
    Greeting { state: Option<String> },
    Alarm {
        hour: Option<String>,
        minute: Option<String>,
        ampm: Option<String>,
    },
    PlayMusic,
    TellAge,
    Ok,
    Yes,
    No,
    Cancel,
    RemoveAlarm { alarm: Option<String> },
    TellAlarm,
    Friend,
    Unknown(String),
}

impl Intent {
    pub fn parse(classified: &ClassifiedIntent) -> Self {
        let slot = |key: &str| classified.slot(key).map(str::to_string);
        match classified.name.as_str() {
            "SINGASONG" => Intent::SingASong { song: slot("song") },
            "GOTOSLEEP" => Intent::GoToSleep,
            "WAKEUP" => Intent::WakeUp,
            "TELLAJOKE" => Intent::TellAJoke,
            "TELLASTORY" => Intent::TellAStory,
            "TELLTIME" => Intent::TellTime,
            "TELLDATE" => Intent::TellDate,
            "PLAYGAME" => Intent::PlayGame,
            "SINGRHYME" => Intent::SingRhyme,
            "DANCE" => Intent::Dance,
            "ILOVEYOU" => Intent::ILoveYou,
            "IHATEYOU" => Intent::IHateYou,
            "WHATISYOURNAME" => Intent::WhatIsYourName,
            "WHOAREYOU" => Intent::WhoAreYou,
            "HOWAREYOU" => Intent::HowAreYou,
            "COUNT" => Intent::Count {
                number: slot("number"),
            },
            "SAYABC" => Intent::SayAbc,
            "TEACHME" => Intent::TeachMe,
            "MOUTH" => Intent::Mouth {
                state: slot("mouthState"),
            },
            "TELLANUMBER" => Intent::TellANumber,
            "AREYOUHUNGRY" => Intent::AreYouHungry,
            "MOVEEARS" => Intent::MoveEars,
            "EYES" => Intent::Eyes {
                state: slot("eyeState"),
            },
            "LOOK" => Intent::Look {
                state: slot("lookState"),
            },
            "HEYFURBY" => Intent::HeyFurby,
            "BYE" => Intent::Bye,
            "GREETING" => Intent::Greeting {
                state: slot("greetingState"),
            },
            "ALARM" => Intent::Alarm {
                hour: slot("hour"),
                minute: slot("minute"),
                ampm: slot("ampm"),
            },
            "PLAYMUSIC" => Intent::PlayMusic,
            "TELLAGE" => Intent::TellAge,
            "OK" => Intent::Ok,
            "YES" => Intent::Yes,
            "NO" => Intent::No,
            "CANCEL" => Intent::Cancel,
            "REMOVEALARM" => Intent::RemoveAlarm {
                alarm: slot("alarm"),
            },
            "TELLALARM" => Intent::TellAlarm,
            "FRIEND" => Intent::Friend,
            other => Intent::Unknown(other.to_string()),
        }
    }
}

/// Where the state machine goes once a performance is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterPerformance {
    Idle,
    Sleep,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentResponse {
    pub intent: Intent,
    pub performance: Performance,
    pub after: AfterPerformance,
}

impl IntentResponse {
    fn new(intent: Intent, performance: Performance) -> Self {
        Self {
            intent,
            performance,
            after: AfterPerformance::Idle,
        }
    }

    fn stub(intent: Intent) -> Self {
        Self::new(intent, Performance::new())
    }

    /// How long the toy stays busy.
    pub fn duration(&self) -> Duration {
        self.performance.duration()
    }
}

/// What a handler may look at besides the slots.
#[derive(Debug, Clone, Copy)]
pub struct IntentContext {
    pub now: NaiveDateTime,
    pub appetite: Appetite,
}

impl IntentContext {
    pub fn now(appetite: Appetite) -> Self {
        Self {
            now: chrono::Local::now().naive_local(),
            appetite,
        }
    }
}

pub struct IntentDispatcher {
    library: Arc<SoundLibrary>,
    /// Length of a song, dance or spoken reply animation
    perform_for: Duration,
    dance_for: Duration,
}

impl IntentDispatcher {
    pub fn new(library: Arc<SoundLibrary>, perform_for: Duration) -> Self {
        Self {
            library,
            perform_for,
            dance_for: Duration::from_secs(10),
        }
    }

    pub fn dispatch_with<R: Rng + ?Sized>(
        &self,
        classified: &ClassifiedIntent,
        ctx: &IntentContext,
        rng: &mut R,
    ) -> IntentResponse {
        let intent = Intent::parse(classified);
        let lib = &self.library;
        let talk = self.perform_for;

        match intent {
            Intent::SingASong { ref song } => {
                tracing::info!("[INTENT] Sing a song: {}", song.as_deref().unwrap_or("?"));
                let song = match song {
                    Some(s) => s.clone(),
                    None => lib.pick(SONG, rng),
                };
                let perf = Performance::new().act(&song, talk);
                IntentResponse::new(intent, perf)
            }
            Intent::GoToSleep => {
                tracing::info!("[INTENT] Go to sleep");
                IntentResponse {
                    after: AfterPerformance::Sleep,
                    ..IntentResponse::stub(intent)
                }
            }
            Intent::TellAJoke => {
                tracing::info!("[INTENT] Tell a joke");
                let laugh = lib.pick(LAUGH, rng);
                IntentResponse::new(intent, Performance::new().act(&laugh, talk))
            }
            Intent::TellTime => {
                tracing::info!("[INTENT] Tell the time");
                let perf = speak(clock::time_phrase(ctx.now.time(), rng), talk);
                IntentResponse::new(intent, perf)
            }
            Intent::TellDate => {
                tracing::info!("[INTENT] Tell the date");
                let perf = speak(clock::date_phrase(ctx.now.date(), rng), talk);
                IntentResponse::new(intent, perf)
            }
            Intent::Dance => {
                tracing::info!("[INTENT] Dance");
                IntentResponse::new(intent, Performance::new().act("dance", self.dance_for))
            }
            Intent::ILoveYou => {
                tracing::info!("[INTENT] I love you");
                self.reply(intent, LOVE_REPLY, rng)
            }
            Intent::IHateYou => {
                tracing::info!("[INTENT] I hate you");
                self.reply(intent, HATE_REPLY, rng)
            }
            Intent::HowAreYou => {
                tracing::info!("[INTENT] How are you");
                self.reply(intent, HOW_ARE_YOU_REPLY, rng)
            }
            Intent::Bye => {
                tracing::info!("[INTENT] Bye");
                self.reply(intent, BYE, rng)
            }
            Intent::AreYouHungry => {
                tracing::info!("[INTENT] Are you hungry?");
                match ctx.appetite {
                    Appetite::Starving | Appetite::Hungry => self.reply(intent, HUNGRY, rng),
                    Appetite::Satisfied => {
                        IntentResponse::new(intent, Performance::new().act("full", talk))
                    }
                }
            }
            Intent::Greeting { ref state } => {
                tracing::info!("[INTENT] Greeting: {}", state.as_deref().unwrap_or("-"));
                let sound = greeting(lib, ctx.now.hour(), rng);
                IntentResponse::new(intent, Performance::new().act(&sound, talk))
            }
            Intent::Count { ref number } => {
                tracing::info!("[INTENT] Count to {}", number.as_deref().unwrap_or("?"));
                let perf = match number.as_deref().and_then(|n| n.trim().parse::<u32>().ok()) {
                    Some(n) => speak((1..=n.min(MAX_COUNT)).map(|i| clip(i)).collect(), talk),
                    None => {
                        tracing::warn!("[INTENT] COUNT without a usable number slot");
                        Performance::new()
                    }
                };
                IntentResponse::new(intent, perf)
            }
            Intent::TellANumber => {
                tracing::info!("[INTENT] Tell a number");
                let n = rng.gen_range(1..=MAX_COUNT);
                IntentResponse::new(intent, speak(vec![clip(n)], talk))
            }
            Intent::Mouth { ref state } => {
                tracing::info!("[INTENT] Mouth control: {}", state.as_deref().unwrap_or("-"));
                IntentResponse::stub(intent)
            }
            Intent::Eyes { ref state } => {
                tracing::info!("[INTENT] Eyes: {}", state.as_deref().unwrap_or("-"));
                IntentResponse::stub(intent)
            }
            Intent::Look { ref state } => {
                tracing::info!("[INTENT] Look: {}", state.as_deref().unwrap_or("-"));
                IntentResponse::stub(intent)
            }
            Intent::Alarm {
                ref hour,
                ref minute,
                ref ampm,
            } => {
                tracing::info!(
                    "[INTENT] Alarm set for {}:{} {}",
                    hour.as_deref().unwrap_or("?"),
                    minute.as_deref().unwrap_or("00"),
                    ampm.as_deref().unwrap_or("")
                );
                IntentResponse::stub(intent)
            }
            Intent::RemoveAlarm { ref alarm } => {
                tracing::info!("[INTENT] Remove alarm {}", alarm.as_deref().unwrap_or("?"));
                IntentResponse::stub(intent)
            }
            Intent::Unknown(ref name) => {
                tracing::warn!("[ERROR] Unknown intent: {}", name);
                IntentResponse::stub(intent)
            }
            other => {
                tracing::info!("[INTENT] {}", stub_label(&other));
                IntentResponse::stub(other)
            }
        }
    }

    fn reply<R: Rng + ?Sized>(&self, intent: Intent, pool: &str, rng: &mut R) -> IntentResponse {
        let sound = self.library.pick(pool, rng);
        IntentResponse::new(intent, Performance::new().act(&sound, self.perform_for))
    }
}

/// Play clips back to back, then hold the talking animation.
fn speak(clips: Vec<String>, talk: Duration) -> Performance {
    if clips.is_empty() {
        return Performance::new();
    }
    clips
        .into_iter()
        .fold(Performance::new(), |perf, c| perf.play(c))
        .animate("talk", talk)
}

fn stub_label(intent: &Intent) -> &'static str {
    match intent {
        Intent::WakeUp => "Wake up",
        Intent::TellAStory => "Tell a story",
        Intent::PlayGame => "Play a game",
        Intent::SingRhyme => "Sing a rhyme / poem",
        Intent::WhatIsYourName => "What is your name",
        Intent::WhoAreYou => "Who are you",
        Intent::SayAbc => "Say ABC",
        Intent::TeachMe => "Teach me something",
        Intent::MoveEars => "Move ears",
        Intent::HeyFurby => "Hey Furby",
        Intent::PlayMusic => "Play music",
        Intent::TellAge => "Tell age",
        Intent::Ok => "OK",
        Intent::Yes => "YES",
        Intent::No => "NO",
        Intent::Cancel => "CANCEL",
        Intent::TellAlarm => "Tell all alarms",
        Intent::Friend => "Friend request",
        _ => "Intent",
    }
}
