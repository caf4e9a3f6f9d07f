//! Sound asset discovery.
//!
//! Assets are `<id>.wav` files in one folder. A pool is every asset whose id
//! starts with a given prefix (`snoring1`, `snoring_loud`, ... all belong to
//! `snoring`).

use rand::seq::SliceRandom;
use rand::Rng;
use std::path::Path;

pub const SNEEZE: &str = "sneeze";
pub const COUGH: &str = "cough";
pub const SICK: &str = "sick";
pub const SNORING: &str = "snoring";
pub const LOVE_REPLY: &str = "love_reply";
pub const LAUGH: &str = "laugh";
pub const HUNGRY: &str = "hungry";
pub const HOW_ARE_YOU_REPLY: &str = "howareyou_reply";
pub const HATE_REPLY: &str = "hate_reply";
pub const BYE: &str = "bye";
pub const GREETING_MORNING: &str = "greeting_morning";
pub const GREETING_AFTERNOON: &str = "greeting_afternoon";
pub const GREETING_EVENING: &str = "greeting_evening";
pub const GREETING_NIGHT: &str = "greeting_night";
pub const RANDOM: &str = "random";
pub const SONG: &str = "song";

/// Every asset id found in the sound folder.
#[derive(Debug, Clone, Default)]
pub struct SoundLibrary {
    ids: Vec<String>,
}

impl SoundLibrary {
    /// Scan `dir` for `.wav` files. A missing folder is logged and yields an
    /// empty library.
    pub fn scan<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Missing sound folder {}: {}", dir.display(), e);
                return Self::default();
            }
        };

        let mut ids: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                name.strip_suffix(".wav").map(str::to_string)
            })
            .collect();
        ids.sort();
        tracing::info!("Loaded {} sounds from {}", ids.len(), dir.display());

        Self { ids }
    }

    /// Library over a fixed id list (no folder behind it).
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        ids.sort();
        Self { ids }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.binary_search_by(|s| s.as_str().cmp(id)).is_ok()
    }

    /// All ids starting with `prefix`.
    pub fn pool(&self, prefix: &str) -> Vec<&str> {
        self.ids
            .iter()
            .filter(|id| id.starts_with(prefix))
            .map(String::as_str)
            .collect()
    }

    /// Random pick from one pool. An empty pool falls back to the prefix
    /// itself, so playback degrades to a missing-asset log.
    pub fn pick<R: Rng + ?Sized>(&self, prefix: &str, rng: &mut R) -> String {
        self.pick_any(&[prefix], rng)
    }

    /// Random pick from the union of several pools.
    pub fn pick_any<R: Rng + ?Sized>(&self, prefixes: &[&str], rng: &mut R) -> String {
        let union: Vec<&str> = prefixes.iter().flat_map(|p| self.pool(p)).collect();
        match union.choose(rng) {
            Some(id) => (*id).to_string(),
            None => prefixes
                .choose(rng)
                .map(|p| (*p).to_string())
                .unwrap_or_default(),
        }
    }
}
