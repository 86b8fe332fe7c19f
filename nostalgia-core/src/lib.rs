//! Core model and logic for the 2011 nostalgia site.
//!
//! Everything here is host-agnostic: time is passed in as milliseconds, randomness
//! comes from an injected [`RandomSource`], rendering goes through a [`Stage`] and
//! persistence through a [`KeyValueStore`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod content;
pub mod guesses;
pub mod motion;
pub mod player;
pub mod quiz;
pub mod random;
pub mod schedule;
pub mod spawner;
pub mod state;
pub mod trail;

pub use guesses::{confirm_passphrase, render_profile, GuessBook};
pub use motion::{opacity_at, Edge, FloatPath, Frame, Point, Viewport};
pub use player::{Playback, PlaybackSource, Player, PlayerCommand, VideoCommand, VideoPanel};
pub use quiz::{AbAnswers, AbQuiz};
pub use random::{FastRandom, RandomSource, ScriptedRandom};
pub use schedule::{MsRange, RepeatingTask};
pub use spawner::{
    ElementId, FloatingElement, Origin, Phase, RecordingStage, SpawnStats, Spawner, Stage,
    StageEvent, TimelineCursor, Visual,
};
pub use state::{KeyValueStore, MemoryStore, Session, SiteState};
pub use trail::{MouseTrail, TrailMark};

/// Default collector API used when nothing overrides it.
pub const DEFAULT_API_URL: &str = "https://app-alxmhaah.fly.dev";

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL of the answer/guess collector.
    pub api_url: String,
    /// Number of A/B questions the quiz cycles through.
    pub quiz_questions: u32,
    /// Number of password guess inputs on the page.
    pub guess_slots: usize,
    pub spawner: SpawnerConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            quiz_questions: 10,
            guess_slots: 5,
            spawner: SpawnerConfig::default(),
        }
    }
}

/// Timing and geometry of the floating layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpawnerConfig {
    /// Delay between `start` and the first spawn, leaving room for the rest of the page.
    pub start_delay_ms: f64,
    /// Pause between two consecutive timeline items.
    pub timeline_delay: MsRange,
    /// Period of the recurring meme spawn.
    pub meme_interval: MsRange,
    /// Memes spawned right away when the meme line activates.
    pub meme_burst: usize,
    pub meme_burst_stagger_ms: f64,
    /// How long one element takes to cross the viewport.
    pub flight_duration: MsRange,
    /// Distance past the top, bottom and right edges where paths begin and end.
    pub edge_margin: f64,
    /// Distance past the left edge; wide enough to hide a full card.
    pub wide_margin: f64,
    pub peak_opacity: f64,
    /// Share of the flight spent fading in, and again fading out.
    pub fade_fraction: f64,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            start_delay_ms: 1000.0,
            timeline_delay: MsRange::new(3000.0, 6000.0),
            meme_interval: MsRange::new(2000.0, 4000.0),
            meme_burst: 5,
            meme_burst_stagger_ms: 500.0,
            flight_duration: MsRange::new(15000.0, 25000.0),
            edge_margin: 100.0,
            wide_margin: 300.0,
            peak_opacity: 0.8,
            fade_fraction: 0.1,
        }
    }
}

/// Kind of timeline record, which decides how it is drawn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Headline,
    Quote,
    Meme,
    Event,
}

/// Tone of a timeline record; doubles as a CSS modifier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Hope,
    Tech,
    Energy,
    Momentum,
    Confrontation,
    Persistence,
    World,
    Personal,
}

impl Mood {
    pub fn as_class(self) -> &'static str {
        match self {
            Mood::Hope => "hope",
            Mood::Tech => "tech",
            Mood::Energy => "energy",
            Mood::Momentum => "momentum",
            Mood::Confrontation => "confrontation",
            Mood::Persistence => "persistence",
            Mood::World => "world",
            Mood::Personal => "personal",
        }
    }
}

/// One static record of the 2011 timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineItem {
    pub id: u32,
    pub date: Option<NaiveDate>,
    pub title: String,
    pub text: Option<String>,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub mood: Option<Mood>,
    pub source: Option<String>,
    pub location: Option<String>,
    /// Narrative act (1 = September ... 4 = December).
    pub act: Option<u8>,
}

impl TimelineItem {
    /// Short label such as `Sep 17`.
    pub fn date_label(&self) -> Option<String> {
        self.date.map(|date| date.format("%b %-d").to_string())
    }
}

/// A meme image that can float across the page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MemeSource {
    pub url: String,
    pub name: String,
    /// Suggested size in pixels.
    pub size: u32,
    #[serde(default)]
    pub is_gif: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrackCategory {
    Pop,
    Meme,
    Game,
    Hacker,
    Nerdcore,
    Chiptune,
}

/// Entry of the background playlist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub title: String,
    pub audio_url: Option<String>,
    pub youtube_id: Option<String>,
    pub midi_url: Option<String>,
    pub category: TrackCategory,
    pub note: Option<String>,
}

/// Errors raised by site logic.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SiteError {
    #[error("Please enter a passphrase")]
    EmptyPassphrase,
    #[error("Passphrases do not match")]
    PassphraseMismatch,
    #[error("Question {question} is outside 1..={total}")]
    UnknownQuestion { question: u32, total: u32 },
    #[error("Storage rejected `{key}`: {reason}")]
    Storage { key: String, reason: String },
    #[error("Stored value under `{key}` is unreadable: {reason}")]
    CorruptState { key: String, reason: String },
}
