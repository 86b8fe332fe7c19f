//! Framework-neutral WASM <-> JavaScript bridge for the nostalgia site.
//!
//! Plain-JS hosts drive the floating layer through [`FloatingField`], the quiz and
//! guess forms through [`SiteSession`], the music widget through [`MusicPlayer`] and
//! the games-modal clip through [`GamesVideo`].

use log::LevelFilter;
use nostalgia_core::{content, MsRange, SiteConfig, SpawnerConfig};
use serde::Deserialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

mod console;
mod field;
mod player;
mod session;

pub use field::FloatingField;
pub use player::{GamesVideo, MusicPlayer};
pub use session::{LocalStore, SiteSession};

#[derive(Deserialize, Default)]
#[serde(default)]
struct JsSpawnerConfig {
    start_delay_ms: Option<f64>,
    timeline_delay: Option<MsRange>,
    meme_interval: Option<MsRange>,
    meme_burst: Option<usize>,
    meme_burst_stagger_ms: Option<f64>,
    flight_duration: Option<MsRange>,
    peak_opacity: Option<f64>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct JsSiteConfig {
    api_url: Option<String>,
    quiz_questions: Option<u32>,
    guess_slots: Option<usize>,
    spawner: Option<JsSpawnerConfig>,
}

impl From<JsSpawnerConfig> for SpawnerConfig {
    fn from(cfg: JsSpawnerConfig) -> Self {
        let mut base = SpawnerConfig::default();
        if let Some(delay) = cfg.start_delay_ms {
            base.start_delay_ms = delay;
        }
        if let Some(range) = cfg.timeline_delay {
            base.timeline_delay = range;
        }
        if let Some(range) = cfg.meme_interval {
            base.meme_interval = range;
        }
        if let Some(burst) = cfg.meme_burst {
            base.meme_burst = burst;
        }
        if let Some(stagger) = cfg.meme_burst_stagger_ms {
            base.meme_burst_stagger_ms = stagger;
        }
        if let Some(range) = cfg.flight_duration {
            base.flight_duration = range;
        }
        if let Some(opacity) = cfg.peak_opacity {
            base.peak_opacity = opacity;
        }
        base
    }
}

impl From<JsSiteConfig> for SiteConfig {
    fn from(cfg: JsSiteConfig) -> Self {
        let mut base = SiteConfig::default();
        if let Some(url) = cfg.api_url.filter(|url| !url.trim().is_empty()) {
            base.api_url = url;
        }
        if let Some(questions) = cfg.quiz_questions {
            base.quiz_questions = questions;
        }
        if let Some(slots) = cfg.guess_slots {
            base.guess_slots = slots;
        }
        if let Some(spawner) = cfg.spawner {
            base.spawner = spawner.into();
        }
        base
    }
}

/// Reads an optional JS config object, falling back to defaults.
pub(crate) fn parse_config(config: Option<JsValue>) -> Result<SiteConfig, JsValue> {
    match config {
        Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => {
            let cfg: JsSiteConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Could not read config: {err}")))?;
            Ok(SiteConfig::from(cfg))
        }
        _ => Ok(SiteConfig::default()),
    }
}

pub(crate) fn to_js<T: serde::Serialize>(value: &T, what: &str) -> Result<JsValue, JsValue> {
    to_value(value).map_err(|err| JsValue::from_str(&format!("Could not serialize {what}: {err}")))
}

/// Sets up panic reporting and console logging. `verbose` enables per-spawn debug lines.
#[wasm_bindgen]
pub fn init(verbose: Option<bool>) {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let level = if verbose.unwrap_or(false) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    console::install(level);
}

#[wasm_bindgen]
pub fn timeline_items() -> Result<JsValue, JsValue> {
    to_js(&content::timeline_2011(), "timeline")
}

#[wasm_bindgen]
pub fn meme_sources() -> Result<JsValue, JsValue> {
    to_js(&content::meme_sources(), "memes")
}

#[wasm_bindgen]
pub fn music_tracks() -> Result<JsValue, JsValue> {
    to_js(&content::music_2011(), "tracks")
}

/// Opacity of an element at `progress` with the default fade envelope.
#[wasm_bindgen]
pub fn opacity_at(progress: f64) -> f64 {
    let cfg = SpawnerConfig::default();
    nostalgia_core::opacity_at(progress, cfg.peak_opacity, cfg.fade_fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn js_config_overrides_only_given_fields() {
        let cfg = SiteConfig::from(JsSiteConfig {
            api_url: Some("http://localhost:3000".to_string()),
            spawner: Some(JsSpawnerConfig {
                meme_burst: Some(0),
                ..JsSpawnerConfig::default()
            }),
            ..JsSiteConfig::default()
        });

        assert_eq!(cfg.api_url, "http://localhost:3000");
        assert_eq!(cfg.quiz_questions, 10);
        assert_eq!(cfg.spawner.meme_burst, 0);
        assert_eq!(cfg.spawner.start_delay_ms, 1000.0);
    }

    #[test]
    fn blank_api_url_keeps_default() {
        let cfg = SiteConfig::from(JsSiteConfig {
            api_url: Some("  ".to_string()),
            ..JsSiteConfig::default()
        });
        assert_eq!(cfg.api_url, nostalgia_core::DEFAULT_API_URL);
    }
}
