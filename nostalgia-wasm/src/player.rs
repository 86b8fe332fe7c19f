use nostalgia_core::content::music_2011;
use nostalgia_core::player::{
    format_time as format_clock, seek_percent as percent_of, seek_target as target_of,
};
use nostalgia_core::{FastRandom, Player, VideoPanel};
use wasm_bindgen::prelude::*;

use crate::to_js;

/// Playlist state behind the music widget. Every method returns the command to apply
/// to the host's `<audio>` element or YouTube frame.
#[wasm_bindgen]
pub struct MusicPlayer {
    player: Player,
    rng: FastRandom,
}

#[wasm_bindgen]
impl MusicPlayer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> MusicPlayer {
        Self {
            player: Player::new(music_2011()),
            rng: FastRandom::new(),
        }
    }

    pub fn toggle_play(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.player.toggle_play(), "player command")
    }

    pub fn next(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.player.next(), "player command")
    }

    pub fn previous(&mut self, position_secs: f64) -> Result<JsValue, JsValue> {
        to_js(&self.player.previous(position_secs), "player command")
    }

    pub fn track_ended(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.player.track_ended(), "player command")
    }

    pub fn toggle_shuffle(&mut self) -> bool {
        self.player.toggle_shuffle(&mut self.rng)
    }

    pub fn now_playing(&self) -> Result<JsValue, JsValue> {
        to_js(&self.player.now_playing(), "playback")
    }

    #[wasm_bindgen(getter)]
    pub fn playing(&self) -> bool {
        self.player.is_playing()
    }

    #[wasm_bindgen(getter)]
    pub fn track_count(&self) -> usize {
        self.player.len()
    }
}

impl Default for MusicPlayer {
    fn default() -> Self {
        Self::new()
    }
}

/// Video frame of the games modal. `open` and `close` return the command for the `<iframe>`.
#[wasm_bindgen]
pub struct GamesVideo {
    panel: VideoPanel,
}

#[wasm_bindgen]
impl GamesVideo {
    #[wasm_bindgen(constructor)]
    pub fn new() -> GamesVideo {
        Self {
            panel: VideoPanel::games(),
        }
    }

    pub fn open(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.panel.open(), "video command")
    }

    pub fn close(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.panel.close(), "video command")
    }

    #[wasm_bindgen(getter)]
    pub fn loaded(&self) -> bool {
        self.panel.loaded().is_some()
    }
}

impl Default for GamesVideo {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
pub fn format_time(secs: f64) -> String {
    format_clock(secs)
}

#[wasm_bindgen]
pub fn seek_percent(position_secs: f64, duration_secs: f64) -> f64 {
    percent_of(position_secs, duration_secs)
}

/// Position in seconds for a seek bar value, or nothing while the duration is unknown.
#[wasm_bindgen]
pub fn seek_target(percent: f64, duration_secs: f64) -> Option<f64> {
    target_of(percent, duration_secs)
}
