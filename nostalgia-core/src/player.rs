//! Background music player: ordered or shuffled playlist, prev/next, seek.
//!
//! The player only decides what should happen; the host owns the actual audio
//! element and acts on the returned [`PlayerCommand`].

use serde::{Deserialize, Serialize};

use crate::random::RandomSource;
use crate::Track;

/// Going back within this many seconds of a track's start switches track instead of restarting.
pub const RESTART_THRESHOLD_SECS: f64 = 3.0;

/// Where the host should load a track from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "url", rename_all = "snake_case")]
pub enum PlaybackSource {
    Audio(String),
    YouTube(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Playback {
    pub title: String,
    pub source: PlaybackSource,
}

/// Action the host has to perform on its audio output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PlayerCommand {
    Play { playback: Playback },
    Pause,
    /// Seek the current track back to 0.
    Restart,
    Nothing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ShuffleOrder {
    order: Vec<usize>,
    cursor: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    tracks: Vec<Track>,
    current: usize,
    playing: bool,
    shuffle: Option<ShuffleOrder>,
}

pub fn youtube_embed_url(id: &str) -> String {
    format!("https://www.youtube.com/embed/{id}?autoplay=1&loop=1")
}

impl Player {
    /// Keeps tracks with an audio URL; without any, falls back to YouTube-only tracks.
    pub fn new(tracks: Vec<Track>) -> Self {
        let audio: Vec<Track> = tracks
            .iter()
            .filter(|track| track.audio_url.is_some())
            .cloned()
            .collect();
        let tracks = if audio.is_empty() {
            tracks
                .into_iter()
                .filter(|track| track.youtube_id.is_some())
                .collect()
        } else {
            audio
        };

        Self {
            tracks,
            current: 0,
            playing: false,
            shuffle: None,
        }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffle.is_some()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.tracks.get(self.current)
    }

    pub fn now_playing(&self) -> Option<Playback> {
        let track = self.current_track()?;
        let source = match (&track.audio_url, &track.youtube_id) {
            (Some(url), _) => PlaybackSource::Audio(url.clone()),
            (None, Some(id)) => PlaybackSource::YouTube(youtube_embed_url(id)),
            (None, None) => return None,
        };
        Some(Playback {
            title: track.title.clone(),
            source,
        })
    }

    pub fn toggle_play(&mut self) -> PlayerCommand {
        if self.is_empty() {
            return PlayerCommand::Nothing;
        }
        self.playing = !self.playing;
        if self.playing {
            self.play_current()
        } else {
            PlayerCommand::Pause
        }
    }

    pub fn next(&mut self) -> PlayerCommand {
        if self.is_empty() {
            return PlayerCommand::Nothing;
        }
        self.current = match &mut self.shuffle {
            Some(shuffle) => {
                shuffle.cursor = (shuffle.cursor + 1) % shuffle.order.len();
                shuffle.order[shuffle.cursor]
            }
            None => (self.current + 1) % self.tracks.len(),
        };
        self.play_if_playing()
    }

    /// Restarts the track past the threshold, otherwise steps back one track.
    pub fn previous(&mut self, position_secs: f64) -> PlayerCommand {
        if self.is_empty() {
            return PlayerCommand::Nothing;
        }
        if position_secs > RESTART_THRESHOLD_SECS {
            return PlayerCommand::Restart;
        }
        let len = self.tracks.len();
        self.current = match &mut self.shuffle {
            Some(shuffle) => {
                shuffle.cursor = (shuffle.cursor + shuffle.order.len() - 1) % shuffle.order.len();
                shuffle.order[shuffle.cursor]
            }
            None => (self.current + len - 1) % len,
        };
        self.play_if_playing()
    }

    pub fn track_ended(&mut self) -> PlayerCommand {
        self.next()
    }

    /// Turns shuffle on with a fresh Fisher-Yates order, or off. Returns the new state.
    pub fn toggle_shuffle(&mut self, rng: &mut impl RandomSource) -> bool {
        if self.shuffle.take().is_some() {
            return false;
        }
        let mut order: Vec<usize> = (0..self.tracks.len()).collect();
        for i in (1..order.len()).rev() {
            let j = rng.below(i + 1);
            order.swap(i, j);
        }
        self.shuffle = Some(ShuffleOrder { order, cursor: 0 });
        true
    }

    fn play_current(&self) -> PlayerCommand {
        match self.now_playing() {
            Some(playback) => PlayerCommand::Play { playback },
            None => PlayerCommand::Nothing,
        }
    }

    fn play_if_playing(&self) -> PlayerCommand {
        if self.playing {
            self.play_current()
        } else {
            PlayerCommand::Nothing
        }
    }
}

/// Seek bar position in percent.
pub fn seek_percent(position_secs: f64, duration_secs: f64) -> f64 {
    if !duration_secs.is_finite() || duration_secs <= 0.0 {
        return 0.0;
    }
    (position_secs / duration_secs * 100.0).clamp(0.0, 100.0)
}

/// Position to jump to for a seek bar value; `None` until the duration is known.
pub fn seek_target(percent: f64, duration_secs: f64) -> Option<f64> {
    if !duration_secs.is_finite() || duration_secs <= 0.0 {
        return None;
    }
    Some(percent.clamp(0.0, 100.0) / 100.0 * duration_secs)
}

/// `m:ss`, with `0:00` for unknown or zero durations.
pub fn format_time(secs: f64) -> String {
    if !secs.is_finite() || secs <= 0.0 {
        return "0:00".to_string();
    }
    let whole = secs.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// Clip embedded in the games modal.
pub const GAMES_VIDEO_URL: &str = "https://www.youtube.com/embed/eSMeUPFjQHc?autoplay=1";

/// Action the host has to perform on an embedded video frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum VideoCommand {
    Load { url: String },
    /// Blank the frame source so playback stops.
    Clear,
    Nothing,
}

/// Embedded video of a modal: loaded on first open, cleared on close.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoPanel {
    url: String,
    loaded: Option<String>,
}

impl VideoPanel {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            loaded: None,
        }
    }

    pub fn games() -> Self {
        Self::new(GAMES_VIDEO_URL)
    }

    pub fn loaded(&self) -> Option<&str> {
        self.loaded.as_deref()
    }

    /// Reopening while the video is still loaded leaves it playing.
    pub fn open(&mut self) -> VideoCommand {
        if self.loaded.is_some() {
            return VideoCommand::Nothing;
        }
        self.loaded = Some(self.url.clone());
        VideoCommand::Load {
            url: self.url.clone(),
        }
    }

    pub fn close(&mut self) -> VideoCommand {
        self.loaded = None;
        VideoCommand::Clear
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;
    use crate::TrackCategory;

    fn track(title: &str, audio: Option<&str>, youtube: Option<&str>) -> Track {
        Track {
            title: title.to_string(),
            audio_url: audio.map(str::to_string),
            youtube_id: youtube.map(str::to_string),
            midi_url: None,
            category: TrackCategory::Pop,
            note: None,
        }
    }

    fn playlist() -> Vec<Track> {
        vec![
            track("one", Some("https://cdn/1.ogg"), None),
            track("two", Some("https://cdn/2.ogg"), Some("yt2")),
            track("three", Some("https://cdn/3.ogg"), None),
            track("video only", None, Some("yt4")),
        ]
    }

    #[test]
    fn audio_tracks_take_precedence() {
        let player = Player::new(playlist());
        assert_eq!(player.len(), 3);
        assert_eq!(
            player.now_playing().map(|p| p.source),
            Some(PlaybackSource::Audio("https://cdn/1.ogg".to_string()))
        );
    }

    #[test]
    fn youtube_fallback_builds_embed_url() {
        let player = Player::new(vec![track("nyan", None, Some("wZZ7oFKsKzY")), track("none", None, None)]);
        assert_eq!(player.len(), 1);
        assert_eq!(
            player.now_playing().map(|p| p.source),
            Some(PlaybackSource::YouTube(
                "https://www.youtube.com/embed/wZZ7oFKsKzY?autoplay=1&loop=1".to_string()
            ))
        );
    }

    #[test]
    fn ordered_navigation_wraps() {
        let mut player = Player::new(playlist());
        assert_eq!(player.previous(0.0), PlayerCommand::Nothing);
        assert_eq!(player.current_index(), 2);
        player.next();
        assert_eq!(player.current_index(), 0);
    }

    #[test]
    fn previous_restarts_after_three_seconds() {
        let mut player = Player::new(playlist());
        player.toggle_play();
        player.next();
        assert_eq!(player.previous(3.5), PlayerCommand::Restart);
        assert_eq!(player.current_index(), 1);
        assert!(matches!(player.previous(1.0), PlayerCommand::Play { .. }));
        assert_eq!(player.current_index(), 0);
    }

    #[test]
    fn play_pause_toggles() {
        let mut player = Player::new(playlist());
        assert!(matches!(player.toggle_play(), PlayerCommand::Play { .. }));
        assert_eq!(player.toggle_play(), PlayerCommand::Pause);
        assert!(!player.is_playing());
    }

    #[test]
    fn shuffle_walks_a_permutation() {
        let mut player = Player::new(playlist());
        // i = 2 picks 0, i = 1 picks 0: [0, 1, 2] -> [2, 1, 0] -> [1, 2, 0]
        assert!(player.toggle_shuffle(&mut ScriptedRandom::constant(0.0)));
        player.next();
        assert_eq!(player.current_index(), 2);
        player.next();
        assert_eq!(player.current_index(), 0);
        player.next();
        assert_eq!(player.current_index(), 1);
        player.previous(0.0);
        assert_eq!(player.current_index(), 0);
        assert!(!player.toggle_shuffle(&mut ScriptedRandom::constant(0.0)));
        assert!(!player.is_shuffled());
    }

    #[test]
    fn empty_playlist_does_nothing() {
        let mut player = Player::new(Vec::new());
        assert_eq!(player.toggle_play(), PlayerCommand::Nothing);
        assert_eq!(player.next(), PlayerCommand::Nothing);
        assert_eq!(player.previous(10.0), PlayerCommand::Nothing);
        assert!(player.toggle_shuffle(&mut ScriptedRandom::constant(0.5)));
        assert_eq!(player.next(), PlayerCommand::Nothing);
    }

    #[test]
    fn time_helpers() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(65.9), "1:05");
        assert_eq!(seek_percent(30.0, 120.0), 25.0);
        assert_eq!(seek_target(50.0, 200.0), Some(100.0));
        assert_eq!(seek_target(50.0, f64::NAN), None);
    }

    #[test]
    fn video_loads_once_and_clears_on_close() {
        let mut video = VideoPanel::games();
        assert_eq!(
            video.open(),
            VideoCommand::Load {
                url: GAMES_VIDEO_URL.to_string()
            }
        );
        assert_eq!(video.open(), VideoCommand::Nothing);
        assert_eq!(video.loaded(), Some(GAMES_VIDEO_URL));

        assert_eq!(video.close(), VideoCommand::Clear);
        assert_eq!(video.loaded(), None);
        assert!(matches!(video.open(), VideoCommand::Load { .. }));
    }

    #[test]
    fn video_command_wire_shape() {
        let json = serde_json::to_value(VideoCommand::Load {
            url: "u".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"action": "load", "url": "u"}));
        assert_eq!(
            serde_json::to_value(VideoCommand::Clear).unwrap(),
            serde_json::json!({"action": "clear"})
        );
    }
}
