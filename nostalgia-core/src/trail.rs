//! Rainbow mouse trail easter egg.

use crate::random::RandomSource;

/// Minimum time between two trail decisions.
pub const TRAIL_THROTTLE_MS: f64 = 50.0;
/// Share of accepted moves that leave a mark.
pub const TRAIL_CHANCE: f64 = 0.1;
/// How long a mark stays on screen.
pub const TRAIL_LIFETIME_MS: u32 = 2000;
pub const TRAIL_MIN_WIDTH: f64 = 20.0;
pub const TRAIL_WIDTH_SPREAD: f64 = 30.0;

/// One rainbow streak at a pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailMark {
    pub x: f64,
    pub y: f64,
    pub width: f64,
}

/// Throttled, sparse reaction to pointer moves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MouseTrail {
    last_ms: Option<f64>,
}

impl MouseTrail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves inside the throttle window are ignored without drawing randomness.
    pub fn on_move(
        &mut self,
        now_ms: f64,
        x: f64,
        y: f64,
        rng: &mut impl RandomSource,
    ) -> Option<TrailMark> {
        if self
            .last_ms
            .is_some_and(|last| now_ms - last < TRAIL_THROTTLE_MS)
        {
            return None;
        }
        self.last_ms = Some(now_ms);

        if rng.next_f64() > TRAIL_CHANCE {
            return None;
        }
        Some(TrailMark {
            x,
            y,
            width: TRAIL_MIN_WIDTH + rng.next_f64() * TRAIL_WIDTH_SPREAD,
        })
    }
}
