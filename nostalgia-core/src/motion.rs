//! Straight-line flight paths and the opacity envelope of floating elements.

use serde::{Deserialize, Serialize};

use crate::random::RandomSource;

/// Visible area of the host, in CSS pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when the point lies inside or on the border of the viewport.
    pub fn contains(&self, point: Point) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn lerp(self, to: Point, t: f64) -> Point {
        Point {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
        }
    }
}

/// Edge an element enters from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    pub fn opposite(self) -> Edge {
        match self {
            Edge::Top => Edge::Bottom,
            Edge::Right => Edge::Left,
            Edge::Bottom => Edge::Top,
            Edge::Left => Edge::Right,
        }
    }

    /// True when `point` is strictly beyond this edge of the viewport.
    pub fn is_beyond(self, viewport: Viewport, point: Point) -> bool {
        match self {
            Edge::Top => point.y < 0.0,
            Edge::Right => point.x > viewport.width,
            Edge::Bottom => point.y > viewport.height,
            Edge::Left => point.x < 0.0,
        }
    }
}

/// Rendered state of an element for one frame.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub opacity: f64,
}

/// Path from outside one edge to outside the opposite edge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FloatPath {
    pub edge: Edge,
    pub start: Point,
    pub end: Point,
}

impl FloatPath {
    /// Draws an entry edge, then the start offset, then the end offset.
    ///
    /// `margin` pushes points past the top, right and bottom edges, `wide_margin`
    /// past the left edge where a whole card has to be hidden.
    pub fn plan(
        viewport: Viewport,
        margin: f64,
        wide_margin: f64,
        rng: &mut impl RandomSource,
    ) -> Self {
        let edge = Edge::ALL[rng.below(Edge::ALL.len())];
        let start_offset = rng.next_f64();
        let end_offset = rng.next_f64();
        let Viewport { width, height } = viewport;

        let (start, end) = match edge {
            Edge::Top => (
                Point::new(start_offset * width, -margin),
                Point::new(end_offset * width, height + margin),
            ),
            Edge::Right => (
                Point::new(width + margin, start_offset * height),
                Point::new(-wide_margin, end_offset * height),
            ),
            Edge::Bottom => (
                Point::new(start_offset * width, height + margin),
                Point::new(end_offset * width, -margin),
            ),
            Edge::Left => (
                Point::new(-wide_margin, start_offset * height),
                Point::new(width + margin, end_offset * height),
            ),
        };

        Self { edge, start, end }
    }

    pub fn position_at(&self, progress: f64) -> Point {
        self.start.lerp(self.end, progress.clamp(0.0, 1.0))
    }
}

/// Normalized progress of a flight; durations of zero or less count as finished.
pub fn progress(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    (elapsed_ms / duration_ms).max(0.0)
}

/// Fade in over the first `fade` of progress, hold at `peak`, fade out over the last `fade`.
pub fn opacity_at(progress: f64, peak: f64, fade: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    if fade <= 0.0 {
        return peak;
    }
    let envelope = if p < fade {
        p / fade
    } else if p > 1.0 - fade {
        (1.0 - p) / fade
    } else {
        1.0
    };
    envelope.clamp(0.0, 1.0) * peak
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;

    const VIEW: Viewport = Viewport {
        width: 1280.0,
        height: 720.0,
    };

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn every_edge_starts_and_ends_outside() {
        for (index, edge) in Edge::ALL.into_iter().enumerate() {
            for offset in [0.0, 0.37, 0.999] {
                let pick = (index as f64 + 0.5) / 4.0;
                let mut rng = ScriptedRandom::new([pick, offset, 1.0 - offset]);
                let path = FloatPath::plan(VIEW, 100.0, 300.0, &mut rng);

                assert_eq!(path.edge, edge);
                assert!(edge.is_beyond(VIEW, path.start), "{edge:?} start {:?}", path.start);
                assert!(
                    edge.opposite().is_beyond(VIEW, path.end),
                    "{edge:?} end {:?}",
                    path.end
                );
                assert!(!VIEW.contains(path.start));
                assert!(!VIEW.contains(path.end));
            }
        }
    }

    #[test]
    fn zero_samples_give_minimum_offsets() {
        let path = FloatPath::plan(VIEW, 100.0, 300.0, &mut ScriptedRandom::constant(0.0));
        assert_eq!(path.edge, Edge::Top);
        assert_eq!(path.start, Point::new(0.0, -100.0));
        assert_eq!(path.end, Point::new(0.0, 820.0));
    }

    #[test]
    fn position_interpolates_linearly() {
        let path = FloatPath {
            edge: Edge::Left,
            start: Point::new(-300.0, 100.0),
            end: Point::new(1380.0, 500.0),
        };
        assert_eq!(path.position_at(0.0), path.start);
        assert_eq!(path.position_at(1.0), path.end);
        let mid = path.position_at(0.5);
        assert!(close(mid.x, 540.0));
        assert!(close(mid.y, 300.0));
    }

    #[test]
    fn opacity_envelope_has_a_plateau() {
        assert_eq!(opacity_at(0.0, 0.8, 0.1), 0.0);
        assert!(close(opacity_at(0.05, 0.8, 0.1), 0.4));
        assert!(close(opacity_at(0.1, 0.8, 0.1), 0.8));
        assert!(close(opacity_at(0.5, 0.8, 0.1), 0.8));
        assert!(close(opacity_at(0.9, 0.8, 0.1), 0.8));
        assert!(close(opacity_at(0.95, 0.8, 0.1), 0.4));
        assert!(close(opacity_at(1.0, 0.8, 0.1), 0.0));
    }

    #[test]
    fn opacity_is_continuous() {
        let mut previous = opacity_at(0.0, 0.8, 0.1);
        for step in 1..=1000 {
            let current = opacity_at(step as f64 / 1000.0, 0.8, 0.1);
            assert!((current - previous).abs() <= 0.0081, "jump at step {step}");
            previous = current;
        }
    }

    #[test]
    fn non_positive_duration_is_finished() {
        assert_eq!(progress(10.0, 0.0), 1.0);
        assert_eq!(progress(-5.0, 100.0), 0.0);
        assert_eq!(progress(50.0, 100.0), 0.5);
    }
}
