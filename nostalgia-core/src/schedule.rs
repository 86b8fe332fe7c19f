//! Timer lines driven by an external clock.

use serde::{Deserialize, Serialize};

use crate::random::RandomSource;

/// Half-open millisecond range `[min, max)` sampled uniformly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MsRange {
    pub min: f64,
    pub max: f64,
}

impl MsRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn sample(&self, rng: &mut impl RandomSource) -> f64 {
        self.min + (self.max - self.min) * rng.next_f64()
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value < self.max
    }
}

/// A repeating task whose owner re-arms it after each firing.
///
/// Once cancelled the task never fires again, even if re-armed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepeatingTask {
    next_due: Option<f64>,
    cancelled: bool,
    fired: u64,
}

impl RepeatingTask {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm_at(&mut self, at_ms: f64) {
        if !self.cancelled {
            self.next_due = Some(at_ms);
        }
    }

    /// Consumes the pending firing if it is due at `now_ms`, returning its scheduled time.
    pub fn take_due(&mut self, now_ms: f64) -> Option<f64> {
        match self.next_due {
            Some(at) if at <= now_ms => {
                self.next_due = None;
                self.fired += 1;
                Some(at)
            }
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.next_due = None;
    }

    pub fn next_due(&self) -> Option<f64> {
        self.next_due
    }

    pub fn is_pending(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn fired(&self) -> u64 {
        self.fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;

    #[test]
    fn range_sampling_hits_bounds() {
        let range = MsRange::new(3000.0, 6000.0);
        assert_eq!(range.sample(&mut ScriptedRandom::constant(0.0)), 3000.0);
        let upper = range.sample(&mut ScriptedRandom::constant(0.999));
        assert!(range.contains(upper));
        assert!(!range.contains(6000.0));
    }

    #[test]
    fn task_fires_once_per_arm() {
        let mut task = RepeatingTask::new();
        task.arm_at(100.0);
        assert_eq!(task.take_due(99.0), None);
        assert_eq!(task.take_due(150.0), Some(100.0));
        assert_eq!(task.take_due(200.0), None);
        assert_eq!(task.fired(), 1);
    }

    #[test]
    fn cancelled_task_ignores_rearm() {
        let mut task = RepeatingTask::new();
        task.arm_at(10.0);
        task.cancel();
        task.arm_at(20.0);
        assert!(!task.is_pending());
        assert_eq!(task.take_due(1_000.0), None);
        assert!(task.is_cancelled());
    }
}
