//! Time-based difficulty progression
//!
//! Every game ramps the same way: after a fixed number of ticks since
//! `start()`, a raw level is bumped by a fixed step. Games read either the
//! raw level (e.g. the runner's obstacle speed in px/tick) or the factor
//! `level / base`, which starts at 1.0 and never decreases.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyRamp {
    base: f32,
    step: f32,
    every_ticks: u64,
    level: f32,
}

impl DifficultyRamp {
    /// `base` must be positive and `step` non-negative
    pub fn new(base: f32, step: f32, every_ticks: u64) -> Self {
        debug_assert!(base > 0.0 && step >= 0.0);
        Self {
            base,
            step,
            every_ticks,
            level: base,
        }
    }

    /// A ramp that never moves (factor stays 1.0)
    pub fn flat() -> Self {
        Self::new(1.0, 0.0, 0)
    }

    pub fn reset(&mut self) {
        self.level = self.base;
    }

    /// Advance for the given 1-based tick number. Returns true if the level stepped.
    pub fn advance(&mut self, tick: u64) -> bool {
        if self.every_ticks == 0 || self.step == 0.0 || tick == 0 {
            return false;
        }
        if tick.is_multiple_of(self.every_ticks) {
            self.level += self.step;
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn level(&self) -> f32 {
        self.level
    }

    #[inline]
    pub fn factor(&self) -> f32 {
        self.level / self.base
    }
}

impl Default for DifficultyRamp {
    fn default() -> Self {
        Self::flat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_on_interval_only() {
        let mut ramp = DifficultyRamp::new(1.0, 0.1, 600);
        for tick in 1..600 {
            assert!(!ramp.advance(tick));
        }
        assert_eq!(ramp.factor(), 1.0);
        assert!(ramp.advance(600));
        assert!((ramp.factor() - 1.1).abs() < 1e-6);
        assert!(!ramp.advance(601));
        assert!(ramp.advance(1200));
        assert!((ramp.factor() - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_raw_level_ramp() {
        // Runner style: raw speed 15 px/tick, +1 every 600 ticks
        let mut ramp = DifficultyRamp::new(15.0, 1.0, 600);
        ramp.advance(600);
        ramp.advance(1200);
        assert_eq!(ramp.level(), 17.0);
        assert!(ramp.factor() > 1.0);

        ramp.reset();
        assert_eq!(ramp.level(), 15.0);
        assert_eq!(ramp.factor(), 1.0);
    }

    #[test]
    fn test_flat_never_moves() {
        let mut ramp = DifficultyRamp::flat();
        for tick in 0..5000 {
            assert!(!ramp.advance(tick));
        }
        assert_eq!(ramp.factor(), 1.0);
    }

    #[test]
    fn test_factor_is_non_decreasing() {
        let mut ramp = DifficultyRamp::new(1.0, 0.1, 7);
        let mut last = ramp.factor();
        for tick in 1..1000 {
            ramp.advance(tick);
            assert!(ramp.factor() >= last);
            last = ramp.factor();
        }
    }
}
