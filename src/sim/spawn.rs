//! Spawn rules: when and where new entities appear
//!
//! All draws come from the session's seeded RNG so runs replay exactly.

use glam::IVec2;
use rand::Rng;
use rand_pcg::Pcg32;

/// Floor on the meteor spawn interval, in ticks
pub const MIN_SPAWN_INTERVAL: u64 = 5;

/// True on every `every`-th tick (1-based tick numbers)
#[inline]
pub fn on_interval(tick: u64, every: u64) -> bool {
    every > 0 && tick > 0 && tick.is_multiple_of(every)
}

/// Uniform draw in `[lo, hi)`; degenerate ranges collapse to `lo`
pub fn uniform(rng: &mut Pcg32, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

/// Random coordinate along an axis of length `extent`, keeping `margin` clear of both ends
pub fn place_across(rng: &mut Pcg32, extent: f32, margin: f32) -> f32 {
    uniform(rng, margin, extent - margin)
}

/// Whether the screen-space gap behind the last obstacle allows another one
///
/// `last_left` is the left edge of the most recently spawned obstacle; with
/// no obstacle on screen the gap is measured from the left edge (x = 0).
pub fn gap_clear(last_left: Option<f32>, arena_width: f32, min_gap: f32) -> bool {
    arena_width - last_left.unwrap_or(0.0) > min_gap
}

/// Runner obstacle roll: an empty track always spawns, otherwise the gap must
/// be clear and a `chance` roll must succeed
pub fn runner_should_spawn(
    rng: &mut Pcg32,
    last_left: Option<f32>,
    arena_width: f32,
    min_gap: f32,
    chance: f64,
) -> bool {
    if !gap_clear(last_left, arena_width, min_gap) {
        return false;
    }
    last_left.is_none() || rng.random_bool(chance)
}

/// Ticks between meteor spawns: `max(5, base / factor)`, truncated
pub fn spawn_interval(base_interval: f32, difficulty_factor: f32) -> u64 {
    ((base_interval / difficulty_factor) as u64).max(MIN_SPAWN_INTERVAL)
}

/// Uniformly random grid cell not rejected by `occupied`
///
/// Rejection sampling; returns `None` when the grid is already full.
pub fn random_empty_cell(
    rng: &mut Pcg32,
    cols: i32,
    rows: i32,
    taken: usize,
    occupied: impl Fn(IVec2) -> bool,
) -> Option<IVec2> {
    if taken >= (cols * rows) as usize {
        return None;
    }
    loop {
        let cell = IVec2::new(rng.random_range(0..cols), rng.random_range(0..rows));
        if !occupied(cell) {
            return Some(cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_on_interval() {
        assert!(!on_interval(0, 60));
        assert!(!on_interval(59, 60));
        assert!(on_interval(60, 60));
        assert!(on_interval(120, 60));
        assert!(!on_interval(60, 0));
    }

    #[test]
    fn test_spawn_interval_floor() {
        assert_eq!(spawn_interval(30.0, 1.0), 30);
        assert_eq!(spawn_interval(30.0, 1.1), 27);
        assert_eq!(spawn_interval(30.0, 2.0), 15);
        assert_eq!(spawn_interval(30.0, 10.0), 5);
        assert_eq!(spawn_interval(30.0, 100.0), 5);
    }

    #[test]
    fn test_gap_rule() {
        assert!(gap_clear(None, 1080.0, 500.0));
        assert!(!gap_clear(Some(700.0), 1080.0, 500.0));
        assert!(gap_clear(Some(500.0), 1080.0, 500.0));
        // Narrow screens never fit the first obstacle
        assert!(!gap_clear(None, 400.0, 500.0));
    }

    #[test]
    fn test_runner_spawns_immediately_on_empty_track() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(runner_should_spawn(&mut rng, None, 1080.0, 500.0, 0.0));
        assert!(!runner_should_spawn(&mut rng, Some(1000.0), 1080.0, 500.0, 1.0));
        assert!(runner_should_spawn(&mut rng, Some(100.0), 1080.0, 500.0, 1.0));
        assert!(!runner_should_spawn(&mut rng, Some(100.0), 1080.0, 500.0, 0.0));
    }

    #[test]
    fn test_place_across_respects_margin() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            let x = place_across(&mut rng, 1080.0, 60.0);
            assert!((60.0..1020.0).contains(&x));
        }
        assert_eq!(place_across(&mut rng, 100.0, 60.0), 60.0);
    }

    #[test]
    fn test_random_empty_cell() {
        let mut rng = Pcg32::seed_from_u64(3);
        // Only (2, 1) is free on a 3x2 grid
        let free = IVec2::new(2, 1);
        let cell = random_empty_cell(&mut rng, 3, 2, 5, |c| c != free);
        assert_eq!(cell, Some(free));

        assert_eq!(random_empty_cell(&mut rng, 3, 2, 6, |_| true), None);
    }
}
