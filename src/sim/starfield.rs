//! Cosmetic parallax stars (no collisions, no effect on gameplay)
//!
//! Stars draw from their own RNG stream so toggling the starfield never
//! changes where meteors or enemies appear.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::game::Arena;
use super::spawn::uniform;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Star {
    pub pos: Vec2,
    /// Fall speed in px/tick
    pub speed: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Starfield {
    pub stars: Vec<Star>,
    arena: Arena,
    #[serde(skip)]
    rng: Pcg32,
}

impl Starfield {
    pub fn new(count: usize, speed: (f32, f32), arena: Arena, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..count)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random::<f32>() * arena.width,
                    rng.random::<f32>() * arena.height,
                ),
                speed: uniform(&mut rng, speed.0, speed.1),
            })
            .collect();
        Self { stars, arena, rng }
    }

    /// An empty field (starfield disabled in settings)
    pub fn disabled(arena: Arena) -> Self {
        Self {
            stars: Vec::new(),
            arena,
            rng: Pcg32::seed_from_u64(0),
        }
    }

    /// Scroll every star down by `speed * scale`, wrapping to the top at a new x
    pub fn advance(&mut self, scale: f32) {
        for star in &mut self.stars {
            star.pos.y += star.speed * scale;
            if star.pos.y > self.arena.height {
                star.pos.y = 0.0;
                star.pos.x = self.rng.random::<f32>() * self.arena.width;
            }
        }
    }
}
