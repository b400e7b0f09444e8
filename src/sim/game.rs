//! The per-variant capability set plugged into [`Session`](super::Session)
//!
//! A session owns the state machine, counters, RNG and event queue; a game
//! only supplies its entity model plus the spawn/move/bounce rules, split
//! into the phases the session drives in a fixed order every tick.

use glam::IVec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyRamp;
use super::session::{Scoreboard, TickContext};
use crate::settings::Settings;

/// Which mini-game a session runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Variant {
    PaddleBall,
    BrickBreaker,
    Runner,
    Dodger,
    Shooter,
    Snake,
}

impl Variant {
    pub const ALL: [Variant; 6] = [
        Variant::PaddleBall,
        Variant::BrickBreaker,
        Variant::Runner,
        Variant::Dodger,
        Variant::Shooter,
        Variant::Snake,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::PaddleBall => "paddle-ball",
            Variant::BrickBreaker => "brick-breaker",
            Variant::Runner => "runner",
            Variant::Dodger => "dodger",
            Variant::Shooter => "shooter",
            Variant::Snake => "snake",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "paddle-ball" | "paddleball" | "pong" => Some(Variant::PaddleBall),
            "brick-breaker" | "brickbreaker" | "bricks" => Some(Variant::BrickBreaker),
            "runner" | "dino" => Some(Variant::Runner),
            "dodger" | "meteor" => Some(Variant::Dodger),
            "shooter" | "space" => Some(Variant::Shooter),
            "snake" => Some(Variant::Snake),
            _ => None,
        }
    }

    /// Name shown in the games list
    pub fn title(&self) -> &'static str {
        match self {
            Variant::PaddleBall => "Pixel Pong",
            Variant::BrickBreaker => "Retro Bricks",
            Variant::Runner => "Dino Run",
            Variant::Dodger => "Meteor Dodge",
            Variant::Shooter => "Space Defender",
            Variant::Snake => "Classic Snake",
        }
    }

    /// Coins needed to unlock the game in the catalog (0 = free)
    pub fn unlock_cost(&self) -> u32 {
        match self {
            Variant::PaddleBall => 50,
            Variant::BrickBreaker => 50,
            Variant::Shooter => 75,
            Variant::Dodger => 100,
            Variant::Runner => 150,
            Variant::Snake => 0,
        }
    }
}

/// Play area in pixels, origin top-left
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: crate::consts::DEFAULT_ARENA_WIDTH,
            height: crate::consts::DEFAULT_ARENA_HEIGHT,
        }
    }
}

/// Grid heading (snake)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit step in grid cells (y grows downward)
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }
}

/// Host command sampled between ticks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    /// Pointer x-coordinate (paddles and ships follow it)
    PointerX(f32),
    /// Discrete direction (snake)
    Steer(Direction),
    /// Jump trigger (runner)
    Jump,
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// One game variant's entity model and rules
///
/// Per tick the session calls, in order: `advance_cosmetics`, (difficulty
/// ramp), `spawn`, `integrate`, `resolve_collisions`, `purge`, then
/// `check_terminal`. Entities deactivated during a tick must be gone after
/// `purge`.
pub trait Game: Sized {
    const VARIANT: Variant;

    /// Lives at the start of a new game (`None` = the first fatal hit ends the run)
    const STARTING_LIVES: Option<u32> = None;

    /// Build the idle game. May draw from `rng` for persistent cosmetics.
    fn new(settings: &Settings, rng: &mut Pcg32) -> Self;

    /// Progression installed (and reset) on every `start()`
    fn difficulty_ramp() -> DifficultyRamp {
        DifficultyRamp::flat()
    }

    /// Whether `start()` should continue the current round (keeping score
    /// and lives) rather than begin a new one
    fn resumes_round(&self, _board: &Scoreboard) -> bool {
        false
    }

    /// Reset every entity for a brand new game
    fn new_round(&mut self, rng: &mut Pcg32);

    /// Re-serve after `resumes_round` said yes
    fn continue_round(&mut self, rng: &mut Pcg32) {
        self.new_round(rng);
    }

    /// Apply a host command. Commands a variant has no use for are ignored.
    fn handle_input(&mut self, input: Input);

    /// Phase 1: parallax and other non-gameplay motion
    fn advance_cosmetics(&mut self, _ctx: &mut TickContext<'_>) {}

    /// Phase 3: create new obstacles/enemies/projectiles
    fn spawn(&mut self, _ctx: &mut TickContext<'_>) {}

    /// Phase 4: move entities by their velocities
    fn integrate(&mut self, ctx: &mut TickContext<'_>);

    /// Phase 5: bounces, hits, scoring, life loss
    fn resolve_collisions(&mut self, ctx: &mut TickContext<'_>);

    /// Phase 6: drop entities deactivated this tick
    fn purge(&mut self) {}

    /// Game-specific end condition (life depletion is handled by the session)
    fn check_terminal(&self, board: &Scoreboard) -> Option<Outcome>;

    /// Built-in demo/idle player: the input a simple bot would send now
    fn demo_input(&self) -> Option<Input> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_string_roundtrip() {
        for variant in Variant::ALL {
            assert_eq!(Variant::from_str(variant.as_str()), Some(variant));
        }
        assert_eq!(Variant::from_str("PONG"), Some(Variant::PaddleBall));
        assert_eq!(Variant::from_str("tetris"), None);
    }

    #[test]
    fn test_unlock_costs() {
        assert_eq!(Variant::Snake.unlock_cost(), 0);
        assert_eq!(Variant::Runner.unlock_cost(), 150);
        assert!(Variant::ALL.iter().all(|v| v.unlock_cost() <= 150));
    }

    #[test]
    fn test_direction_opposites() {
        for dir in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_eq!(dir.delta() + dir.opposite().delta(), IVec2::ZERO);
        }
    }
}
