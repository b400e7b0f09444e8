//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One `tick()` per host callback, fixed order of phases
//! - Seeded RNG only (one stream per session)
//! - Stable iteration order (entities kept in spawn order)
//! - No rendering, audio or storage dependencies

pub mod arcade;
pub mod difficulty;
pub mod events;
pub mod game;
pub mod geom;
pub mod reward;
pub mod session;
pub mod spawn;
pub mod starfield;

pub use arcade::ArcadeSession;
pub use difficulty::DifficultyRamp;
pub use events::{Cue, GameEvent};
pub use game::{Arena, Direction, Game, Input, Outcome, Variant};
pub use geom::{Rect, aabb_overlap, circles_overlap, paddle_spin};
pub use reward::coins_for;
pub use session::{Scoreboard, Session, SessionError, SessionState, Snapshot, TickContext};
pub use starfield::{Star, Starfield};
