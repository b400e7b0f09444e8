//! Wellness Arcade - simulation core for the app's six mini-games
//!
//! Core modules:
//! - `sim`: Deterministic session machinery (geometry, difficulty, spawning, scoring, state machine)
//! - `games`: The six game variants plugged into the shared session
//! - `settings`: Play-area and cadence configuration
//! - `highscores`: Per-game personal bests

pub mod games;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::{Settings, SettingsError};
pub use sim::{ArcadeSession, GameEvent, Input, Session, SessionError, SessionState, Variant};

/// Game configuration constants
pub mod consts {
    /// Nominal host callback period in milliseconds
    pub const TICK_MS: u32 = 16;
    /// Nominal ticks per second (the difficulty ramps assume this cadence)
    pub const TICKS_PER_SECOND: u64 = 60;

    /// Default play area, in pixels (portrait phone)
    pub const DEFAULT_ARENA_WIDTH: f32 = 1080.0;
    pub const DEFAULT_ARENA_HEIGHT: f32 = 1920.0;

    /// Snake advances one cell per this many milliseconds
    pub const SNAKE_STEP_MS: u32 = 180;
}
