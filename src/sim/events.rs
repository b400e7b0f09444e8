//! Notifications from a session to its host
//!
//! The session queues these during `start`/`pause`/`resume`/`tick`; the host
//! drains them after each call to drive currency writes, HUD updates and
//! feedback cues.

use serde::{Deserialize, Serialize};

use super::session::SessionState;

/// Feedback cue kinds (the host maps these to sounds/haptics/flashes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    /// Ball hits a paddle
    PaddleHit,
    /// Ball bounces off a side or top wall
    WallBounce,
    /// Brick destroyed
    BrickBroken,
    /// Player scored a point against the AI
    PointScored,
    /// Player lost the ball (AI point or ball past the paddle)
    PointLost,
    /// Runner left the ground
    Jump,
    /// Meteor left the bottom of the screen
    MeteorDodged,
    /// Bullet destroyed an enemy
    EnemyDestroyed,
    /// Enemy rammed the ship
    ShipHit,
    /// Snake ate the food
    AppleEaten,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Session moved to a new state; exactly one per entry into GameOver/Won
    StateChanged(SessionState),
    ScoreChanged { score: u32 },
    LifeLost { lives: u32 },
    /// End-of-round currency award; at most once per terminal transition
    RewardEarned { coins: u32 },
    Cue(Cue),
}
