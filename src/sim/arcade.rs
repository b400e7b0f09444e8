//! Runtime-selected session
//!
//! Hosts that pick the game from a menu hold an [`ArcadeSession`]; every
//! call is forwarded to the typed [`Session`] inside.

use super::events::GameEvent;
use super::game::{Input, Outcome, Variant};
use super::session::{Session, SessionError, SessionState};
use crate::games::{BrickBreaker, Dodger, PaddleBall, Runner, Shooter, Snake};
use crate::highscores::HighScores;
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub enum ArcadeSession {
    PaddleBall(Session<PaddleBall>),
    BrickBreaker(Session<BrickBreaker>),
    Runner(Session<Runner>),
    Dodger(Session<Dodger>),
    Shooter(Session<Shooter>),
    Snake(Session<Snake>),
}

macro_rules! delegate {
    ($self:expr, $s:ident => $body:expr) => {
        match $self {
            ArcadeSession::PaddleBall($s) => $body,
            ArcadeSession::BrickBreaker($s) => $body,
            ArcadeSession::Runner($s) => $body,
            ArcadeSession::Dodger($s) => $body,
            ArcadeSession::Shooter($s) => $body,
            ArcadeSession::Snake($s) => $body,
        }
    };
}

impl ArcadeSession {
    pub fn new(variant: Variant, settings: &Settings, seed: u64) -> Self {
        match variant {
            Variant::PaddleBall => Self::PaddleBall(Session::new(settings, seed)),
            Variant::BrickBreaker => Self::BrickBreaker(Session::new(settings, seed)),
            Variant::Runner => Self::Runner(Session::new(settings, seed)),
            Variant::Dodger => Self::Dodger(Session::new(settings, seed)),
            Variant::Shooter => Self::Shooter(Session::new(settings, seed)),
            Variant::Snake => Self::Snake(Session::new(settings, seed)),
        }
    }

    pub fn variant(&self) -> Variant {
        delegate!(self, s => s.variant())
    }

    pub fn start(&mut self) -> Result<(), SessionError> {
        delegate!(self, s => s.start())
    }

    pub fn pause(&mut self) -> Result<(), SessionError> {
        delegate!(self, s => s.pause())
    }

    pub fn resume(&mut self) -> Result<(), SessionError> {
        delegate!(self, s => s.resume())
    }

    pub fn tick(&mut self) -> Result<(), SessionError> {
        delegate!(self, s => s.tick())
    }

    pub fn apply(&mut self, input: Input) {
        delegate!(self, s => s.apply(input))
    }

    pub fn state(&self) -> SessionState {
        delegate!(self, s => s.state())
    }

    pub fn score(&self) -> u32 {
        delegate!(self, s => s.score())
    }

    pub fn lives(&self) -> Option<u32> {
        delegate!(self, s => s.lives())
    }

    pub fn frame_count(&self) -> u64 {
        delegate!(self, s => s.frame_count())
    }

    pub fn difficulty_factor(&self) -> f32 {
        delegate!(self, s => s.difficulty_factor())
    }

    pub fn outcome(&self) -> Option<Outcome> {
        delegate!(self, s => s.outcome())
    }

    pub fn reward(&self) -> Option<u32> {
        delegate!(self, s => s.reward())
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        delegate!(self, s => s.drain_events().collect())
    }

    pub fn demo_input(&self) -> Option<Input> {
        delegate!(self, s => s.demo_input())
    }

    /// Add a finished run to `scores`; returns the rank it took
    pub fn record(&self, scores: &mut HighScores) -> Option<usize> {
        delegate!(self, s => scores.record(s))
    }

    /// Current snapshot as a JSON value
    pub fn snapshot_json(&self) -> serde_json::Result<serde_json::Value> {
        delegate!(self, s => serde_json::to_value(s.snapshot()))
    }
}
