//! Paddle-and-ball against an AI paddle (Pixel Pong)
//!
//! The player paddle sits near the bottom edge, the AI paddle near the top.
//! A ball leaving through the top scores for the player, through the bottom
//! for the AI. First to five ends the match.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::{Ball, clamp_x};
use crate::settings::Settings;
use crate::sim::{
    Arena, Cue, Game, Input, Outcome, Rect, Scoreboard, TickContext, Variant, aabb_overlap,
    paddle_spin,
};

pub const PADDLE_WIDTH: f32 = 200.0;
pub const PADDLE_HEIGHT: f32 = 40.0;
/// Distance between each paddle's outer edge zone and the screen edge
pub const PADDLE_INSET: f32 = 100.0;
pub const BALL_RADIUS: f32 = 25.0;
/// Serve speed per axis (px/tick)
pub const SERVE_SPEED: f32 = 15.0;
/// Vertical speed multiplier on every paddle hit
pub const BOUNCE_SPEEDUP: f32 = 1.05;
/// Horizontal speed added for an edge hit (scaled by normalized offset)
pub const SPIN_GAIN: f32 = 10.0;
pub const AI_SPEED: f32 = 12.0;
/// AI ignores the ball while it is within this many pixels of the paddle center
pub const AI_DEAD_BAND: f32 = 20.0;
pub const WINNING_SCORE: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaddleBall {
    pub arena: Arena,
    /// Center x of the player paddle
    pub player_x: f32,
    /// Center x of the AI paddle
    pub ai_x: f32,
    pub ball: Ball,
    pub player_score: u32,
    pub ai_score: u32,
}

impl PaddleBall {
    pub fn player_paddle(&self) -> Rect {
        Rect::from_origin(
            self.player_x - PADDLE_WIDTH / 2.0,
            self.arena.height - PADDLE_INSET,
            PADDLE_WIDTH,
            PADDLE_HEIGHT,
        )
    }

    pub fn ai_paddle(&self) -> Rect {
        Rect::from_origin(
            self.ai_x - PADDLE_WIDTH / 2.0,
            PADDLE_INSET,
            PADDLE_WIDTH,
            PADDLE_HEIGHT,
        )
    }

    fn clamp_paddle(&self, x: f32) -> f32 {
        clamp_x(x, PADDLE_WIDTH / 2.0, self.arena.width - PADDLE_WIDTH / 2.0)
    }

    /// Ball to center, random diagonal
    fn serve(&mut self, rng: &mut Pcg32) {
        let sx = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let sy = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.ball.pos = Vec2::new(self.arena.width / 2.0, self.arena.height / 2.0);
        self.ball.vel = Vec2::new(sx * SERVE_SPEED, sy * SERVE_SPEED);
    }

    fn track_ball(&mut self) {
        let dx = self.ball.pos.x - self.ai_x;
        if dx > AI_DEAD_BAND {
            self.ai_x += AI_SPEED;
        } else if dx < -AI_DEAD_BAND {
            self.ai_x -= AI_SPEED;
        }
        self.ai_x = self.clamp_paddle(self.ai_x);
    }
}

impl Game for PaddleBall {
    const VARIANT: Variant = Variant::PaddleBall;

    fn new(settings: &Settings, _rng: &mut Pcg32) -> Self {
        let arena = settings.arena;
        let mut ball = Ball::new(BALL_RADIUS);
        ball.pos = Vec2::new(arena.width / 2.0, arena.height / 2.0);
        Self {
            arena,
            player_x: arena.width / 2.0,
            ai_x: arena.width / 2.0,
            ball,
            player_score: 0,
            ai_score: 0,
        }
    }

    fn new_round(&mut self, rng: &mut Pcg32) {
        self.player_score = 0;
        self.ai_score = 0;
        self.player_x = self.arena.width / 2.0;
        self.ai_x = self.arena.width / 2.0;
        self.serve(rng);
    }

    fn handle_input(&mut self, input: Input) {
        if let Input::PointerX(x) = input {
            self.player_x = self.clamp_paddle(x);
        }
    }

    fn integrate(&mut self, _ctx: &mut TickContext<'_>) {
        self.ball.step();
        self.track_ball();
    }

    fn resolve_collisions(&mut self, ctx: &mut TickContext<'_>) {
        if self.ball.bounce_off_walls(&self.arena, false) {
            ctx.cue(Cue::WallBounce);
        }

        let bounds = self.ball.bounds();
        if self.ball.vel.y > 0.0 && aabb_overlap(&bounds, &self.player_paddle()) {
            self.ball.vel.y = -(self.ball.vel.y * BOUNCE_SPEEDUP).abs();
            self.ball.vel.x +=
                paddle_spin(self.ball.pos.x, self.player_x, PADDLE_WIDTH / 2.0) * SPIN_GAIN;
            ctx.cue(Cue::PaddleHit);
        } else if self.ball.vel.y < 0.0 && aabb_overlap(&bounds, &self.ai_paddle()) {
            self.ball.vel.y = (self.ball.vel.y * BOUNCE_SPEEDUP).abs();
            ctx.cue(Cue::PaddleHit);
        }

        if self.ball.pos.y > self.arena.height {
            self.ai_score += 1;
            ctx.cue(Cue::PointLost);
            self.serve(ctx.rng);
        } else if self.ball.pos.y < 0.0 {
            self.player_score += 1;
            ctx.award(1);
            ctx.cue(Cue::PointScored);
            self.serve(ctx.rng);
        }
    }

    fn check_terminal(&self, _board: &Scoreboard) -> Option<Outcome> {
        if self.player_score >= WINNING_SCORE {
            Some(Outcome::Won)
        } else if self.ai_score >= WINNING_SCORE {
            Some(Outcome::Lost)
        } else {
            None
        }
    }

    fn demo_input(&self) -> Option<Input> {
        Some(Input::PointerX(self.ball.pos.x))
    }
}
