//! Brick breaker (Retro Bricks)
//!
//! A fixed grid laid out once per new game. Restarting from a pause keeps the
//! remaining bricks, score and lives and only relaunches the ball.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::{Ball, clamp_x};
use crate::settings::Settings;
use crate::sim::spawn::uniform;
use crate::sim::{
    Arena, Cue, Game, Input, Outcome, Rect, Scoreboard, TickContext, Variant, aabb_overlap,
    paddle_spin,
};

pub const COLUMNS: usize = 7;
pub const ROWS: usize = 5;
pub const BRICK_PADDING: f32 = 10.0;
pub const BRICK_HEIGHT: f32 = 60.0;
/// Top of the first brick row
pub const GRID_TOP: f32 = 150.0;
pub const BRICK_POINTS: u32 = 10;

pub const PADDLE_WIDTH: f32 = 200.0;
pub const PADDLE_HEIGHT: f32 = 40.0;
/// Distance from the bottom edge to the paddle's top
pub const PADDLE_LIFT: f32 = 150.0;

pub const BALL_RADIUS: f32 = 20.0;
pub const LAUNCH_SPEED: f32 = 15.0;
/// Launch vx is drawn from `[-LAUNCH_DRIFT, LAUNCH_DRIFT)`
pub const LAUNCH_DRIFT: f32 = 5.0;
pub const SPIN_GAIN: f32 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BrickColor {
    Red,
    Orange,
    Green,
    Blue,
    Purple,
}

impl BrickColor {
    pub fn for_row(row: usize) -> Self {
        match row % 5 {
            0 => BrickColor::Red,
            1 => BrickColor::Orange,
            2 => BrickColor::Green,
            3 => BrickColor::Blue,
            _ => BrickColor::Purple,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Brick {
    pub rect: Rect,
    pub color: BrickColor,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrickBreaker {
    pub arena: Arena,
    /// Center x of the paddle
    pub paddle_x: f32,
    pub ball: Ball,
    pub bricks: Vec<Brick>,
}

impl BrickBreaker {
    pub fn paddle(&self) -> Rect {
        Rect::from_origin(
            self.paddle_x - PADDLE_WIDTH / 2.0,
            self.arena.height - PADDLE_LIFT,
            PADDLE_WIDTH,
            PADDLE_HEIGHT,
        )
    }

    fn layout(arena: &Arena) -> Vec<Brick> {
        let width = (arena.width - BRICK_PADDING * (COLUMNS as f32 + 1.0)) / COLUMNS as f32;
        let mut bricks = Vec::with_capacity(COLUMNS * ROWS);
        for row in 0..ROWS {
            for col in 0..COLUMNS {
                bricks.push(Brick {
                    rect: Rect::from_origin(
                        BRICK_PADDING + col as f32 * (width + BRICK_PADDING),
                        GRID_TOP + row as f32 * (BRICK_HEIGHT + BRICK_PADDING),
                        width,
                        BRICK_HEIGHT,
                    ),
                    color: BrickColor::for_row(row),
                    active: true,
                });
            }
        }
        bricks
    }

    /// Put the ball just above the paddle, heading up
    fn launch(&mut self, rng: &mut Pcg32) {
        self.ball.pos = Vec2::new(
            self.paddle_x,
            self.arena.height - PADDLE_LIFT - BALL_RADIUS,
        );
        self.ball.vel = Vec2::new(uniform(rng, -LAUNCH_DRIFT, LAUNCH_DRIFT), -LAUNCH_SPEED);
    }
}

impl Game for BrickBreaker {
    const VARIANT: Variant = Variant::BrickBreaker;
    const STARTING_LIVES: Option<u32> = Some(3);

    fn new(settings: &Settings, _rng: &mut Pcg32) -> Self {
        let arena = settings.arena;
        Self {
            arena,
            paddle_x: arena.width / 2.0,
            ball: Ball::new(BALL_RADIUS),
            bricks: Self::layout(&arena),
        }
    }

    fn resumes_round(&self, board: &Scoreboard) -> bool {
        board.lives.unwrap_or(0) > 0 && !self.bricks.is_empty()
    }

    fn new_round(&mut self, rng: &mut Pcg32) {
        self.bricks = Self::layout(&self.arena);
        self.paddle_x = self.arena.width / 2.0;
        self.launch(rng);
    }

    fn continue_round(&mut self, rng: &mut Pcg32) {
        self.launch(rng);
    }

    fn handle_input(&mut self, input: Input) {
        if let Input::PointerX(x) = input {
            self.paddle_x = clamp_x(
                x,
                PADDLE_WIDTH / 2.0,
                self.arena.width - PADDLE_WIDTH / 2.0,
            );
        }
    }

    fn integrate(&mut self, _ctx: &mut TickContext<'_>) {
        self.ball.step();
    }

    fn resolve_collisions(&mut self, ctx: &mut TickContext<'_>) {
        if self.ball.bounce_off_walls(&self.arena, true) {
            ctx.cue(Cue::WallBounce);
        }

        let bounds = self.ball.bounds();
        if self.ball.vel.y > 0.0 && aabb_overlap(&bounds, &self.paddle()) {
            let spin = paddle_spin(self.ball.pos.x, self.paddle_x, PADDLE_WIDTH / 2.0);
            self.ball.vel.x = spin * SPIN_GAIN + self.ball.vel.x * 0.5;
            self.ball.vel.y = -self.ball.vel.y.abs();
            ctx.cue(Cue::PaddleHit);
        }

        // At most one brick per tick
        if let Some(brick) = self
            .bricks
            .iter_mut()
            .find(|b| b.active && aabb_overlap(&bounds, &b.rect))
        {
            brick.active = false;
            self.ball.vel.y = -self.ball.vel.y;
            ctx.award(BRICK_POINTS);
            ctx.cue(Cue::BrickBroken);
        }

        if self.ball.pos.y - self.ball.radius > self.arena.height {
            ctx.lose_life();
            ctx.cue(Cue::PointLost);
            if ctx.lives().unwrap_or(0) > 0 {
                self.launch(ctx.rng);
            }
        }
    }

    fn purge(&mut self) {
        self.bricks.retain(|b| b.active);
    }

    fn check_terminal(&self, _board: &Scoreboard) -> Option<Outcome> {
        self.bricks.is_empty().then_some(Outcome::Won)
    }

    fn demo_input(&self) -> Option<Input> {
        Some(Input::PointerX(self.ball.pos.x))
    }
}
