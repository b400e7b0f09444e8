//! Side-scrolling runner (Dino Run)
//!
//! Obstacles flow right to left along the ground; the actor jumps over them.
//! One touch ends the run. Score ticks up with distance.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::settings::Settings;
use crate::sim::spawn::{on_interval, runner_should_spawn, uniform};
use crate::sim::{
    Arena, Cue, DifficultyRamp, Game, Input, Outcome, Rect, Scoreboard, TickContext, Variant,
    aabb_overlap,
};

/// Ground line, measured up from the bottom edge
pub const GROUND_LIFT: f32 = 200.0;
pub const ACTOR_X: f32 = 150.0;
pub const ACTOR_SIZE: f32 = 80.0;
pub const GRAVITY: f32 = 2.0;
pub const JUMP_IMPULSE: f32 = -40.0;

pub const OBSTACLE_WIDTH: f32 = 40.0;
pub const OBSTACLE_MIN_HEIGHT: f32 = 40.0;
pub const OBSTACLE_MAX_HEIGHT: f32 = 100.0;
/// Free track required behind the last obstacle before another may spawn
pub const MIN_GAP: f32 = 500.0;
pub const SPAWN_CHANCE: f64 = 0.02;

pub const BASE_SPEED: f32 = 15.0;
/// +1 px/tick every 600 ticks
pub const SPEED_STEP: f32 = 1.0;
pub const SPEED_EVERY: u64 = 600;
/// One point per this many ticks survived
pub const SCORE_EVERY: u64 = 10;
/// Autopilot takes off this many ticks before reaching an obstacle
pub const JUMP_LEAD_TICKS: f32 = 28.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Actor {
    /// Top-left corner
    pub pos: Vec2,
    pub vy: f32,
    pub jumping: bool,
}

impl Actor {
    pub fn rect(&self) -> Rect {
        Rect::from_origin(self.pos.x, self.pos.y, ACTOR_SIZE, ACTOR_SIZE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Obstacle {
    pub rect: Rect,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Runner {
    pub arena: Arena,
    pub actor: Actor,
    pub obstacles: Vec<Obstacle>,
    /// Current scroll speed in px/tick
    pub speed: f32,
    pub crashed: bool,
    #[serde(skip)]
    jump_requested: bool,
}

impl Runner {
    pub fn ground_y(&self) -> f32 {
        self.arena.height - GROUND_LIFT
    }

    fn standing(arena: &Arena) -> Actor {
        Actor {
            pos: Vec2::new(ACTOR_X, arena.height - GROUND_LIFT - ACTOR_SIZE),
            vy: 0.0,
            jumping: false,
        }
    }

    /// Horizontal distance from the actor to the next obstacle still ahead
    fn next_gap(&self) -> Option<f32> {
        let front = self.actor.pos.x + ACTOR_SIZE;
        self.obstacles
            .iter()
            .filter(|o| o.active && o.rect.right > self.actor.pos.x)
            .map(|o| o.rect.left - front)
            .reduce(f32::min)
    }
}

impl Game for Runner {
    const VARIANT: Variant = Variant::Runner;

    fn new(settings: &Settings, _rng: &mut Pcg32) -> Self {
        let arena = settings.arena;
        Self {
            arena,
            actor: Self::standing(&arena),
            obstacles: Vec::new(),
            speed: BASE_SPEED,
            crashed: false,
            jump_requested: false,
        }
    }

    fn difficulty_ramp() -> DifficultyRamp {
        DifficultyRamp::new(BASE_SPEED, SPEED_STEP, SPEED_EVERY)
    }

    fn new_round(&mut self, _rng: &mut Pcg32) {
        self.actor = Self::standing(&self.arena);
        self.obstacles.clear();
        self.speed = BASE_SPEED;
        self.crashed = false;
        self.jump_requested = false;
    }

    fn handle_input(&mut self, input: Input) {
        if input == Input::Jump {
            self.jump_requested = true;
        }
    }

    fn spawn(&mut self, ctx: &mut TickContext<'_>) {
        let last_left = self.obstacles.last().map(|o| o.rect.left);
        if runner_should_spawn(ctx.rng, last_left, self.arena.width, MIN_GAP, SPAWN_CHANCE) {
            let height = uniform(ctx.rng, OBSTACLE_MIN_HEIGHT, OBSTACLE_MAX_HEIGHT);
            let ground = self.ground_y();
            self.obstacles.push(Obstacle {
                rect: Rect::new(
                    self.arena.width,
                    ground - height,
                    self.arena.width + OBSTACLE_WIDTH,
                    ground,
                ),
                active: true,
            });
        }
    }

    fn integrate(&mut self, ctx: &mut TickContext<'_>) {
        if std::mem::take(&mut self.jump_requested) && !self.actor.jumping {
            self.actor.vy = JUMP_IMPULSE;
            self.actor.jumping = true;
            ctx.cue(Cue::Jump);
        }

        let rest = self.ground_y() - ACTOR_SIZE;
        self.actor.pos.y += self.actor.vy;
        self.actor.vy += GRAVITY;
        if self.actor.pos.y >= rest {
            self.actor.pos.y = rest;
            self.actor.vy = 0.0;
            self.actor.jumping = false;
        }

        self.speed = BASE_SPEED * ctx.difficulty;
        let shift = Vec2::new(-self.speed, 0.0);
        for obstacle in &mut self.obstacles {
            obstacle.rect.offset(shift);
        }

        if on_interval(ctx.tick, SCORE_EVERY) {
            ctx.award(1);
        }
    }

    fn resolve_collisions(&mut self, _ctx: &mut TickContext<'_>) {
        let actor = self.actor.rect();
        for obstacle in self.obstacles.iter_mut().filter(|o| o.active) {
            if obstacle.rect.right < 0.0 {
                obstacle.active = false;
            } else if aabb_overlap(&actor, &obstacle.rect) {
                self.crashed = true;
            }
        }
    }

    fn purge(&mut self) {
        self.obstacles.retain(|o| o.active);
    }

    fn check_terminal(&self, _board: &Scoreboard) -> Option<Outcome> {
        self.crashed.then_some(Outcome::Lost)
    }

    fn demo_input(&self) -> Option<Input> {
        let gap = self.next_gap()?;
        let window = self.speed * JUMP_LEAD_TICKS;
        (!self.actor.jumping && (0.0..=window).contains(&gap)).then_some(Input::Jump)
    }
}
