//! Top-down shooter (Space Defender)
//!
//! The ship fires on its own; the player only steers. Enemies descend in
//! waves and cost a life when they ram the ship.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::clamp_x;
use crate::settings::Settings;
use crate::sim::spawn::{on_interval, place_across, uniform};
use crate::sim::{
    Arena, Cue, Game, Input, Outcome, Rect, Scoreboard, Starfield, TickContext, Variant,
    aabb_overlap,
};

/// Ship center, measured up from the bottom edge
pub const SHIP_LIFT: f32 = 150.0;
pub const SHIP_SIZE: f32 = 80.0;
pub const SHIP_MARGIN: f32 = 40.0;

pub const ENEMY_SIZE: f32 = 60.0;
/// Top edge of a freshly spawned enemy
pub const ENEMY_SPAWN_Y: f32 = -50.0;
pub const ENEMY_EVERY: u64 = 60;
pub const ENEMY_MIN_SPEED: f32 = 5.0;
pub const ENEMY_MAX_SPEED: f32 = 10.0;
pub const ENEMY_POINTS: u32 = 10;

pub const BULLET_RADIUS: f32 = 8.0;
pub const BULLET_SPEED: f32 = 25.0;
pub const FIRE_EVERY: u64 = 20;
/// Muzzle offset above the ship center
pub const MUZZLE: f32 = 40.0;

pub const WINNING_SCORE: u32 = 500;

pub const STAR_COUNT: usize = 51;
pub const STAR_SPEED: (f32, f32) = (2.0, 7.0);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Enemy {
    pub rect: Rect,
    pub speed: f32,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub active: bool,
}

impl Bullet {
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::around_circle(self.pos, BULLET_RADIUS)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shooter {
    pub arena: Arena,
    pub ship_x: f32,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub stars: Starfield,
}

impl Shooter {
    pub fn ship_y(&self) -> f32 {
        self.arena.height - SHIP_LIFT
    }

    pub fn ship(&self) -> Rect {
        Rect::from_center(
            Vec2::new(self.ship_x, self.ship_y()),
            Vec2::splat(SHIP_SIZE),
        )
    }

    fn fire(&mut self) {
        self.bullets.push(Bullet {
            pos: Vec2::new(self.ship_x, self.ship_y() - MUZZLE),
            active: true,
        });
    }

    fn spawn_enemy(&mut self, rng: &mut Pcg32) {
        let x = place_across(rng, self.arena.width, ENEMY_SIZE / 2.0);
        let speed = uniform(rng, ENEMY_MIN_SPEED, ENEMY_MAX_SPEED);
        self.enemies.push(Enemy {
            rect: Rect::from_origin(x - ENEMY_SIZE / 2.0, ENEMY_SPAWN_Y, ENEMY_SIZE, ENEMY_SIZE),
            speed,
            active: true,
        });
    }

    /// Bullets resolve before rams: an enemy shot this tick cannot also hit the ship
    fn resolve_shots(&mut self, ctx: &mut TickContext<'_>) {
        for bullet in self.bullets.iter_mut().filter(|b| b.active) {
            let bounds = bullet.bounds();
            if let Some(enemy) = self
                .enemies
                .iter_mut()
                .find(|e| e.active && aabb_overlap(&bounds, &e.rect))
            {
                enemy.active = false;
                bullet.active = false;
                ctx.award(ENEMY_POINTS);
                ctx.cue(Cue::EnemyDestroyed);
            }
        }
    }

    fn resolve_rams(&mut self, ctx: &mut TickContext<'_>) {
        let ship = self.ship();
        for enemy in self.enemies.iter_mut().filter(|e| e.active) {
            if aabb_overlap(&ship, &enemy.rect) {
                enemy.active = false;
                ctx.lose_life();
                ctx.cue(Cue::ShipHit);
            }
        }
    }
}

impl Game for Shooter {
    const VARIANT: Variant = Variant::Shooter;
    const STARTING_LIVES: Option<u32> = Some(3);

    fn new(settings: &Settings, rng: &mut Pcg32) -> Self {
        let arena = settings.arena;
        let star_seed = rng.random::<u64>();
        let stars = if settings.starfield {
            Starfield::new(STAR_COUNT, STAR_SPEED, arena, star_seed)
        } else {
            Starfield::disabled(arena)
        };
        Self {
            arena,
            ship_x: arena.width / 2.0,
            enemies: Vec::new(),
            bullets: Vec::new(),
            stars,
        }
    }

    fn new_round(&mut self, _rng: &mut Pcg32) {
        self.ship_x = self.arena.width / 2.0;
        self.enemies.clear();
        self.bullets.clear();
    }

    fn handle_input(&mut self, input: Input) {
        if let Input::PointerX(x) = input {
            self.ship_x = clamp_x(x, SHIP_MARGIN, self.arena.width - SHIP_MARGIN);
        }
    }

    fn advance_cosmetics(&mut self, ctx: &mut TickContext<'_>) {
        self.stars.advance(ctx.difficulty);
    }

    fn spawn(&mut self, ctx: &mut TickContext<'_>) {
        if on_interval(ctx.tick, ENEMY_EVERY) {
            self.spawn_enemy(ctx.rng);
        }
        if on_interval(ctx.tick, FIRE_EVERY) {
            self.fire();
        }
    }

    fn integrate(&mut self, ctx: &mut TickContext<'_>) {
        for bullet in &mut self.bullets {
            bullet.pos.y -= BULLET_SPEED;
        }
        for enemy in &mut self.enemies {
            enemy.rect.offset(Vec2::new(0.0, enemy.speed * ctx.difficulty));
        }
    }

    fn resolve_collisions(&mut self, ctx: &mut TickContext<'_>) {
        self.resolve_shots(ctx);
        self.resolve_rams(ctx);

        for bullet in &mut self.bullets {
            if bullet.pos.y < 0.0 {
                bullet.active = false;
            }
        }
        let floor = self.arena.height;
        for enemy in &mut self.enemies {
            if enemy.rect.top > floor {
                enemy.active = false;
            }
        }
    }

    fn purge(&mut self) {
        self.bullets.retain(|b| b.active);
        self.enemies.retain(|e| e.active);
    }

    fn check_terminal(&self, board: &Scoreboard) -> Option<Outcome> {
        (board.score >= WINNING_SCORE).then_some(Outcome::Won)
    }

    /// Line up under the lowest enemy
    fn demo_input(&self) -> Option<Input> {
        self.enemies
            .iter()
            .filter(|e| e.active)
            .max_by(|a, b| a.rect.top.total_cmp(&b.rect.top))
            .map(|e| Input::PointerX(e.rect.center().x))
    }
}
