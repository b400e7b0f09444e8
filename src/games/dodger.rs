//! Meteor dodger (Meteor Dodge)
//!
//! Meteors fall from the top at a rate and speed that climb with difficulty.
//! Every meteor that leaves the bottom is worth points; one hit ends the run.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::clamp_x;
use crate::settings::Settings;
use crate::sim::spawn::{on_interval, place_across, spawn_interval, uniform};
use crate::sim::{
    Arena, Cue, DifficultyRamp, Game, Input, Outcome, Scoreboard, Starfield, TickContext, Variant,
    circles_overlap,
};

/// Ship center, measured up from the bottom edge
pub const SHIP_LIFT: f32 = 200.0;
pub const SHIP_RADIUS: f32 = 35.0;
/// Pointer clamp margin on both sides
pub const SHIP_MARGIN: f32 = 70.0;

pub const METEOR_MIN_RADIUS: f32 = 20.0;
pub const METEOR_MAX_RADIUS: f32 = 60.0;
pub const METEOR_MIN_SPEED: f32 = 5.0;
pub const METEOR_MAX_SPEED: f32 = 15.0;
pub const DODGE_POINTS: u32 = 10;
/// Ticks between spawns at difficulty 1.0
pub const BASE_SPAWN_INTERVAL: f32 = 30.0;

pub const DIFFICULTY_STEP: f32 = 0.1;
pub const DIFFICULTY_EVERY: u64 = 600;

pub const STAR_COUNT: usize = 61;
pub const STAR_SPEED: (f32, f32) = (2.0, 10.0);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Meteor {
    pub pos: Vec2,
    pub radius: f32,
    /// Fall speed at difficulty 1.0
    pub speed: f32,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dodger {
    pub arena: Arena,
    /// Ship center x; y is fixed
    pub ship_x: f32,
    pub meteors: Vec<Meteor>,
    pub stars: Starfield,
    pub crashed: bool,
}

impl Dodger {
    pub fn ship_y(&self) -> f32 {
        self.arena.height - SHIP_LIFT
    }

    pub fn ship_pos(&self) -> Vec2 {
        Vec2::new(self.ship_x, self.ship_y())
    }

    fn clamp_ship(&self, x: f32) -> f32 {
        clamp_x(x, SHIP_MARGIN, self.arena.width - SHIP_MARGIN)
    }
}

impl Game for Dodger {
    const VARIANT: Variant = Variant::Dodger;

    fn new(settings: &Settings, rng: &mut Pcg32) -> Self {
        let arena = settings.arena;
        // Drawn either way so the gameplay stream is independent of the toggle
        let star_seed = rng.random::<u64>();
        let stars = if settings.starfield {
            Starfield::new(STAR_COUNT, STAR_SPEED, arena, star_seed)
        } else {
            Starfield::disabled(arena)
        };
        Self {
            arena,
            ship_x: arena.width / 2.0,
            meteors: Vec::new(),
            stars,
            crashed: false,
        }
    }

    fn difficulty_ramp() -> DifficultyRamp {
        DifficultyRamp::new(1.0, DIFFICULTY_STEP, DIFFICULTY_EVERY)
    }

    fn new_round(&mut self, _rng: &mut Pcg32) {
        self.ship_x = self.arena.width / 2.0;
        self.meteors.clear();
        self.crashed = false;
    }

    fn handle_input(&mut self, input: Input) {
        if let Input::PointerX(x) = input {
            self.ship_x = self.clamp_ship(x);
        }
    }

    fn advance_cosmetics(&mut self, ctx: &mut TickContext<'_>) {
        self.stars.advance(ctx.difficulty);
    }

    fn spawn(&mut self, ctx: &mut TickContext<'_>) {
        let every = spawn_interval(BASE_SPAWN_INTERVAL, ctx.difficulty);
        if !on_interval(ctx.tick, every) {
            return;
        }
        let radius = uniform(ctx.rng, METEOR_MIN_RADIUS, METEOR_MAX_RADIUS);
        let x = place_across(ctx.rng, self.arena.width, radius);
        let speed = uniform(ctx.rng, METEOR_MIN_SPEED, METEOR_MAX_SPEED);
        self.meteors.push(Meteor {
            pos: Vec2::new(x, -radius),
            radius,
            speed,
            active: true,
        });
    }

    fn integrate(&mut self, ctx: &mut TickContext<'_>) {
        for meteor in &mut self.meteors {
            meteor.pos.y += meteor.speed * ctx.difficulty;
        }
    }

    fn resolve_collisions(&mut self, ctx: &mut TickContext<'_>) {
        let ship = self.ship_pos();
        let floor = self.arena.height;
        for meteor in self.meteors.iter_mut().filter(|m| m.active) {
            if circles_overlap(ship, SHIP_RADIUS, meteor.pos, meteor.radius) {
                meteor.active = false;
                self.crashed = true;
                ctx.cue(Cue::ShipHit);
            } else if meteor.pos.y - meteor.radius > floor {
                meteor.active = false;
                ctx.award(DODGE_POINTS);
                ctx.cue(Cue::MeteorDodged);
            }
        }
    }

    fn purge(&mut self) {
        self.meteors.retain(|m| m.active);
    }

    fn check_terminal(&self, _board: &Scoreboard) -> Option<Outcome> {
        self.crashed.then_some(Outcome::Lost)
    }

    /// Park the ship at the sampled x with the widest clearance from meteors
    /// that are about to reach the ship's row
    fn demo_input(&self) -> Option<Input> {
        let ship_y = self.ship_y();
        let threats: Vec<&Meteor> = self
            .meteors
            .iter()
            .filter(|m| m.active && m.pos.y + m.radius > ship_y - 600.0)
            .filter(|m| m.pos.y - m.radius < ship_y + SHIP_RADIUS)
            .collect();
        if threats.is_empty() {
            return None;
        }

        let clearance = |x: f32| {
            threats
                .iter()
                .map(|m| (x - m.pos.x).abs() - m.radius)
                .fold(f32::INFINITY, f32::min)
        };
        let lo = SHIP_MARGIN;
        let hi = (self.arena.width - SHIP_MARGIN).max(lo);
        let mut best = (clearance(self.ship_x), self.ship_x);
        for i in 0..=32 {
            let x = lo + (hi - lo) * i as f32 / 32.0;
            let c = clearance(x);
            let closer = (x - self.ship_x).abs() < (best.1 - self.ship_x).abs();
            if c > best.0 + 1.0 || (c >= best.0 && closer) {
                best = (c, x);
            }
        }
        Some(Input::PointerX(best.1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameEvent, Session, SessionState};

    fn running() -> Session<Dodger> {
        let mut s = Session::new(&Settings::default(), 77);
        s.start().unwrap();
        s
    }

    fn meteor(x: f32, y: f32, radius: f32) -> Meteor {
        Meteor {
            pos: Vec2::new(x, y),
            radius,
            speed: 10.0,
            active: true,
        }
    }

    #[test]
    fn test_initial_state() {
        let s = running();
        let game = s.game();
        assert_eq!(game.ship_x, 540.0);
        assert_eq!(game.ship_y(), 1720.0);
        assert!(game.meteors.is_empty());
        assert_eq!(game.stars.stars.len(), STAR_COUNT);
        assert_eq!(s.lives(), None);
    }

    #[test]
    fn test_pointer_clamp() {
        let mut s = running();
        s.apply(Input::PointerX(0.0));
        assert_eq!(s.game().ship_x, SHIP_MARGIN);
        s.apply(Input::PointerX(2000.0));
        assert_eq!(s.game().ship_x, 1080.0 - SHIP_MARGIN);
    }

    #[test]
    fn test_spawn_cadence_and_placement() {
        let mut s = running();
        for _ in 0..29 {
            s.tick().unwrap();
        }
        assert!(s.game().meteors.is_empty());
        s.tick().unwrap();
        let meteors = &s.game().meteors;
        assert_eq!(meteors.len(), 1);
        let m = meteors[0];
        assert!((METEOR_MIN_RADIUS..METEOR_MAX_RADIUS).contains(&m.radius));
        assert!(m.pos.x >= m.radius && m.pos.x <= 1080.0 - m.radius);
        assert!((METEOR_MIN_SPEED..METEOR_MAX_SPEED).contains(&m.speed));
        assert!((m.pos.y - (m.speed - m.radius)).abs() < 1e-3);
    }

    #[test]
    fn test_stars_do_not_touch_gameplay() {
        let mut plain = Settings::default();
        plain.starfield = false;
        let mut a: Session<Dodger> = Session::new(&Settings::default(), 5);
        let mut b: Session<Dodger> = Session::new(&plain, 5);
        a.start().unwrap();
        b.start().unwrap();
        for _ in 0..200 {
            a.tick().unwrap();
            b.tick().unwrap();
        }
        assert!(b.game().stars.stars.is_empty());
        assert_eq!(a.game().meteors, b.game().meteors);
        assert_eq!(a.score(), b.score());
    }

    #[test]
    fn test_dodged_meteor_scores() {
        let mut s = running();
        s.game_mut().meteors.push(meteor(100.0, 1935.0, 20.0));
        s.tick().unwrap();
        assert_eq!(s.score(), DODGE_POINTS);
        assert!(s.game().meteors.is_empty());
        assert!(s.events().contains(&GameEvent::Cue(Cue::MeteorDodged)));
    }

    #[test]
    fn test_hit_ends_run() {
        let mut s = running();
        s.game_mut().meteors.push(meteor(550.0, 1680.0, 30.0));
        s.tick().unwrap();
        assert!(s.game().crashed);
        assert_eq!(s.state(), SessionState::GameOver);
        assert_eq!(s.reward(), Some(10));
        assert!(s.events().contains(&GameEvent::RewardEarned { coins: 10 }));
    }

    #[test]
    fn test_touching_is_not_a_hit() {
        let mut s = running();
        // After one tick the meteor sits exactly r + SHIP_RADIUS above the ship
        s.game_mut().meteors.push(meteor(540.0, 1720.0 - 65.0 - 10.0, 30.0));
        s.tick().unwrap();
        assert_eq!(s.state(), SessionState::Running);
    }

    #[test]
    fn test_difficulty_climbs() {
        let mut s = running();
        for _ in 0..DIFFICULTY_EVERY {
            s.game_mut().meteors.clear();
            s.tick().unwrap();
        }
        assert!((s.difficulty_factor() - 1.1).abs() < 1e-5);
        assert_eq!(spawn_interval(BASE_SPAWN_INTERVAL, s.difficulty_factor()), 27);
    }

    #[test]
    fn test_autopilot_steps_aside() {
        let mut s = running();
        s.game_mut().meteors.push(meteor(540.0, 1500.0, 50.0));
        let Some(Input::PointerX(x)) = s.demo_input() else {
            panic!("expected a pointer move");
        };
        assert!((x - 540.0).abs() > 50.0 + SHIP_RADIUS);
    }
}
