//! The six arcade games
//!
//! Each type implements [`Game`](crate::sim::Game) and only carries its own
//! entities and rules; the state machine, counters and RNG live in the
//! session.

pub mod brick_breaker;
pub mod dodger;
pub mod paddle_ball;
pub mod runner;
pub mod shooter;
pub mod snake;

pub use brick_breaker::{Brick, BrickBreaker, BrickColor};
pub use dodger::{Dodger, Meteor};
pub use paddle_ball::PaddleBall;
pub use runner::{Actor, Obstacle, Runner};
pub use shooter::{Bullet, Enemy, Shooter};
pub use snake::Snake;

use glam::Vec2;
use serde::Serialize;

use crate::sim::{Arena, Rect};

/// A ball shared by the two paddle games
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ball {
    pub pos: Vec2,
    /// px/tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(radius: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::around_circle(self.pos, self.radius)
    }

    #[inline]
    pub fn step(&mut self) {
        self.pos += self.vel;
    }

    /// Reflect off the side walls (and the ceiling if `ceiling`).
    /// Returns true if any wall was hit.
    pub fn bounce_off_walls(&mut self, arena: &Arena, ceiling: bool) -> bool {
        let mut hit = false;
        if self.pos.x - self.radius < 0.0 {
            self.vel.x = self.vel.x.abs();
            hit = true;
        } else if self.pos.x + self.radius > arena.width {
            self.vel.x = -self.vel.x.abs();
            hit = true;
        }
        if ceiling && self.pos.y - self.radius < 0.0 {
            self.vel.y = self.vel.y.abs();
            hit = true;
        }
        hit
    }
}

/// Pointer clamp that tolerates arenas narrower than the sprite
#[inline]
pub(crate) fn clamp_x(x: f32, lo: f32, hi: f32) -> f32 {
    x.max(lo).min(hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::{Direction, Game, Input, Session, SessionState};
    use proptest::prelude::*;
    use std::fmt::Debug;

    #[test]
    fn test_ball_walls() {
        let arena = Arena {
            width: 100.0,
            height: 100.0,
        };
        let mut ball = Ball::new(10.0);
        ball.pos = Vec2::new(5.0, 50.0);
        ball.vel = Vec2::new(-3.0, -2.0);
        assert!(ball.bounce_off_walls(&arena, false));
        assert_eq!(ball.vel, Vec2::new(3.0, -2.0));

        ball.pos = Vec2::new(50.0, 5.0);
        assert!(!ball.bounce_off_walls(&arena, false));
        assert!(ball.bounce_off_walls(&arena, true));
        assert_eq!(ball.vel.y, 2.0);
    }

    fn input_from(code: u8, x: f32) -> Input {
        match code % 6 {
            0 => Input::PointerX(x),
            1 => Input::Jump,
            2 => Input::Steer(Direction::Up),
            3 => Input::Steer(Direction::Left),
            4 => Input::Steer(Direction::Down),
            _ => Input::Steer(Direction::Right),
        }
    }

    /// Score never drops and lives never grow while a run is live
    fn check_monotonic<G: Game>(seed: u64, script: &[(u8, f32)]) {
        let mut s: Session<G> = Session::new(&Settings::default(), seed);
        s.start().unwrap();
        let mut score = s.score();
        let mut lives = s.lives();
        for &(code, x) in script {
            s.apply(input_from(code, x));
            for _ in 0..8 {
                s.tick().unwrap();
                assert!(s.score() >= score);
                if let (Some(now), Some(before)) = (s.lives(), lives) {
                    assert!(now <= before);
                }
                score = s.score();
                lives = s.lives();
            }
        }
    }

    /// A paused stretch of any length leaves the run indistinguishable from one never paused
    fn check_pause_equivalence<G: Game + Clone + PartialEq + Debug>(
        seed: u64,
        pause_at: usize,
        paused_ticks: usize,
    ) {
        let settings = Settings::default();
        let mut plain: Session<G> = Session::new(&settings, seed);
        let mut paused: Session<G> = Session::new(&settings, seed);
        plain.start().unwrap();
        paused.start().unwrap();

        for i in 0..120 {
            if i == pause_at {
                paused.pause().unwrap_or(());
                let frozen = paused.game().clone();
                for _ in 0..paused_ticks {
                    paused.tick().unwrap();
                }
                assert_eq!(paused.game(), &frozen);
                paused.resume().unwrap_or(());
            }
            let input = G::demo_input(plain.game());
            if let Some(input) = input {
                plain.apply(input);
                paused.apply(input);
            }
            plain.tick().unwrap();
            paused.tick().unwrap();
        }

        assert_eq!(plain.game(), paused.game());
        assert_eq!(plain.score(), paused.score());
        assert_eq!(plain.lives(), paused.lives());
        assert_eq!(plain.frame_count(), paused.frame_count());
        assert_eq!(plain.state(), paused.state());
    }

    #[test]
    fn test_same_seed_same_run() {
        fn run<G: Game + PartialEq + Debug>() {
            let mut a: Session<G> = Session::new(&Settings::default(), 2024);
            let mut b: Session<G> = Session::new(&Settings::default(), 2024);
            a.start().unwrap();
            b.start().unwrap();
            for _ in 0..900 {
                if let Some(input) = a.demo_input() {
                    a.apply(input);
                    b.apply(input);
                }
                a.tick().unwrap();
                b.tick().unwrap();
            }
            assert_eq!(a.game(), b.game());
            assert_eq!(a.score(), b.score());
            assert_eq!(a.state(), b.state());
        }
        run::<PaddleBall>();
        run::<BrickBreaker>();
        run::<Runner>();
        run::<Dodger>();
        run::<Shooter>();
        run::<Snake>();
    }

    #[test]
    fn test_terminal_sessions_stay_frozen() {
        fn run<G: Game + Clone + PartialEq + Debug>() {
            let mut s: Session<G> = Session::new(&Settings::default(), 11);
            s.start().unwrap();
            let mut guard = 0;
            while !s.state().is_terminal() && guard < 100_000 {
                s.tick().unwrap();
                guard += 1;
            }
            if !s.state().is_terminal() {
                return;
            }
            let frozen = s.game().clone();
            let reward = s.reward();
            let frames = s.frame_count();
            for _ in 0..100 {
                s.tick().unwrap();
            }
            assert_eq!(s.game(), &frozen);
            assert_eq!(s.reward(), reward);
            assert_eq!(s.frame_count(), frames);
            assert!(matches!(s.state(), SessionState::GameOver | SessionState::Won));
        }
        run::<PaddleBall>();
        run::<BrickBreaker>();
        run::<Runner>();
        run::<Dodger>();
        run::<Shooter>();
        run::<Snake>();
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_score_and_lives_are_monotonic(
            seed in any::<u64>(),
            script in prop::collection::vec((any::<u8>(), 0.0f32..1080.0), 1..60),
        ) {
            check_monotonic::<PaddleBall>(seed, &script);
            check_monotonic::<BrickBreaker>(seed, &script);
            check_monotonic::<Runner>(seed, &script);
            check_monotonic::<Dodger>(seed, &script);
            check_monotonic::<Shooter>(seed, &script);
            check_monotonic::<Snake>(seed, &script);
        }

        #[test]
        fn prop_pause_is_tick_skip_equivalent(
            seed in any::<u64>(),
            pause_at in 0usize..120,
            paused_ticks in 0usize..40,
        ) {
            check_pause_equivalence::<PaddleBall>(seed, pause_at, paused_ticks);
            check_pause_equivalence::<BrickBreaker>(seed, pause_at, paused_ticks);
            check_pause_equivalence::<Runner>(seed, pause_at, paused_ticks);
            check_pause_equivalence::<Dodger>(seed, pause_at, paused_ticks);
            check_pause_equivalence::<Shooter>(seed, pause_at, paused_ticks);
            check_pause_equivalence::<Snake>(seed, pause_at, paused_ticks);
        }
    }
}
