//! Grid snake (Classic Snake)
//!
//! The snake advances one cell every `step_ticks` ticks, slower than the
//! tick cadence. Turns are buffered and take effect on the next advance.

use std::collections::VecDeque;

use glam::IVec2;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::settings::Settings;
use crate::sim::spawn::{on_interval, random_empty_cell};
use crate::sim::{Cue, Direction, Game, Input, Outcome, Scoreboard, TickContext, Variant};

pub const COLUMNS: i32 = 15;
pub const ROWS: i32 = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snake {
    /// Head first
    pub body: VecDeque<IVec2>,
    pub food: Option<IVec2>,
    /// Direction of the last advance
    pub heading: Direction,
    /// Direction the next advance will take
    pub pending: Direction,
    pub step_ticks: u64,
    /// Cell the head moves into this tick, if this is an advance tick
    #[serde(skip)]
    next_head: Option<IVec2>,
    pub crashed: bool,
    /// No empty cell left for food
    pub full: bool,
}

fn in_grid(cell: IVec2) -> bool {
    (0..COLUMNS).contains(&cell.x) && (0..ROWS).contains(&cell.y)
}

impl Snake {
    fn starting_body() -> VecDeque<IVec2> {
        let mid = IVec2::new(COLUMNS / 2, ROWS / 2);
        VecDeque::from([mid, mid - IVec2::X, mid - IVec2::X * 2])
    }

    pub fn head(&self) -> IVec2 {
        self.body.front().copied().unwrap_or_default()
    }

    /// Whether moving the head into `cell` ends the run
    ///
    /// The tail cell is free unless the snake grows on this move.
    fn blocked(&self, cell: IVec2, growing: bool) -> bool {
        if !in_grid(cell) {
            return true;
        }
        let keep = if growing {
            self.body.len()
        } else {
            self.body.len().saturating_sub(1)
        };
        self.body.iter().take(keep).any(|&c| c == cell)
    }

    fn place_food(&mut self, rng: &mut Pcg32) {
        let body = &self.body;
        self.food = random_empty_cell(rng, COLUMNS, ROWS, body.len(), |c| body.contains(&c));
    }
}

impl Game for Snake {
    const VARIANT: Variant = Variant::Snake;

    fn new(settings: &Settings, _rng: &mut Pcg32) -> Self {
        Self {
            body: Self::starting_body(),
            food: None,
            heading: Direction::Right,
            pending: Direction::Right,
            step_ticks: settings.snake_step_ticks(),
            next_head: None,
            crashed: false,
            full: false,
        }
    }

    fn new_round(&mut self, rng: &mut Pcg32) {
        self.body = Self::starting_body();
        self.heading = Direction::Right;
        self.pending = Direction::Right;
        self.next_head = None;
        self.crashed = false;
        self.full = false;
        self.place_food(rng);
    }

    fn handle_input(&mut self, input: Input) {
        if let Input::Steer(dir) = input {
            if dir != self.heading.opposite() {
                self.pending = dir;
            }
        }
    }

    fn integrate(&mut self, ctx: &mut TickContext<'_>) {
        self.next_head = if on_interval(ctx.tick, self.step_ticks) {
            self.heading = self.pending;
            Some(self.head() + self.heading.delta())
        } else {
            None
        };
    }

    fn resolve_collisions(&mut self, ctx: &mut TickContext<'_>) {
        let Some(next) = self.next_head.take() else {
            return;
        };
        let eating = self.food == Some(next);
        if self.blocked(next, eating) {
            self.crashed = true;
            return;
        }

        self.body.push_front(next);
        if eating {
            ctx.award(1);
            ctx.cue(Cue::AppleEaten);
            self.place_food(ctx.rng);
            self.full = self.food.is_none();
        } else {
            self.body.pop_back();
        }
    }

    fn check_terminal(&self, _board: &Scoreboard) -> Option<Outcome> {
        if self.crashed {
            Some(Outcome::Lost)
        } else if self.full {
            Some(Outcome::Won)
        } else {
            None
        }
    }

    /// Greedy: the safe turn that gets closest to the food
    fn demo_input(&self) -> Option<Input> {
        let head = self.head();
        let target = self.food.unwrap_or(head);
        [
            self.pending,
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
        .into_iter()
        .filter(|&d| d != self.heading.opposite())
        .map(|d| (d, head + d.delta()))
        .filter(|&(_, cell)| !self.blocked(cell, self.food == Some(cell)))
        .min_by_key(|&(_, cell)| (cell - target).abs().element_sum())
        .map(|(d, _)| Input::Steer(d))
    }
}
