//! Session state machine shared by every game
//!
//! `Idle -> Running <-> Paused -> {GameOver, Won}`. The session owns all
//! mutable gameplay state; hosts get shared borrows (`game()`, `snapshot()`)
//! and a queue of [`GameEvent`]s.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyRamp;
use super::events::{Cue, GameEvent};
use super::game::{Game, Input, Outcome, Variant};
use super::reward::coins_for;
use crate::settings::Settings;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Created, `start()` not called yet
    Idle,
    /// Ticks advance the simulation
    Running,
    /// Ticks are no-ops until `resume()`
    Paused,
    /// Run ended in a loss
    GameOver,
    /// Run ended in a win
    Won,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::GameOver | SessionState::Won)
    }
}

/// Host contract violations (gameplay failures are never errors)
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("tick() called before start()")]
    NotStarted,

    #[error("start() called while the session is running")]
    AlreadyRunning,

    #[error("pause() is only valid while running (state: {0:?})")]
    NotRunning(SessionState),

    #[error("resume() is only valid while paused (state: {0:?})")]
    NotPaused(SessionState),
}

/// Score and lives, mutated only through [`TickContext`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    pub score: u32,
    /// `None` for games without a life counter
    pub lives: Option<u32>,
}

/// Everything a game may touch during one tick besides its own entities
pub struct TickContext<'a> {
    /// 1-based number of the tick being simulated since `start()`
    pub tick: u64,
    /// Current difficulty factor (>= 1.0)
    pub difficulty: f32,
    pub rng: &'a mut Pcg32,
    board: &'a mut Scoreboard,
    events: &'a mut Vec<GameEvent>,
}

impl TickContext<'_> {
    #[inline]
    pub fn score(&self) -> u32 {
        self.board.score
    }

    #[inline]
    pub fn lives(&self) -> Option<u32> {
        self.board.lives
    }

    /// Add points and notify the host
    pub fn award(&mut self, points: u32) {
        if points == 0 {
            return;
        }
        self.board.score = self.board.score.saturating_add(points);
        self.events.push(GameEvent::ScoreChanged {
            score: self.board.score,
        });
    }

    /// Take one life (clamped at zero) and notify the host
    pub fn lose_life(&mut self) {
        if let Some(lives) = self.board.lives.as_mut() {
            if *lives > 0 {
                *lives -= 1;
                self.events.push(GameEvent::LifeLost { lives: *lives });
            }
        }
    }

    pub fn cue(&mut self, cue: Cue) {
        self.events.push(GameEvent::Cue(cue));
    }
}

/// Read-only view for rendering and result reporting
#[derive(Debug, Serialize)]
pub struct Snapshot<'a, G> {
    pub variant: Variant,
    pub state: SessionState,
    pub score: u32,
    pub lives: Option<u32>,
    pub frame_count: u64,
    pub difficulty_factor: f32,
    pub reward: Option<u32>,
    pub game: &'a G,
}

/// One live instance of a game variant
///
/// Events queue up until the host drains them; hosts are expected to call
/// [`Session::drain_events`] once per tick.
#[derive(Debug, Clone)]
pub struct Session<G: Game> {
    seed: u64,
    state: SessionState,
    game: G,
    board: Scoreboard,
    frame_count: u64,
    ramp: DifficultyRamp,
    rng: Pcg32,
    outcome: Option<Outcome>,
    reward: Option<u32>,
    events: Vec<GameEvent>,
}

impl<G: Game> Session<G> {
    /// Create an idle session; nothing moves until `start()`
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let game = G::new(settings, &mut rng);
        Self {
            seed,
            state: SessionState::Idle,
            game,
            board: Scoreboard {
                score: 0,
                lives: G::STARTING_LIVES,
            },
            frame_count: 0,
            ramp: G::difficulty_ramp(),
            rng,
            outcome: None,
            reward: None,
            events: Vec::new(),
        }
    }

    /// Begin a run. Valid from Idle, Paused and the terminal states.
    ///
    /// Games may choose to continue the current round (keeping score and
    /// lives); otherwise every entity and counter returns to its initial value.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.state == SessionState::Running {
            log::warn!("{}: start() while running", G::VARIANT.as_str());
            return Err(SessionError::AlreadyRunning);
        }

        let continuing =
            self.state != SessionState::Idle && self.game.resumes_round(&self.board);
        if continuing {
            self.game.continue_round(&mut self.rng);
        } else {
            self.game.new_round(&mut self.rng);
            self.board = Scoreboard {
                score: 0,
                lives: G::STARTING_LIVES,
            };
        }

        self.frame_count = 0;
        self.ramp.reset();
        self.outcome = None;
        self.reward = None;
        self.transition(SessionState::Running);

        log::info!(
            "{} started (seed {}, {})",
            G::VARIANT.title(),
            self.seed,
            if continuing { "continued" } else { "new game" }
        );
        Ok(())
    }

    /// Freeze the simulation. Valid only while Running.
    pub fn pause(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Running {
            log::warn!("{}: pause() from {:?}", G::VARIANT.as_str(), self.state);
            return Err(SessionError::NotRunning(self.state));
        }
        self.transition(SessionState::Paused);
        log::debug!("{} paused at tick {}", G::VARIANT.as_str(), self.frame_count);
        Ok(())
    }

    /// Unfreeze without resetting anything. Valid only while Paused.
    pub fn resume(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Paused {
            log::warn!("{}: resume() from {:?}", G::VARIANT.as_str(), self.state);
            return Err(SessionError::NotPaused(self.state));
        }
        self.transition(SessionState::Running);
        log::debug!("{} resumed at tick {}", G::VARIANT.as_str(), self.frame_count);
        Ok(())
    }

    /// Advance the simulation by one fixed step
    ///
    /// No-op while Paused or terminal. Calling before `start()` is a host bug.
    pub fn tick(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Idle => return Err(SessionError::NotStarted),
            SessionState::Paused | SessionState::GameOver | SessionState::Won => return Ok(()),
            SessionState::Running => {}
        }

        let tick = self.frame_count + 1;
        let mut ctx = TickContext {
            tick,
            difficulty: self.ramp.factor(),
            rng: &mut self.rng,
            board: &mut self.board,
            events: &mut self.events,
        };

        self.game.advance_cosmetics(&mut ctx);
        if self.ramp.advance(tick) {
            log::debug!(
                "{} difficulty -> {:.2} at tick {}",
                G::VARIANT.as_str(),
                self.ramp.factor(),
                tick
            );
        }
        ctx.difficulty = self.ramp.factor();
        self.game.spawn(&mut ctx);
        self.game.integrate(&mut ctx);
        self.game.resolve_collisions(&mut ctx);
        self.game.purge();
        self.frame_count = tick;

        // Life depletion wins over any game-specific condition in the same tick
        let outcome = if self.board.lives == Some(0) {
            Some(Outcome::Lost)
        } else {
            self.game.check_terminal(&self.board)
        };
        if let Some(outcome) = outcome {
            self.finish(outcome);
        }
        Ok(())
    }

    /// Queue a host command for the next tick. Ignored unless Running.
    pub fn apply(&mut self, input: Input) {
        if self.state == SessionState::Running {
            self.game.handle_input(input);
        } else {
            log::trace!("{}: dropped {:?} in {:?}", G::VARIANT.as_str(), input, self.state);
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        let state = match outcome {
            Outcome::Won => SessionState::Won,
            Outcome::Lost => SessionState::GameOver,
        };
        let coins = coins_for(G::VARIANT, outcome, self.board.score);
        self.outcome = Some(outcome);
        self.reward = Some(coins);
        self.transition(state);
        if coins > 0 {
            self.events.push(GameEvent::RewardEarned { coins });
        }
        log::info!(
            "{} finished: {:?} with score {} after {} ticks (+{} coins)",
            G::VARIANT.title(),
            outcome,
            self.board.score,
            self.frame_count,
            coins
        );
    }

    fn transition(&mut self, state: SessionState) {
        self.state = state;
        self.events.push(GameEvent::StateChanged(state));
    }

    pub fn variant(&self) -> Variant {
        G::VARIANT
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.board.score
    }

    pub fn lives(&self) -> Option<u32> {
        self.board.lives
    }

    /// Ticks simulated since the last `start()`
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn difficulty_factor(&self) -> f32 {
        self.ramp.factor()
    }

    /// How the last run ended (None until terminal)
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Coins computed at the terminal transition; reading never recomputes
    pub fn reward(&self) -> Option<u32> {
        self.reward
    }

    /// Entity state for rendering
    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn snapshot(&self) -> Snapshot<'_, G> {
        Snapshot {
            variant: G::VARIANT,
            state: self.state,
            score: self.board.score,
            lives: self.board.lives,
            frame_count: self.frame_count,
            difficulty_factor: self.ramp.factor(),
            reward: self.reward,
            game: &self.game,
        }
    }

    /// Events queued since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Demo/idle-mode input for the current frame
    pub fn demo_input(&self) -> Option<Input> {
        self.game.demo_input()
    }

    #[cfg(test)]
    pub(crate) fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }
}
