use anyhow::Result;
use log::{debug, info};

use super::config::GameConfig;
use super::direction::Direction;
use super::scheduler::Scheduler;
use super::state::GameState;

/// Coarse game state deciding which controls do anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    MainMenu,
    Playing,
    GameOver,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing, nothing changed
    Idle,
    Moved,
    Ate,
    Collided,
}

pub struct GameLoop<S: Scheduler> {
    state: GameState,
    mode: Mode,
    scheduler: S,
    best_score: u32,
}

impl<S: Scheduler> GameLoop<S> {
    /// Fails when the config does not describe a playable grid.
    pub fn new(config: &GameConfig, scheduler: S) -> Result<Self> {
        Ok(GameLoop {
            state: GameState::new(config)?,
            mode: Mode::MainMenu,
            scheduler,
            best_score: 0,
        })
    }

    /// MainMenu -> Playing. The state is not reset here, leaving the menu
    /// always happens through a reset already.
    pub fn start(&mut self) -> bool {
        if !self.expect_mode(Mode::MainMenu, "start") {
            return false;
        }
        self.enter(Mode::Playing);
        self.scheduler.start();
        true
    }

    /// GameOver -> Playing with a fresh game
    pub fn restart(&mut self) -> bool {
        if !self.expect_mode(Mode::GameOver, "restart") {
            return false;
        }
        self.state.reset();
        self.enter(Mode::Playing);
        self.scheduler.start();
        true
    }

    /// GameOver -> MainMenu with a fresh game
    pub fn return_to_menu(&mut self) -> bool {
        if !self.expect_mode(Mode::GameOver, "return to menu") {
            return false;
        }
        self.state.reset();
        self.scheduler.stop();
        self.enter(Mode::MainMenu);
        true
    }

    /// Takes effect on the next tick. Accepted in every mode.
    pub fn steer(&mut self, direction: Direction) {
        self.state.set_direction(direction);
    }

    /// One simulation step: move, eat, collide and wrap.
    pub fn tick(&mut self) -> TickOutcome {
        if self.mode != Mode::Playing {
            return TickOutcome::Idle;
        }
        self.state.advance();
        let ate = self.state.check_food();
        if self.state.check_collision().hit_body {
            self.scheduler.stop();
            self.best_score = self.best_score.max(self.state.score());
            self.enter(Mode::GameOver);
            return TickOutcome::Collided;
        }
        if ate {
            TickOutcome::Ate
        } else {
            TickOutcome::Moved
        }
    }

    fn expect_mode(&self, expected: Mode, action: &str) -> bool {
        if self.mode != expected {
            debug!("ignoring {} while in {:?}", action, self.mode);
            return false;
        }
        true
    }

    fn enter(&mut self, mode: Mode) {
        info!(
            "{:?} -> {:?} (score {}, length {})",
            self.mode,
            mode,
            self.state.score(),
            self.state.length()
        );
        self.mode = mode;
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Highest score reached since the program started
    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
