use std::sync::mpsc::{Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use log::info;

use crate::game::{FixedInterval, GameConfig, GameLoop, Scheduler};
use crate::input::{InputDecoder, KeyAction};
use crate::render::{draw_frame, Surface, TerminalSurface};
use crate::terminal::{spawn_stdin_channel, RawMode};

const IDLE_SLEEP: Duration = Duration::from_millis(3);

/// What the event loop should do after an input action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Redraw,
    Unchanged,
    Quit,
}

/// Routes one key action to the game. Transitions that do not apply in the
/// current mode are ignored by the game loop.
pub fn apply_action<S: Scheduler>(game: &mut GameLoop<S>, action: KeyAction) -> Flow {
    let changed = match action {
        KeyAction::Steer(direction) => {
            game.steer(direction);
            false
        }
        KeyAction::Start => game.start(),
        KeyAction::Restart => game.restart(),
        KeyAction::Menu => game.return_to_menu(),
        KeyAction::Quit => return Flow::Quit,
    };
    if changed {
        Flow::Redraw
    } else {
        Flow::Unchanged
    }
}

/// Real-time driver: owns the terminal, feeds input and ticks to the game
/// and redraws, all on one thread.
pub struct App {
    game: GameLoop<FixedInterval>,
    decoder: InputDecoder,
    surface: TerminalSurface,
}

impl App {
    pub fn new(config: &GameConfig) -> Result<Self> {
        Ok(App {
            game: GameLoop::new(config, FixedInterval::new(config.tick))?,
            decoder: InputDecoder::new(),
            surface: TerminalSurface::new(config.cell_size, config.columns(), config.rows()),
        })
    }

    pub fn run(&mut self) -> Result<()> {
        let _raw = RawMode::enable()?;
        let input = spawn_stdin_channel();
        let result = self.event_loop(&input);
        info!("leaving with best score {}", self.game.best_score());
        result
    }

    fn event_loop(&mut self, input: &Receiver<u8>) -> Result<()> {
        let mut dirty = true;
        loop {
            loop {
                match input.try_recv() {
                    Ok(byte) => self.decoder.push(byte),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => bail!("stdin closed"),
                }
            }
            while let Some(action) = self.decoder.next_action() {
                match apply_action(&mut self.game, action) {
                    Flow::Quit => return Ok(()),
                    Flow::Redraw => dirty = true,
                    Flow::Unchanged => {}
                }
            }
            if self.game.scheduler_mut().poll(Instant::now()) {
                self.game.tick();
                dirty = true;
            }
            if dirty {
                draw_frame(&mut self.surface, &self.game);
                self.surface.present()?;
                dirty = false;
            }
            thread::sleep(IDLE_SLEEP);
        }
    }
}
