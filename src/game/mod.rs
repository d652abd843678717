//! Headless game logic: snake state, the mode state machine and the tick
//! scheduler it drives. Nothing here touches the terminal.

pub mod config;
pub mod direction;
pub mod game_loop;
pub mod scheduler;
pub mod state;

pub use config::GameConfig;
pub use direction::Direction;
pub use game_loop::{GameLoop, Mode, TickOutcome};
pub use scheduler::{FixedInterval, Scheduler};
pub use state::{CollisionCheck, Coordinates, Edge, GameState};
