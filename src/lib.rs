//! wrapsnake - terminal Snake on a wrap-around playfield
//!
//! - `game`: headless rules, mode state machine and tick scheduling
//! - `input`: raw terminal bytes to key actions
//! - `render`: drawing surface abstraction and the terminal implementation
//! - `terminal` / `app`: raw mode, stdin reader and the real-time loop

pub mod app;
pub mod game;
pub mod input;
pub mod render;
pub mod terminal;
