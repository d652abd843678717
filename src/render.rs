//! Frame drawing. `draw_frame` turns the game into drawing calls on a
//! `Surface`; `TerminalSurface` rasterises those calls into a coloured
//! character grid, two terminal columns per cell.

use std::io::{self, Write};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::game::{Coordinates, GameLoop, Mode, Scheduler};
use crate::terminal::clear_screen;

pub const TITLE: &str = "S N A K E";
pub const GAME_OVER: &str = "Game Over";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    GridLine,
    Food,
    Head,
    Body,
    Text,
}

/// On-screen controls; the terminal binds each to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Start,
    Restart,
    MainMenu,
}

impl Button {
    pub fn label(&self) -> &'static str {
        match self {
            Button::Start => "Start",
            Button::Restart => "Restart",
            Button::MainMenu => "Main menu",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Button::Start => "Enter",
            Button::Restart => "R",
            Button::MainMenu => "M",
        }
    }
}

/// 2D drawing target in playfield pixel coordinates
pub trait Surface {
    fn begin_frame(&mut self);
    fn draw_line(&mut self, from: Coordinates, to: Coordinates, paint: Paint);
    fn fill_oval(&mut self, at: Coordinates, size: i32, paint: Paint);
    fn fill_rect(&mut self, at: Coordinates, size: i32, paint: Paint);
    /// `y` is the baseline row, the text is centred horizontally
    fn draw_text_centered(&mut self, text: &str, y: i32, paint: Paint);
    /// Replaces the set of visible buttons
    fn show_buttons(&mut self, buttons: &[Button]);
    fn present(&mut self) -> Result<()>;
}

/// Draws the current mode's screen. Only reads from the game.
pub fn draw_frame<S: Surface, T: Scheduler>(surface: &mut S, game: &GameLoop<T>) {
    let state = game.state();
    let config = state.config();
    let cell = config.cell_size;
    let (width, height) = (config.grid_width(), config.grid_height());

    surface.begin_frame();
    match game.mode() {
        Mode::MainMenu => {
            surface.draw_text_centered(TITLE, height / 3, Paint::Text);
            surface.draw_text_centered("arrows steer", height / 3 + 2 * cell, Paint::Text);
            surface.show_buttons(&[Button::Start]);
        }
        Mode::Playing => {
            for column in 0..config.columns() {
                let x = column * cell;
                let (top, bottom) = (Coordinates::new(x, 0), Coordinates::new(x, height));
                surface.draw_line(top, bottom, Paint::GridLine);
            }
            for row in 0..config.rows() {
                let y = row * cell;
                let (left, right) = (Coordinates::new(0, y), Coordinates::new(width, y));
                surface.draw_line(left, right, Paint::GridLine);
            }
            surface.fill_oval(state.food(), cell, Paint::Food);
            for (i, segment) in state.segments().iter().enumerate() {
                let paint = if i == 0 { Paint::Head } else { Paint::Body };
                surface.fill_rect(*segment, cell, paint);
            }
            surface.show_buttons(&[]);
        }
        Mode::GameOver => {
            surface.draw_text_centered(&format!("Score: {}", state.score()), cell, Paint::Text);
            surface.draw_text_centered(GAME_OVER, height / 2, Paint::Text);
            surface.draw_text_centered(
                &format!("Best: {}", game.best_score()),
                height / 2 + 2 * cell,
                Paint::Text,
            );
            surface.show_buttons(&[Button::Restart, Button::MainMenu]);
        }
    }
}

pub struct TerminalSurface {
    cell_size: i32,
    columns: usize,
    rows: usize,
    tiles: Vec<Option<Paint>>,
    texts: Vec<(usize, String)>,
    buttons: Vec<Button>,
}

impl TerminalSurface {
    pub fn new(cell_size: i32, columns: i32, rows: i32) -> Self {
        let columns = columns.max(0) as usize;
        let rows = rows.max(0) as usize;
        TerminalSurface {
            cell_size,
            columns,
            rows,
            tiles: vec![None; columns * rows],
            texts: Vec::new(),
            buttons: Vec::new(),
        }
    }

    // cells past the playfield (a freshly wrapped head) are not drawn
    fn tile_index(&self, at: Coordinates) -> Option<usize> {
        if at.x < 0 || at.y < 0 {
            return None;
        }
        let column = (at.x / self.cell_size) as usize;
        let row = (at.y / self.cell_size) as usize;
        if column >= self.columns || row >= self.rows {
            return None;
        }
        Some(row * self.columns + column)
    }

    fn paint_tile(&mut self, at: Coordinates, paint: Paint) {
        if let Some(index) = self.tile_index(at) {
            self.tiles[index] = Some(paint);
        }
    }

    fn glyph(tile: Option<Paint>) -> String {
        match tile {
            None | Some(Paint::Text) => "  ".to_string(),
            Some(Paint::GridLine) => "· ".bright_black().to_string(),
            Some(Paint::Food) => "● ".cyan().to_string(),
            Some(Paint::Head) => "Ӫ ".bright_cyan().bold().to_string(),
            Some(Paint::Body) => "⏺ ".yellow().to_string(),
        }
    }

    /// The whole frame, borders and button bar included
    pub fn render_to_string(&self) -> String {
        let inner = self.columns * 2;
        let mut out = String::new();
        out.push('▗');
        out.push_str(&"▄▄".repeat(self.columns));
        out.push_str("▖\n");
        for row in 0..self.rows {
            out.push('▐');
            if let Some((_, text)) = self.texts.iter().find(|(r, _)| *r == row) {
                let text: String = text.chars().take(inner).collect();
                let left = (inner - text.chars().count()) / 2;
                let right = inner - left - text.chars().count();
                out.push_str(&" ".repeat(left));
                out.push_str(&text.red().bold().to_string());
                out.push_str(&" ".repeat(right));
            } else {
                for column in 0..self.columns {
                    out.push_str(&Self::glyph(self.tiles[row * self.columns + column]));
                }
            }
            out.push_str("▌\n");
        }
        out.push('▝');
        out.push_str(&"▀▀".repeat(self.columns));
        out.push_str("▘\n");
        let bar: Vec<String> = self
            .buttons
            .iter()
            .map(|button| format!("[{}] {}", button.key(), button.label()))
            .collect();
        out.push_str(&bar.join("   "));
        out.push('\n');
        out
    }
}

impl Surface for TerminalSurface {
    fn begin_frame(&mut self) {
        self.tiles.iter_mut().for_each(|tile| *tile = None);
        self.texts.clear();
    }

    fn draw_line(&mut self, from: Coordinates, to: Coordinates, paint: Paint) {
        let step = self.cell_size as usize;
        let cells: Vec<Coordinates> = if from.x == to.x {
            (from.y.min(to.y)..from.y.max(to.y))
                .step_by(step)
                .map(|y| Coordinates::new(from.x, y))
                .collect()
        } else if from.y == to.y {
            (from.x.min(to.x)..from.x.max(to.x))
                .step_by(step)
                .map(|x| Coordinates::new(x, from.y))
                .collect()
        } else {
            // only axis-aligned lines exist on a character grid
            return;
        };
        for at in cells {
            if let Some(index) = self.tile_index(at) {
                if self.tiles[index].is_none() {
                    self.tiles[index] = Some(paint);
                }
            }
        }
    }

    fn fill_oval(&mut self, at: Coordinates, _size: i32, paint: Paint) {
        self.paint_tile(at, paint);
    }

    fn fill_rect(&mut self, at: Coordinates, _size: i32, paint: Paint) {
        self.paint_tile(at, paint);
    }

    fn draw_text_centered(&mut self, text: &str, y: i32, _paint: Paint) {
        let row = (y.max(0) / self.cell_size) as usize;
        if row < self.rows {
            self.texts.retain(|(r, _)| *r != row);
            self.texts.push((row, text.to_string()));
        }
    }

    fn show_buttons(&mut self, buttons: &[Button]) {
        self.buttons = buttons.to_vec();
    }

    fn present(&mut self) -> Result<()> {
        let frame = self.render_to_string();
        let mut stdout = io::stdout().lock();
        clear_screen(&mut stdout)?;
        stdout
            .write_all(frame.as_bytes())
            .context("Failed to write frame")?;
        stdout.flush().context("Failed to flush stdout")?;
        Ok(())
    }
}
