use std::time::Duration;

use anyhow::{bail, Result};

/// Playfield and timing settings. Dimensions are in pixels, the snake moves
/// one `cell_size` per tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
    pub tick: Duration,
    pub initial_length: usize,
    /// Fixed RNG seed for reproducible food placement
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 700,
            height: 700,
            cell_size: 30,
            tick: Duration::from_millis(70),
            initial_length: 3,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn new(width: i32, height: i32, cell_size: i32) -> Self {
        Self {
            width,
            height,
            cell_size,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.cell_size <= 0 {
            bail!("cell size must be positive, got {}", self.cell_size);
        }
        if self.initial_length == 0 {
            bail!("initial snake length must be at least 1");
        }
        if self.rows() < 1 {
            bail!(
                "height {} is smaller than one cell of {}",
                self.height,
                self.cell_size
            );
        }
        if self.columns() < self.initial_length as i32 {
            bail!(
                "width {} fits {} columns, the snake needs {}",
                self.width,
                self.columns(),
                self.initial_length
            );
        }
        Ok(())
    }

    pub fn columns(&self) -> i32 {
        self.width / self.cell_size
    }

    pub fn rows(&self) -> i32 {
        self.height / self.cell_size
    }

    /// Number of cells on the grid, the upper bound on snake length
    pub fn capacity(&self) -> usize {
        (self.columns() * self.rows()) as usize
    }

    /// Cell-aligned extent of the playfield; wrap-around happens here.
    pub fn grid_width(&self) -> i32 {
        self.columns() * self.cell_size
    }

    pub fn grid_height(&self) -> i32 {
        self.rows() * self.cell_size
    }
}
