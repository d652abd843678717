// the head lives at the front of the deque, every tick pushes a new head and
// drops the tail; eating re-attaches the tail that was just dropped
use std::collections::VecDeque;

use anyhow::Result;
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::GameConfig;
use super::direction::Direction;

/// Pixel coordinates of a grid cell's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinates {
    pub x: i32,
    pub y: i32,
}

impl Coordinates {
    pub fn new(x: i32, y: i32) -> Coordinates {
        Coordinates { x, y }
    }

    /// The cell `cell_size` pixels away in `direction`
    pub fn stepped(&self, direction: Direction, cell_size: i32) -> Coordinates {
        let (dx, dy) = direction.delta();
        Coordinates::new(self.x + dx * cell_size, self.y + dy * cell_size)
    }
}

/// Playfield edge the head crossed before being wrapped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

/// Result of one collision check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionCheck {
    /// Head landed on one of its own segments
    pub hit_body: bool,
    /// Edge the head left the playfield through, already wrapped
    pub wrapped: Option<Edge>,
}

#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    segments: VecDeque<Coordinates>,
    vacated: Option<Coordinates>,
    direction: Direction,
    food: Coordinates,
    score: u32,
    rng: StdRng,
}

impl GameState {
    pub fn new(config: &GameConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut state = GameState {
            config: config.clone(),
            segments: VecDeque::with_capacity(config.capacity()),
            vacated: None,
            direction: Direction::default(),
            food: Coordinates::new(0, 0),
            score: 0,
            rng,
        };
        state.reset();
        Ok(state)
    }

    /// Back to a fresh game: initial snake along the top row heading right,
    /// zero score and a new food cell. The RNG keeps its stream.
    pub fn reset(&mut self) {
        let cell = self.config.cell_size;
        let length = self.config.initial_length as i32;
        self.segments.clear();
        for i in (0..length).rev() {
            self.segments.push_back(Coordinates::new(i * cell, 0));
        }
        self.vacated = None;
        self.direction = Direction::default();
        self.score = 0;
        self.food = self.random_cell();
    }

    /// Move the whole snake one cell in the current direction. No bounds
    /// check happens here, see `check_collision`.
    pub fn advance(&mut self) {
        let next = self.head().stepped(self.direction, self.config.cell_size);
        self.segments.push_front(next);
        self.vacated = self.segments.pop_back();
    }

    /// Eat the food if the head sits on it. Returns true when eaten.
    pub fn check_food(&mut self) -> bool {
        if self.head() != self.food {
            return false;
        }
        self.score += 1;
        if self.segments.len() < self.config.capacity() {
            let tail = self.vacated.take().or_else(|| self.segments.back().copied());
            if let Some(tail) = tail {
                self.segments.push_back(tail);
            }
        }
        // placement ignores the snake body, food may land under it
        self.food = self.random_cell();
        trace!("food moved to ({}, {})", self.food.x, self.food.y);
        true
    }

    /// Scans the body for the head, then wraps the head around if it left
    /// the playfield, collision or not.
    pub fn check_collision(&mut self) -> CollisionCheck {
        let head = self.head();
        let hit_body = self.segments.iter().skip(1).rev().any(|part| *part == head);
        CollisionCheck {
            hit_body,
            wrapped: self.wrap_head(),
        }
    }

    fn wrap_head(&mut self) -> Option<Edge> {
        let width = self.config.grid_width();
        let height = self.config.grid_height();
        let head = self.segments.front_mut()?;
        let edge = if head.x < 0 {
            head.x = width;
            Edge::Left
        } else if head.x >= width {
            head.x = 0;
            Edge::Right
        } else if head.y < 0 {
            head.y = height;
            Edge::Top
        } else if head.y >= height {
            head.y = 0;
            Edge::Bottom
        } else {
            return None;
        };
        debug!("head crossed {:?} edge, now at ({}, {})", edge, head.x, head.y);
        Some(edge)
    }

    /// Input handling overwrites the direction as is; turning straight back
    /// into the neck is allowed.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn place_food(&mut self, food: Coordinates) {
        self.food = food;
    }

    fn random_cell(&mut self) -> Coordinates {
        let cell = self.config.cell_size;
        let x = self.rng.random_range(0..self.config.columns()) * cell;
        let y = self.rng.random_range(0..self.config.rows()) * cell;
        Coordinates::new(x, y)
    }

    pub fn head(&self) -> Coordinates {
        // never empty: validated configs lay out at least one segment
        self.segments[0]
    }

    pub fn segments(&self) -> &VecDeque<Coordinates> {
        &self.segments
    }

    /// Number of segments, head included
    pub fn length(&self) -> usize {
        self.segments.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn food(&self) -> Coordinates {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
