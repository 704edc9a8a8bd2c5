//! Rejection sampling of free cells for food and obstacle lines.

use log::debug;
use rand::Rng;
use std::collections::VecDeque;

use super::{Cell, Grid};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObstacleSettings {
    /// Number of lines aimed for; the cell target is `line_count * max_line_length`
    pub line_count: usize,
    pub max_line_length: usize,
    /// Candidate lines tried before settling for a partial field
    pub attempts_limit: usize,
}

impl Default for ObstacleSettings {
    fn default() -> Self {
        Self {
            line_count: 10,
            max_line_length: 4,
            attempts_limit: 5000,
        }
    }
}

impl ObstacleSettings {
    pub fn target_cells(&self) -> usize {
        self.line_count * self.max_line_length
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Orientation {
    Horizontal,
    Vertical,
}

/// Pick a random cell that is free of snake and obstacles.
///
/// There is no attempt cap: the board must have at least one free cell or
/// this never returns.
pub fn place_food<R: Rng + ?Sized>(
    rng: &mut R,
    grid: Grid,
    snake: &VecDeque<Cell>,
    obstacles: &[Cell],
) -> Cell {
    loop {
        let candidate = random_cell(rng, grid);
        if !snake.contains(&candidate) && !obstacles.contains(&candidate) {
            return candidate;
        }
    }
}

/// Scatter straight obstacle lines over the board, avoiding the snake, the
/// food and each other. A candidate line is kept whole or dropped whole.
///
/// Running out of attempts is not an error: whatever was placed so far is
/// returned.
pub fn generate_obstacles<R: Rng + ?Sized>(
    rng: &mut R,
    grid: Grid,
    snake: &VecDeque<Cell>,
    food: Cell,
    settings: &ObstacleSettings,
) -> Vec<Cell> {
    let mut obstacles: Vec<Cell> = Vec::new();
    let target = settings.target_cells();
    let max_len = settings.max_line_length.min(grid.tile_count() as usize);

    if max_len == 0 {
        return obstacles;
    }

    let mut attempts = 0;
    while obstacles.len() < target && attempts < settings.attempts_limit {
        attempts += 1;

        let line = random_line(rng, grid, max_len);
        let blocked = line
            .iter()
            .any(|cell| snake.contains(cell) || *cell == food || obstacles.contains(cell));

        if !blocked {
            obstacles.extend(line);
        }
    }

    if obstacles.len() < target {
        debug!(
            "Obstacle placement gave up after {} attempts with {}/{} cells",
            attempts,
            obstacles.len(),
            target
        );
    }

    obstacles
}

fn random_cell<R: Rng + ?Sized>(rng: &mut R, grid: Grid) -> Cell {
    let n = grid.tile_count();
    Cell::new(rng.gen_range(0..n), rng.gen_range(0..n))
}

fn random_line<R: Rng + ?Sized>(rng: &mut R, grid: Grid, max_len: usize) -> Vec<Cell> {
    let n = grid.tile_count();
    let orientation = if rng.gen_bool(0.5) {
        Orientation::Horizontal
    } else {
        Orientation::Vertical
    };
    let len = rng.gen_range(1..=max_len) as i32;

    // The whole line has to fit, so the start is drawn from the shortened axis
    let start = match orientation {
        Orientation::Horizontal => Cell::new(rng.gen_range(0..=n - len), rng.gen_range(0..n)),
        Orientation::Vertical => Cell::new(rng.gen_range(0..n), rng.gen_range(0..=n - len)),
    };

    (0..len)
        .map(|i| match orientation {
            Orientation::Horizontal => Cell::new(start.x + i, start.y),
            Orientation::Vertical => Cell::new(start.x, start.y + i),
        })
        .collect()
}
