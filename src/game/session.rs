use log::info;
use rand::Rng;
use std::collections::VecDeque;
use std::time::Duration;

use super::placement::{generate_obstacles, place_food};
use super::{Cell, Direction, GameSettings, Grid, SpeedPolicy};

/// What ended the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Wall,
    SelfCollision,
    Obstacle,
    /// Snake and obstacles cover every cell, so no food can be placed
    BoardFull,
}

impl Collision {
    pub fn describe(&self) -> &'static str {
        match self {
            Collision::Wall => "hit the wall",
            Collision::SelfCollision => "bit its own tail",
            Collision::Obstacle => "crashed into an obstacle",
            Collision::BoardFull => "filled the whole board",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    pub reason: Collision,
    pub final_score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    GameOver(GameOver),
}

/// State of one play-through, from the first tick to game over
#[derive(Debug, Clone)]
pub struct Session {
    pub(super) grid: Grid,
    // Head at the front
    pub(super) snake: VecDeque<Cell>,
    pub(super) direction: Direction,
    pub(super) pending_direction: Direction,
    pub(super) food: Cell,
    pub(super) obstacles: Vec<Cell>,
    pub(super) score: u32,
    pub(super) interval: Duration,
    pub(super) speed: SpeedPolicy,
    pub(super) status: Status,
}

impl Session {
    /// Lay out a fresh board: snake first, then food, then obstacles
    /// around both.
    pub fn new<R: Rng + ?Sized>(settings: &GameSettings, rng: &mut R) -> Self {
        let grid = settings.grid;
        let row = grid.center_row();
        let snake: VecDeque<Cell> = (0..settings.initial_length as i32)
            .rev()
            .map(|x| Cell::new(x, row))
            .collect();

        let food = place_food(rng, grid, &snake, &[]);
        let obstacles = match &settings.obstacles {
            Some(obstacle_settings) => generate_obstacles(rng, grid, &snake, food, obstacle_settings),
            None => Vec::new(),
        };

        info!(
            "New session on {}x{} grid: {} obstacle cells, food at ({}, {})",
            grid.tile_count(),
            grid.tile_count(),
            obstacles.len(),
            food.x,
            food.y
        );

        Self::from_layout(grid, snake, Direction::Right, food, obstacles, settings.speed)
    }

    /// Build a session from an explicit board layout
    pub fn from_layout(
        grid: Grid,
        snake: VecDeque<Cell>,
        direction: Direction,
        food: Cell,
        obstacles: Vec<Cell>,
        speed: SpeedPolicy,
    ) -> Self {
        Self {
            grid,
            snake,
            direction,
            pending_direction: direction,
            food,
            obstacles,
            score: 0,
            interval: speed.initial,
            speed,
            status: Status::Running,
        }
    }

    /// Queue a turn for the next tick. Turning straight back onto the body
    /// is ignored. Returns whether the request was taken.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.snake.len() > 1 && direction.is_opposite(self.direction) {
            return false;
        }
        self.pending_direction = direction;
        true
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn snake(&self) -> &VecDeque<Cell> {
        &self.snake
    }

    pub fn head(&self) -> Option<Cell> {
        self.snake.front().copied()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn obstacles(&self) -> &[Cell] {
        &self.obstacles
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }
}
