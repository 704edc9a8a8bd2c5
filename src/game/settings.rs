use std::time::Duration;

use crate::config::Config;
use super::{Grid, ObstacleSettings, SpeedPolicy};

/// Everything a session needs to know up front
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSettings {
    pub grid: Grid,
    pub initial_length: usize,
    pub speed: SpeedPolicy,
    /// `None` turns obstacle lines off entirely
    pub obstacles: Option<ObstacleSettings>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            grid: Grid::from_canvas(400, 20),
            initial_length: 3,
            speed: SpeedPolicy::default(),
            obstacles: Some(ObstacleSettings::default()),
        }
    }
}

impl From<&Config> for GameSettings {
    fn from(config: &Config) -> Self {
        let obstacles = config.obstacles.enabled.then(|| ObstacleSettings {
            line_count: config.obstacles.line_count,
            max_line_length: config.obstacles.max_line_length,
            attempts_limit: config.obstacles.attempts_limit,
        });

        Self {
            grid: Grid::from_canvas(config.grid.canvas_size, config.grid.cell_size),
            initial_length: config.snake.initial_length,
            speed: SpeedPolicy {
                initial: Duration::from_millis(config.speed.initial_ms),
                floor: Duration::from_millis(config.speed.floor_ms),
                step: Duration::from_millis(config.speed.step_ms),
                progressive: config.speed.progressive,
            },
            obstacles,
        }
    }
}
