use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tui::style::Color;

use crate::game::Grid;

mod key_bindings;
pub use key_bindings::KeyBindings;

/// Largest board edge, in tiles, that the terminal view is expected to draw
pub const MAX_TILE_COUNT: u32 = 256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub snake: SnakeConfig,
    #[serde(default)]
    pub speed: SpeedConfig,
    #[serde(default)]
    pub obstacles: ObstacleConfig,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub key_bindings: KeyBindings,
}

/// Board size, expressed the way a drawing canvas is: an edge length and a
/// cell size, both in pixels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_canvas_size")]
    pub canvas_size: u32,
    #[serde(default = "default_cell_size")]
    pub cell_size: u32,
}

fn default_canvas_size() -> u32 { 400 }
fn default_cell_size() -> u32 { 20 }

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakeConfig {
    #[serde(default = "default_initial_length")]
    pub initial_length: usize,
}

fn default_initial_length() -> usize { 3 }

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedConfig {
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,
    #[serde(default = "default_floor_ms")]
    pub floor_ms: u64,
    #[serde(default = "default_step_ms")]
    pub step_ms: u64,
    #[serde(default = "default_true")]
    pub progressive: bool,
}

fn default_initial_ms() -> u64 { 150 }
fn default_floor_ms() -> u64 { 50 }
fn default_step_ms() -> u64 { 5 }
fn default_true() -> bool { true }

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_line_count")]
    pub line_count: usize,
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,
    #[serde(default = "default_attempts_limit")]
    pub attempts_limit: usize,
}

fn default_line_count() -> usize { 10 }
fn default_max_line_length() -> usize { 4 }
fn default_attempts_limit() -> usize { 5000 }

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_snake")]
    pub snake: String,
    #[serde(default = "default_food")]
    pub food: String,
    #[serde(default = "default_obstacle")]
    pub obstacle: String,
    #[serde(default = "default_status_line_bg")]
    pub status_line_bg: String,
    #[serde(default = "default_status_line_fg")]
    pub status_line_fg: String,
}

fn default_background() -> String { "#222222".to_string() }
fn default_snake() -> String { "#00ff00".to_string() }
fn default_food() -> String { "#ffff00".to_string() }
fn default_obstacle() -> String { "#ff0000".to_string() }
fn default_status_line_bg() -> String { "#4b5263".to_string() }
fn default_status_line_fg() -> String { "#abb2bf".to_string() }

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            snake: SnakeConfig::default(),
            speed: SpeedConfig::default(),
            obstacles: ObstacleConfig::default(),
            theme: Theme::default(),
            key_bindings: KeyBindings::default(),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            canvas_size: default_canvas_size(),
            cell_size: default_cell_size(),
        }
    }
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            initial_length: default_initial_length(),
        }
    }
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            initial_ms: default_initial_ms(),
            floor_ms: default_floor_ms(),
            step_ms: default_step_ms(),
            progressive: default_true(),
        }
    }
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            line_count: default_line_count(),
            max_line_length: default_max_line_length(),
            attempts_limit: default_attempts_limit(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: default_background(),
            snake: default_snake(),
            food: default_food(),
            obstacle: default_obstacle(),
            status_line_bg: default_status_line_bg(),
            status_line_fg: default_status_line_fg(),
        }
    }
}

impl Config {
    /// Load from the user config directory, writing the defaults there on
    /// first run
    pub fn load() -> Result<Self> {
        let config_path = get_config_dir()?.join("config.toml");
        Self::load_or_create(&config_path)
    }

    /// Load from `path`; a missing file is created with the defaults
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load_from(path);
        }

        let config = Config::default();
        config.save_to(path)?;
        log::info!("Wrote default config to {:?}", path);

        Ok(config)
    }

    /// Load from an explicit file that must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {:?}", path))?;

        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory: {:?}", dir))?;
        }

        let config_str = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize config")?;

        fs::write(path, config_str)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid.cell_size == 0 {
            bail!("grid.cell_size must be greater than 0");
        }

        let tiles = self.grid.canvas_size / self.grid.cell_size;
        if !(2..=MAX_TILE_COUNT).contains(&tiles) {
            bail!(
                "grid.canvas_size {} with cells of {} gives {} tiles, expected 2 to {}",
                self.grid.canvas_size,
                self.grid.cell_size,
                tiles,
                MAX_TILE_COUNT
            );
        }

        let grid = Grid::from_canvas(self.grid.canvas_size, self.grid.cell_size);
        let tile_count = tiles as usize;

        if self.snake.initial_length == 0 || self.snake.initial_length >= tile_count {
            bail!(
                "snake.initial_length must be between 1 and {}",
                tile_count - 1
            );
        }

        if self.speed.floor_ms == 0 {
            bail!("speed.floor_ms must be greater than 0");
        }
        if self.speed.initial_ms < self.speed.floor_ms {
            bail!(
                "speed.initial_ms ({}) is below speed.floor_ms ({})",
                self.speed.initial_ms,
                self.speed.floor_ms
            );
        }

        if self.obstacles.enabled {
            if self.obstacles.max_line_length == 0 {
                bail!("obstacles.max_line_length must be greater than 0");
            }
            // Leaves room for the first food; later foods are handled by the
            // engine ending the game once the board is full
            let reserved = self.obstacles.line_count * self.obstacles.max_line_length
                + self.snake.initial_length;
            if reserved >= grid.cell_count() {
                bail!(
                    "obstacles would cover the whole {}x{} board",
                    tile_count,
                    tile_count
                );
            }
        }

        for (name, value) in [
            ("background", &self.theme.background),
            ("snake", &self.theme.snake),
            ("food", &self.theme.food),
            ("obstacle", &self.theme.obstacle),
            ("status_line_bg", &self.theme.status_line_bg),
            ("status_line_fg", &self.theme.status_line_fg),
        ] {
            parse_color(value).with_context(|| format!("theme.{} is not a valid color", name))?;
        }

        let unknown = self.key_bindings.unknown_actions();
        if !unknown.is_empty() {
            bail!("unknown key binding actions: {}", unknown.join(", "));
        }

        let conflicts = self.key_bindings.conflicts();
        if !conflicts.is_empty() {
            bail!("conflicting key bindings: {}", conflicts.join("; "));
        }

        Ok(())
    }
}

/// Parse a `#rrggbb` or `#rgb` color
pub fn parse_color(value: &str) -> Result<Color> {
    let hex = value
        .strip_prefix('#')
        .with_context(|| format!("Color must start with '#': {}", value))?;
    if !hex.is_ascii() {
        bail!("Bad hex digits in color: {}", value);
    }

    let channel = |s: &str| {
        u8::from_str_radix(s, 16).with_context(|| format!("Bad hex digits in color: {}", value))
    };

    match hex.len() {
        6 => Ok(Color::Rgb(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        3 => {
            let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
            Ok(Color::Rgb(expand(0)?, expand(1)?, expand(2)?))
        }
        _ => bail!("Color must have 3 or 6 hex digits: {}", value),
    }
}

pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .with_context(|| "Failed to determine config directory")?
        .join("tilesnake");

    Ok(config_dir)
}
