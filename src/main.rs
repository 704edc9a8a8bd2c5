mod config;
mod game;
mod logging;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use std::path::PathBuf;
use std::{io, time::{Duration, Instant}};
use tui::{
    backend::CrosstermBackend,
    Terminal,
};

use config::Config;
use game::{Game, GameSettings};
use ui::{Geometry, Palette, Renderer, StatusHud};

// Input poll timeout once the session is over and the timer is stopped
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Tilesnake - grid snake with obstacle lines and speed progression
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Cli {
    /// Config file to use instead of the one in the user config directory
    #[clap(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seed for food and obstacle placement
    #[clap(long)]
    seed: Option<u64>,

    /// Play without obstacle lines
    #[clap(long)]
    no_obstacles: bool,

    /// Keep the same speed for the whole game
    #[clap(long)]
    constant_speed: bool,

    /// Where to write the log
    #[clap(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log at debug level
    #[clap(short, long)]
    verbose: bool,
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    renderer: &Renderer,
    mut game: Game<StatusHud>,
) -> Result<()> {
    game.start(Instant::now());

    loop {
        terminal.draw(|f| renderer.render(f, &game))?;

        let timeout = game.time_until_next(Instant::now()).unwrap_or(IDLE_POLL);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && !game.handle_key(key, Instant::now()) {
                    return Ok(());
                }
            }
        }

        game.on_timer(Instant::now());
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = match &cli.log_file {
        Some(path) => path.clone(),
        None => logging::default_log_path()?,
    };
    logging::init(&log_path, cli.verbose)?;

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if cli.no_obstacles {
        config.obstacles.enabled = false;
    }
    if cli.constant_speed {
        config.speed.progressive = false;
    }
    config.validate()?;

    let seed = cli.seed.unwrap_or_else(rand::random);
    let settings = GameSettings::from(&config);
    let renderer = Renderer::new(
        Palette::from_theme(&config.theme)?,
        Geometry { cell_px: config.grid.cell_size },
    );
    let game = Game::new(settings, config.key_bindings.clone(), seed, StatusHud::default());

    info!("Starting tilesnake with seed {}", seed);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &renderer, game);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        log::error!("Exiting on error: {:?}", err);
        println!("Error: {:?}", err);
    }

    Ok(())
}
