mod direction;
mod engine;
mod grid;
mod input;
mod placement;
mod scheduler;
mod session;
mod settings;
mod speed;

pub use direction::Direction;
pub use engine::{tick, TickOutcome};
pub use grid::{Cell, Grid};
pub use input::{Action, InputController};
pub use placement::ObstacleSettings;
pub use scheduler::Scheduler;
pub use session::{Collision, GameOver, Session, Status};
pub use settings::GameSettings;
pub use speed::SpeedPolicy;

use crossterm::event::KeyEvent;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};

use crate::config::KeyBindings;

/// Where score changes and the end-of-session notice go
pub trait Hud {
    fn session_started(&mut self) {}
    fn show_score(&mut self, text: &str);
    fn session_ended(&mut self, game_over: &GameOver);
}

pub fn score_text(score: u32) -> String {
    format!("Score: {}", score)
}

/// Owns the running session and everything that drives it. Timer ticks and
/// key events are both dispatched through here, one at a time.
pub struct Game<H: Hud> {
    settings: GameSettings,
    session: Session,
    scheduler: Scheduler,
    input: InputController,
    rng: StdRng,
    hud: H,
}

impl<H: Hud> Game<H> {
    pub fn new(settings: GameSettings, bindings: KeyBindings, seed: u64, hud: H) -> Self {
        info!("Seeding game with {}", seed);
        let mut rng = StdRng::seed_from_u64(seed);
        let session = Session::new(&settings, &mut rng);

        Self {
            settings,
            session,
            scheduler: Scheduler::new(),
            input: InputController::new(bindings),
            rng,
            hud,
        }
    }

    /// Start ticking the current session
    pub fn start(&mut self, now: Instant) {
        self.scheduler.start(self.session.interval(), now);
        self.hud.session_started();
        self.hud.show_score(&score_text(self.session.score()));
    }

    /// Throw the current session away and begin a fresh one
    pub fn restart(&mut self, now: Instant) {
        info!("Restarting after score {}", self.session.score());
        self.scheduler.stop();
        self.session = Session::new(&self.settings, &mut self.rng);
        self.start(now);
    }

    /// Handle a key press. Returns false when the player wants to quit.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        match self.input.action_for(&key, self.session.is_running()) {
            Some(Action::Steer(direction)) => {
                self.session.request_direction(direction);
            }
            Some(Action::Restart) => self.restart(now),
            Some(Action::Quit) => return false,
            None => {}
        }
        true
    }

    /// Run the engine if a tick is due
    pub fn on_timer(&mut self, now: Instant) -> Option<TickOutcome> {
        if !self.scheduler.poll(now) {
            return None;
        }

        let outcome = tick(&mut self.session, &mut self.rng);
        match outcome {
            TickOutcome::Moved => {}
            TickOutcome::Ate { score, interval } => {
                self.hud.show_score(&score_text(score));
                if let Some(interval) = interval {
                    info!("Tick interval now {}ms", interval.as_millis());
                    self.scheduler.restart(interval, now);
                }
            }
            TickOutcome::Ended(game_over) => {
                self.scheduler.stop();
                self.hud.session_ended(&game_over);
            }
        }

        Some(outcome)
    }

    /// How long the event loop may wait for input before the next tick
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.scheduler.time_until_next(now)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn bindings(&self) -> &KeyBindings {
        self.input.bindings()
    }

    pub fn hud(&self) -> &H {
        &self.hud
    }

    #[cfg(test)]
    pub(crate) fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }
}
