use crossterm::event::KeyEvent;

use crate::config::KeyBindings;
use super::Direction;

/// What a key press asks the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Steer(Direction),
    Restart,
    Quit,
}

impl Action {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "up" => Some(Action::Steer(Direction::Up)),
            "down" => Some(Action::Steer(Direction::Down)),
            "left" => Some(Action::Steer(Direction::Left)),
            "right" => Some(Action::Steer(Direction::Right)),
            "restart" => Some(Action::Restart),
            "quit" => Some(Action::Quit),
            _ => None,
        }
    }
}

/// Translates raw key events into game actions using the configured bindings
pub struct InputController {
    bindings: KeyBindings,
}

impl InputController {
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Resolve a key; `running` selects between the in-play and game-over
    /// tables
    pub fn action_for(&self, key: &KeyEvent, running: bool) -> Option<Action> {
        let table = if running {
            &self.bindings.playing
        } else {
            &self.bindings.game_over
        };

        KeyBindings::lookup(table, key).and_then(Action::from_name)
    }
}
