use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Action names understood by the game. Config validation rejects any other
/// name in the bindings file.
pub const ACTIONS: [&str; 6] = ["up", "down", "left", "right", "restart", "quit"];

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub key: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
}

impl KeyBinding {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            modifiers: Vec::new(),
        }
    }

    pub fn with_modifier(mut self, modifier: &str) -> Self {
        self.modifiers.push(modifier.to_string());
        self
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        let key_matches = match event.code {
            KeyCode::Char(c) => self.key == c.to_string(),
            KeyCode::Enter => self.key == "enter",
            KeyCode::Esc => self.key == "esc",
            KeyCode::Left => self.key == "left",
            KeyCode::Right => self.key == "right",
            KeyCode::Up => self.key == "up",
            KeyCode::Down => self.key == "down",
            KeyCode::F(n) => self.key == format!("f{}", n),
            _ => false,
        };

        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
        let alt = event.modifiers.contains(KeyModifiers::ALT);

        // Shift is folded into the character itself, so it is not checked
        let modifiers_match = if self.modifiers.is_empty() {
            !ctrl && !alt
        } else {
            self.modifiers.iter().all(|m| match m.as_str() {
                "ctrl" => ctrl,
                "alt" => alt,
                "shift" => event.modifiers.contains(KeyModifiers::SHIFT),
                _ => false,
            })
        };

        key_matches && modifiers_match
    }

    // Modifier order and repeats do not change which keys match
    fn normalized(&self) -> (String, Vec<String>) {
        let mut modifiers = self.modifiers.clone();
        modifiers.sort();
        modifiers.dedup();
        (self.key.clone(), modifiers)
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in &self.modifiers {
            write!(f, "{}+", modifier)?;
        }
        write!(f, "{}", self.key)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    // Maps from action name to the keys that trigger it
    #[serde(default = "default_playing")]
    pub playing: HashMap<String, Vec<KeyBinding>>,
    #[serde(default = "default_game_over")]
    pub game_over: HashMap<String, Vec<KeyBinding>>,
}

fn keys(names: &[&str]) -> Vec<KeyBinding> {
    names.iter().map(|k| KeyBinding::new(k)).collect()
}

fn default_playing() -> HashMap<String, Vec<KeyBinding>> {
    let mut playing = HashMap::new();
    playing.insert("up".to_string(), keys(&["up", "k", "w"]));
    playing.insert("down".to_string(), keys(&["down", "j", "s"]));
    playing.insert("left".to_string(), keys(&["left", "h", "a"]));
    playing.insert("right".to_string(), keys(&["right", "l", "d"]));
    playing.insert(
        "quit".to_string(),
        vec![
            KeyBinding::new("q"),
            KeyBinding::new("esc"),
            KeyBinding::new("c").with_modifier("ctrl"),
        ],
    );
    playing
}

fn default_game_over() -> HashMap<String, Vec<KeyBinding>> {
    let mut game_over = HashMap::new();
    game_over.insert("restart".to_string(), keys(&["r", "enter"]));
    game_over.insert(
        "quit".to_string(),
        vec![
            KeyBinding::new("q"),
            KeyBinding::new("esc"),
            KeyBinding::new("c").with_modifier("ctrl"),
        ],
    );
    game_over
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            playing: default_playing(),
            game_over: default_game_over(),
        }
    }
}

impl KeyBindings {
    /// Action bound to `event` in the given table, if any
    pub fn lookup<'a>(
        table: &'a HashMap<String, Vec<KeyBinding>>,
        event: &KeyEvent,
    ) -> Option<&'a str> {
        table
            .iter()
            .find(|(_, bindings)| bindings.iter().any(|b| b.matches(event)))
            .map(|(action, _)| action.as_str())
    }

    /// Keys of `action` in the given table, joined for display, e.g. `r/enter`
    pub fn describe(table: &HashMap<String, Vec<KeyBinding>>, action: &str) -> String {
        table
            .get(action)
            .map(|bindings| {
                bindings
                    .iter()
                    .map(|b| b.to_string())
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .unwrap_or_default()
    }

    /// Keys bound to more than one action within the same table. `lookup`
    /// could return either action for such a key.
    pub fn conflicts(&self) -> Vec<String> {
        let mut conflicts = Vec::new();

        for (mode, table) in [("playing", &self.playing), ("game_over", &self.game_over)] {
            let mut actions: Vec<_> = table.iter().collect();
            actions.sort_by(|a, b| a.0.cmp(b.0));

            let mut seen: HashMap<(String, Vec<String>), &str> = HashMap::new();
            for (action, bindings) in actions {
                for binding in bindings {
                    let key = binding.normalized();
                    match seen.get(&key).copied() {
                        Some(other) if other != action.as_str() => conflicts.push(format!(
                            "{}: '{}' is bound to both {} and {}",
                            mode, binding, other, action
                        )),
                        Some(_) => {}
                        None => {
                            seen.insert(key, action.as_str());
                        }
                    }
                }
            }
        }

        conflicts
    }

    /// Names in either table that the game does not know about
    pub fn unknown_actions(&self) -> Vec<String> {
        self.playing
            .keys()
            .chain(self.game_over.keys())
            .filter(|name| !ACTIONS.contains(&name.as_str()))
            .cloned()
            .collect()
    }
}
