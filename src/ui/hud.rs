use crate::game::{score_text, GameOver, Hud};

/// Score text and end-of-session notice for the terminal status line and
/// the game-over popup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusHud {
    pub score: String,
    pub game_over: Option<GameOver>,
}

impl Default for StatusHud {
    fn default() -> Self {
        Self {
            score: score_text(0),
            game_over: None,
        }
    }
}

impl Hud for StatusHud {
    fn session_started(&mut self) {
        self.game_over = None;
    }

    fn show_score(&mut self, text: &str) {
        self.score = text.to_string();
    }

    fn session_ended(&mut self, game_over: &GameOver) {
        self.game_over = Some(*game_over);
    }
}
