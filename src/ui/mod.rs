mod hud;
mod scene;
mod surface;

pub use hud::StatusHud;
pub use scene::{draw_scene, Geometry, Palette};
pub use surface::TerminalSurface;

use tui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::config::KeyBindings;
use crate::game::Game;

/// Draws a game onto the terminal
pub struct Renderer {
    pub palette: Palette,
    pub geometry: Geometry,
}

impl Renderer {
    pub fn new(palette: Palette, geometry: Geometry) -> Self {
        Self { palette, geometry }
    }

    pub fn render<B: Backend>(&self, f: &mut Frame<B>, game: &Game<StatusHud>) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Min(1),    // Board
                Constraint::Length(1), // Status line
            ].as_ref())
            .split(size);

        let board_area = self.render_board(f, game, chunks[0]);

        if let Some(game_over) = &game.hud().game_over {
            let popup_area = centered_rect(60, 40, board_area);
            let text = format!(
                "The snake {}. Final score: {}",
                game_over.reason.describe(),
                game_over.final_score
            );
            let bindings = &game.bindings().game_over;
            let hint = format!(
                "Press {} to restart or {} to exit",
                KeyBindings::describe(bindings, "restart"),
                KeyBindings::describe(bindings, "quit")
            );
            render_game_over(f, popup_area, text, hint);
        }

        self.render_status_line(f, game, chunks[1]);
    }

    fn render_board<B: Backend>(&self, f: &mut Frame<B>, game: &Game<StatusHud>, area: Rect) -> Rect {
        let tiles = game.session().grid().tile_count().max(0) as u16;

        // Two columns per tile plus the border, centred in the free space
        let wanted = Rect {
            x: 0,
            y: 0,
            width: tiles.saturating_mul(2).saturating_add(2),
            height: tiles.saturating_add(2),
        };
        let board_area = center_within(wanted, area);

        let block = Block::default()
            .title(" TILESNAKE ")
            .title_style(Style::default().fg(self.palette.snake).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.palette.snake));

        let inner_area = block.inner(board_area);
        f.render_widget(block, board_area);

        let mut surface = TerminalSurface::new(tiles as usize, tiles as usize, self.geometry.cell_px);
        draw_scene(&mut surface, game.session(), self.geometry, &self.palette);

        let paragraph = Paragraph::new(surface.lines()).alignment(Alignment::Left);
        f.render_widget(paragraph, inner_area);

        board_area
    }

    fn render_status_line<B: Backend>(&self, f: &mut Frame<B>, game: &Game<StatusHud>, area: Rect) {
        let hud = game.hud();
        let bindings = game.bindings();

        let status = match &hud.game_over {
            Some(_) => format!(
                "GAME OVER | {} | {}: restart | {}: exit",
                hud.score,
                KeyBindings::describe(&bindings.game_over, "restart"),
                KeyBindings::describe(&bindings.game_over, "quit")
            ),
            None => format!(
                "{} | {}ms per move | {}: exit",
                hud.score,
                game.scheduler()
                    .period()
                    .unwrap_or_else(|| game.session().interval())
                    .as_millis(),
                KeyBindings::describe(&bindings.playing, "quit")
            ),
        };

        let status_bar = Paragraph::new(status).style(
            Style::default()
                .bg(self.palette.status_line_bg)
                .fg(self.palette.status_line_fg)
                .add_modifier(Modifier::BOLD),
        );

        f.render_widget(status_bar, area);
    }
}

fn render_game_over<B: Backend>(f: &mut Frame<B>, area: Rect, text: String, hint: String) {
    let block = Block::default()
        .title(" GAME OVER ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let inner = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            text,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(hint),
    ])
    .alignment(Alignment::Center);

    f.render_widget(paragraph, inner);
}

/// Place a rect of the wanted size in the middle of `r`, shrinking it if it
/// does not fit
fn center_within(wanted: Rect, r: Rect) -> Rect {
    let width = wanted.width.min(r.width);
    let height = wanted.height.min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}

// Helper function to create a centered rect using up certain percentage of the available rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ]
            .as_ref(),
        )
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;
    use crate::game::{Cell, Direction, GameSettings, Grid, Session, SpeedPolicy};
    use std::time::{Duration, Instant};
    use tui::{backend::TestBackend, Terminal};

    #[test]
    fn test_center_within() {
        let outer = Rect { x: 0, y: 0, width: 100, height: 30 };
        let wanted = Rect { x: 0, y: 0, width: 42, height: 22 };

        assert_eq!(center_within(wanted, outer), Rect { x: 29, y: 4, width: 42, height: 22 });

        let small = Rect { x: 2, y: 2, width: 10, height: 10 };
        assert_eq!(center_within(wanted, small), small);
    }

    #[test]
    fn test_render_shows_score() {
        let mut game = Game::new(
            GameSettings::default(),
            KeyBindings::default(),
            11,
            StatusHud::default(),
        );
        game.start(Instant::now());

        let renderer = Renderer::new(
            Palette::from_theme(&Theme::default()).unwrap(),
            Geometry { cell_px: 20 },
        );

        let backend = TestBackend::new(60, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| renderer.render(f, &game)).unwrap();

        let buffer = terminal.backend().buffer();
        let status_row: String = (0..buffer.area.width)
            .map(|x| buffer.get(x, 28).symbol.clone())
            .collect();
        assert!(status_row.contains("Score: 0"), "status row was {:?}", status_row);
        assert!(status_row.contains("q/esc/ctrl+c: exit"), "status row was {:?}", status_row);
    }

    #[test]
    fn test_game_over_hints_follow_bindings() {
        let mut bindings = KeyBindings::default();
        let l = bindings.playing["right"][1].clone();
        bindings.game_over.insert("restart".to_string(), vec![l]);

        let settings = GameSettings {
            obstacles: None,
            ..GameSettings::default()
        };
        let mut game = Game::new(settings, bindings, 3, StatusHud::default());
        *game.session_mut() = Session::from_layout(
            Grid::new(20),
            [(19, 4), (18, 4), (17, 4)].iter().map(|&c| Cell::from(c)).collect(),
            Direction::Right,
            Cell::new(0, 0),
            Vec::new(),
            SpeedPolicy::default(),
        );
        let t0 = Instant::now();
        game.start(t0);
        game.on_timer(t0 + Duration::from_millis(150));
        assert!(!game.session().is_running());

        let renderer = Renderer::new(
            Palette::from_theme(&Theme::default()).unwrap(),
            Geometry { cell_px: 20 },
        );
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        terminal.draw(|f| renderer.render(f, &game)).unwrap();

        let buffer = terminal.backend().buffer();
        let status_row: String = (0..buffer.area.width)
            .map(|x| buffer.get(x, 28).symbol.clone())
            .collect();
        assert!(status_row.contains("l: restart"), "status row was {:?}", status_row);
        assert!(!status_row.contains("r: restart"), "status row was {:?}", status_row);
    }
}
