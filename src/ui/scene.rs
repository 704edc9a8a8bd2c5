use anyhow::Result;
use tui::style::Color;

use crate::config::{parse_color, Theme};
use crate::game::{Cell, Session};
use super::surface::{PixelCircle, PixelRect, Surface};

// Gap between a cell's edge and the shape drawn in it, in pixels
const SEGMENT_INSET: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub snake: Color,
    pub food: Color,
    pub obstacle: Color,
    pub status_line_bg: Color,
    pub status_line_fg: Color,
}

impl Palette {
    pub fn from_theme(theme: &Theme) -> Result<Self> {
        Ok(Self {
            background: parse_color(&theme.background)?,
            snake: parse_color(&theme.snake)?,
            food: parse_color(&theme.food)?,
            obstacle: parse_color(&theme.obstacle)?,
            status_line_bg: parse_color(&theme.status_line_bg)?,
            status_line_fg: parse_color(&theme.status_line_fg)?,
        })
    }
}

/// Maps board cells to canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub cell_px: u32,
}

impl Geometry {
    fn inset(&self) -> u32 {
        if self.cell_px > SEGMENT_INSET * 2 {
            SEGMENT_INSET
        } else {
            0
        }
    }

    pub fn inset_rect(&self, cell: Cell) -> PixelRect {
        let inset = self.inset();
        let size = self.cell_px - inset * 2;
        PixelRect {
            x: cell.x * self.cell_px as i32 + inset as i32,
            y: cell.y * self.cell_px as i32 + inset as i32,
            width: size,
            height: size,
        }
    }

    pub fn circle(&self, cell: Cell) -> PixelCircle {
        let half = self.cell_px / 2;
        PixelCircle {
            cx: cell.x * self.cell_px as i32 + half as i32,
            cy: cell.y * self.cell_px as i32 + half as i32,
            radius: half.saturating_sub(SEGMENT_INSET),
        }
    }
}

/// Paint one frame: background, obstacles, food, then the snake with round
/// head and tail
pub fn draw_scene<S: Surface>(surface: &mut S, session: &Session, geometry: Geometry, palette: &Palette) {
    surface.fill_background(palette.background);

    for obstacle in session.obstacles() {
        surface.fill_rect(geometry.inset_rect(*obstacle), palette.obstacle);
    }

    surface.fill_circle(geometry.circle(session.food()), palette.food);

    let last = session.snake().len().saturating_sub(1);
    for (i, segment) in session.snake().iter().enumerate() {
        if i == 0 || i == last {
            surface.fill_circle(geometry.circle(*segment), palette.snake);
        } else {
            surface.fill_rect(geometry.inset_rect(*segment), palette.snake);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Grid, SpeedPolicy};
    use std::collections::VecDeque;

    #[derive(Debug, PartialEq)]
    enum Command {
        Background(Color),
        Rect(PixelRect, Color),
        Circle(PixelCircle, Color),
    }

    #[derive(Default)]
    struct RecordingSurface {
        commands: Vec<Command>,
    }

    impl Surface for RecordingSurface {
        fn fill_background(&mut self, color: Color) {
            self.commands.push(Command::Background(color));
        }

        fn fill_rect(&mut self, rect: PixelRect, color: Color) {
            self.commands.push(Command::Rect(rect, color));
        }

        fn fill_circle(&mut self, circle: PixelCircle, color: Color) {
            self.commands.push(Command::Circle(circle, color));
        }
    }

    #[test]
    fn test_palette_from_default_theme() {
        let palette = Palette::from_theme(&Theme::default()).unwrap();
        assert_eq!(palette.snake, Color::Rgb(0, 255, 0));
        assert_eq!(palette.background, Color::Rgb(0x22, 0x22, 0x22));
    }

    #[test]
    fn test_geometry() {
        let geometry = Geometry { cell_px: 20 };

        assert_eq!(
            geometry.inset_rect(Cell::new(3, 10)),
            PixelRect { x: 62, y: 202, width: 16, height: 16 }
        );
        assert_eq!(
            geometry.circle(Cell::new(3, 10)),
            PixelCircle { cx: 70, cy: 210, radius: 8 }
        );
    }

    #[test]
    fn test_draw_order() {
        let session = Session::from_layout(
            Grid::new(20),
            VecDeque::from(vec![Cell::new(2, 10), Cell::new(1, 10), Cell::new(0, 10)]),
            Direction::Right,
            Cell::new(5, 5),
            vec![Cell::new(8, 8)],
            SpeedPolicy::default(),
        );
        let palette = Palette::from_theme(&Theme::default()).unwrap();
        let geometry = Geometry { cell_px: 20 };
        let mut surface = RecordingSurface::default();

        draw_scene(&mut surface, &session, geometry, &palette);

        assert_eq!(
            surface.commands,
            vec![
                Command::Background(palette.background),
                Command::Rect(geometry.inset_rect(Cell::new(8, 8)), palette.obstacle),
                Command::Circle(geometry.circle(Cell::new(5, 5)), palette.food),
                Command::Circle(geometry.circle(Cell::new(2, 10)), palette.snake),
                Command::Rect(geometry.inset_rect(Cell::new(1, 10)), palette.snake),
                Command::Circle(geometry.circle(Cell::new(0, 10)), palette.snake),
            ]
        );
    }
}
