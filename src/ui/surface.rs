use tui::{
    style::{Color, Style},
    text::{Line, Span},
};

/// Axis-aligned rectangle in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x
            && py >= self.y
            && px < self.x + self.width as i32
            && py < self.y + self.height as i32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelCircle {
    pub cx: i32,
    pub cy: i32,
    pub radius: u32,
}

impl PixelCircle {
    fn contains(&self, px: i32, py: i32) -> bool {
        let dx = (px - self.cx) as i64;
        let dy = (py - self.cy) as i64;
        let r = self.radius as i64;
        dx * dx + dy * dy <= r * r
    }
}

/// Something the scene can be painted onto
pub trait Surface {
    fn fill_background(&mut self, color: Color);
    fn fill_rect(&mut self, rect: PixelRect, color: Color);
    fn fill_circle(&mut self, circle: PixelCircle, color: Color);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Block,
    Round,
}

/// Rasterises pixel shapes onto a grid of terminal cells, one terminal cell
/// per `scale × scale` pixel square. A cell is painted when its centre pixel
/// falls inside the shape.
pub struct TerminalSurface {
    width: usize,
    height: usize,
    scale: u32,
    background: Color,
    cells: Vec<Option<(Glyph, Color)>>,
}

impl TerminalSurface {
    pub fn new(width: usize, height: usize, scale: u32) -> Self {
        Self {
            width,
            height,
            scale: scale.max(1),
            background: Color::Reset,
            cells: vec![None; width * height],
        }
    }

    #[cfg(test)]
    pub fn glyph_at(&self, x: usize, y: usize) -> Option<(Glyph, Color)> {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            None
        }
    }

    fn paint(&mut self, glyph: Glyph, color: Color, inside: impl Fn(i32, i32) -> bool) {
        let half = (self.scale / 2) as i32;
        for y in 0..self.height {
            for x in 0..self.width {
                let px = x as i32 * self.scale as i32 + half;
                let py = y as i32 * self.scale as i32 + half;
                if inside(px, py) {
                    self.cells[y * self.width + x] = Some((glyph, color));
                }
            }
        }
    }

    /// Each board cell becomes two terminal columns so the board looks square
    pub fn lines(&self) -> Vec<Line<'static>> {
        let background = Style::default().bg(self.background);

        self.cells
            .chunks(self.width.max(1))
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|cell| match cell {
                        Some((Glyph::Block, color)) => Span::styled("██", background.fg(*color)),
                        Some((Glyph::Round, color)) => Span::styled("●●", background.fg(*color)),
                        None => Span::styled("  ", background),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

impl Surface for TerminalSurface {
    fn fill_background(&mut self, color: Color) {
        self.background = color;
        self.cells.iter_mut().for_each(|cell| *cell = None);
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        self.paint(Glyph::Block, color, |px, py| rect.contains(px, py));
    }

    fn fill_circle(&mut self, circle: PixelCircle, color: Color) {
        self.paint(Glyph::Round, color, |px, py| circle.contains(px, py));
    }
}
