use super::Direction;

/// A single tile on the board. Coordinates are signed so a head that steps
/// off the edge can still be represented and rejected by the wall check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step in `direction`
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Square board of `tile_count × tile_count` cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    tile_count: i32,
}

impl Grid {
    pub fn new(tile_count: i32) -> Self {
        Self { tile_count }
    }

    /// Derive the board from a canvas edge and a cell edge, both in pixels
    pub fn from_canvas(canvas_px: u32, cell_px: u32) -> Self {
        let tiles = canvas_px / cell_px.max(1);
        Self::new(i32::try_from(tiles).unwrap_or(i32::MAX))
    }

    pub fn tile_count(&self) -> i32 {
        self.tile_count
    }

    pub fn cell_count(&self) -> usize {
        let side = usize::try_from(self.tile_count).unwrap_or(0);
        side.saturating_mul(side)
    }

    pub fn center_row(&self) -> i32 {
        self.tile_count / 2
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.tile_count && cell.y < self.tile_count
    }
}
