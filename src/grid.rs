use crate::engine::{Point, Size};
use crate::sprite::SpriteId;

// TABLE:
// ┌──────────────────────────── Board Layout ────────────────────────────┐
// │ row │ terrain │ y origin │ notes                                     │
// ├─────┼─────────┼──────────┼───────────────────────────────────────────┤
// │  0  │ water   │     0    │ win boundary, nothing spawns here         │
// │  1  │ stone   │    83    │ enemy lane 1 + treasures                  │
// │  2  │ stone   │   166    │ enemy lane 2 + treasures                  │
// │  3  │ stone   │   249    │ enemy lane 3 + treasures                  │
// │  4  │ grass   │   332    │ safe                                      │
// │  5  │ grass   │   415    │ safe, player start (col 2)                │
// └─────┴─────────┴──────────┴───────────────────────────────────────────┘
pub const CELL_WIDTH: f64 = 101.0;
pub const CELL_HEIGHT: f64 = 83.0;
pub const NUM_COLS: u8 = 5;
pub const NUM_ROWS: u8 = 6;

pub const CANVAS_WIDTH: f64 = CELL_WIDTH * NUM_COLS as f64;
// the last row of tiles is taller than a cell, hence the extra 108px
pub const CANVAS_HEIGHT: f64 = 606.0;

pub const CANVAS_SIZE: Size = Size {
    width: CANVAS_WIDTH,
    height: CANVAS_HEIGHT,
};

/// Rows treasures may be placed in: the three stone rows
pub const TREASURE_ROWS: std::ops::RangeInclusive<u8> = 1..=3;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: u8,
    pub col: u8,
}

impl Cell {
    pub const fn new(row: u8, col: u8) -> Self {
        Cell { row, col }
    }

    /// Top left corner of the cell in canvas pixels
    pub fn origin(&self) -> Point {
        Point {
            x: self.col as f64 * CELL_WIDTH,
            y: self.row as f64 * CELL_HEIGHT,
        }
    }

    /// Inverse of `origin` for any point inside the cell
    pub fn containing(point: Point) -> Self {
        Cell {
            row: (point.y / CELL_HEIGHT).floor().clamp(0.0, (NUM_ROWS - 1) as f64) as u8,
            col: (point.x / CELL_WIDTH).floor().clamp(0.0, (NUM_COLS - 1) as f64) as u8,
        }
    }

    /// Every cell of the board, row by row
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..NUM_ROWS).flat_map(|row| (0..NUM_COLS).map(move |col| Cell { row, col }))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Terrain {
    Water,
    Stone,
    Grass,
}

impl Terrain {
    pub fn of_row(row: u8) -> Self {
        match row {
            0 => Terrain::Water,
            1..=3 => Terrain::Stone,
            _ => Terrain::Grass,
        }
    }

    pub fn sprite(&self) -> SpriteId {
        match self {
            Terrain::Water => SpriteId::WaterBlock,
            Terrain::Stone => SpriteId::StoneBlock,
            Terrain::Grass => SpriteId::GrassBlock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn canvas_matches_board() {
        assert_relative_eq!(CANVAS_WIDTH, 505.0);
        assert_eq!(Cell::all().count(), 30);
    }

    #[test]
    fn cell_origin_round_trips_through_containing() {
        for cell in Cell::all() {
            let origin = cell.origin();
            let inside = Point {
                x: origin.x + 1.0,
                y: origin.y + 1.0,
            };
            assert_eq!(Cell::containing(inside), cell);
        }
    }

    #[test]
    fn rows_have_expected_terrain() {
        assert_eq!(Terrain::of_row(0), Terrain::Water);
        assert_eq!(Terrain::of_row(2), Terrain::Stone);
        assert_eq!(Terrain::of_row(5), Terrain::Grass);
        assert_eq!(Terrain::of_row(4).sprite(), SpriteId::GrassBlock);
    }
}
