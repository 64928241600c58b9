use crate::engine::{Point, Size};
use crate::grid::{Cell, NUM_COLS, TREASURE_ROWS};
use crate::sprite::{Renderable, SpriteId};
use rand::Rng;

// treasure images are oversized, they get shrunk and nudged into the cell
const OFFSET: Point = Point { x: 15.0, y: 35.0 };
const DRAW_SIZE: Size = Size {
    width: 70.0,
    height: 90.0,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Treasure {
    cell: Cell,
    position: Point,
    sprite: SpriteId,
    grabbed: bool,
}

impl Treasure {
    pub fn new(sprite: SpriteId) -> Self {
        Treasure::at(sprite, Cell::new(*TREASURE_ROWS.start(), 0))
    }

    pub fn at(sprite: SpriteId, cell: Cell) -> Self {
        Treasure {
            cell,
            position: Self::position_of(cell),
            sprite,
            grabbed: false,
        }
    }

    fn position_of(cell: Cell) -> Point {
        let origin = cell.origin();
        Point {
            x: origin.x + OFFSET.x,
            y: origin.y + OFFSET.y,
        }
    }

    /// Pick a random stone cell and move there
    pub fn gen_pos<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cell = Cell {
            row: rng.gen_range(TREASURE_ROWS),
            col: rng.gen_range(0..NUM_COLS),
        };
        self.position = Self::position_of(self.cell);
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }

    pub fn grabbed(&self) -> bool {
        self.grabbed
    }

    /// Returns true only the first time
    pub fn grab(&mut self) -> bool {
        !std::mem::replace(&mut self.grabbed, true)
    }
}

impl Renderable for Treasure {
    fn sprite(&self) -> SpriteId {
        self.sprite
    }

    fn position(&self) -> Point {
        self.position
    }

    fn size(&self) -> Option<Size> {
        Some(DRAW_SIZE)
    }

    fn is_visible(&self) -> bool {
        !self.grabbed
    }
}
