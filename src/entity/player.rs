use crate::engine::Point;
use crate::grid::{Cell, CELL_HEIGHT, CELL_WIDTH};
use crate::sprite::{Renderable, SpriteId};
use std::str::FromStr;

// the sprite sits 1px inside its cell
const CELL_INSET: f64 = 1.0;
const START: Cell = Cell::new(5, 2);

// Boundary checks are done on pixels, not rows/cols
// - WATER_LINE doubles as the win threshold : y < 80 means row 0
const WATER_LINE: f64 = 80.0;
const BOTTOM_LINE: f64 = 5.0 * CELL_HEIGHT;
const LEFT_LINE: f64 = 100.0;
const RIGHT_LINE: f64 = 4.0 * CELL_WIDTH;

// The visible character is narrower than its 101px image
pub const HIT_SPAN_OFFSET: f64 = 12.0;
pub const HIT_SPAN_WIDTH: f64 = 77.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Map a `KeyboardEvent.code` to a direction, arrow keys only
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" => Some(Direction::Left),
            "ArrowUp" => Some(Direction::Up),
            "ArrowRight" => Some(Direction::Right),
            "ArrowDown" => Some(Direction::Down),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDirection(pub String);

impl std::fmt::Display for UnknownDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown direction '{}'", self.0)
    }
}

impl std::error::Error for UnknownDirection {}

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            other => Err(UnknownDirection(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    position: Point,
    won: bool,
    treasures: u32,
}

impl Player {
    pub fn new() -> Self {
        Player {
            position: Self::start_position(),
            won: false,
            treasures: 0,
        }
    }

    fn start_position() -> Point {
        let origin = START.origin();
        Point {
            x: origin.x + CELL_INSET,
            y: origin.y + CELL_INSET,
        }
    }

    /// Step one cell, unless the board edge is in the way.
    /// Landing in the water row sets `won`, which sticks until `reset_pos`.
    pub fn handle_input(&mut self, direction: Direction) {
        match direction {
            Direction::Up if self.position.y >= WATER_LINE => self.position.y -= CELL_HEIGHT,
            Direction::Down if self.position.y <= BOTTOM_LINE => self.position.y += CELL_HEIGHT,
            Direction::Left if self.position.x >= LEFT_LINE => self.position.x -= CELL_WIDTH,
            Direction::Right if self.position.x <= RIGHT_LINE => self.position.x += CELL_WIDTH,
            _ => {}
        }

        if self.position.y < WATER_LINE {
            self.won = true;
        }
    }

    pub fn reset_pos(&mut self) {
        *self = Player::new();
    }

    pub fn cell(&self) -> Cell {
        Cell::containing(self.position)
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn treasures(&self) -> u32 {
        self.treasures
    }

    pub fn collect_treasure(&mut self) {
        self.treasures += 1;
    }

    /// Horizontal (left, right) interval used for enemy collisions
    pub fn hit_span(&self) -> (f64, f64) {
        let left = self.position.x + HIT_SPAN_OFFSET;
        (left, left + HIT_SPAN_WIDTH)
    }

    #[cfg(test)]
    pub(crate) fn place_at(&mut self, cell: Cell) {
        let origin = cell.origin();
        self.position = Point {
            x: origin.x + CELL_INSET,
            y: origin.y + CELL_INSET,
        };
    }
}

impl Default for Player {
    fn default() -> Self {
        Player::new()
    }
}

impl Renderable for Player {
    fn sprite(&self) -> SpriteId {
        SpriteId::CharBoy
    }

    fn position(&self) -> Point {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn starts_at_row_five_column_two() {
        let player = Player::new();
        assert_eq!(player.cell(), Cell::new(5, 2));
        assert_relative_eq!(player.position().x, 203.0);
        assert_relative_eq!(player.position().y, 416.0);
        assert!(!player.won());
        assert_eq!(player.treasures(), 0);
    }

    #[test]
    fn up_moves_one_row() {
        let mut player = Player::new();
        player.handle_input(Direction::Up);
        assert_eq!(player.cell(), Cell::new(4, 2));
        assert_relative_eq!(player.position().y, 416.0 - CELL_HEIGHT);
        assert!(!player.won());
    }

    #[test]
    fn five_ups_reach_the_water_and_win() {
        let mut player = Player::new();
        for _ in 0..4 {
            player.handle_input(Direction::Up);
            assert!(!player.won());
        }
        player.handle_input(Direction::Up);
        assert_eq!(player.cell().row, 0);
        assert!(player.won());

        // already topmost : no movement, still won
        let before = player.position();
        player.handle_input(Direction::Up);
        assert_eq!(player.position(), before);
        assert!(player.won());

        // won sticks even after stepping back down
        player.handle_input(Direction::Down);
        assert_eq!(player.cell().row, 1);
        assert!(player.won());
    }

    #[test]
    fn edges_block_movement() {
        let mut player = Player::new();
        player.handle_input(Direction::Down);
        assert_eq!(player.cell(), Cell::new(5, 2));

        for _ in 0..5 {
            player.handle_input(Direction::Left);
        }
        assert_eq!(player.cell(), Cell::new(5, 0));
        assert_relative_eq!(player.position().x, 1.0);

        for _ in 0..7 {
            player.handle_input(Direction::Right);
        }
        assert_eq!(player.cell(), Cell::new(5, 4));
        assert_relative_eq!(player.position().x, 405.0);
    }

    #[test]
    fn reset_restores_start_and_clears_progress() {
        let mut player = Player::new();
        for _ in 0..5 {
            player.handle_input(Direction::Up);
        }
        player.collect_treasure();
        player.reset_pos();
        assert_eq!(player.cell(), Cell::new(5, 2));
        assert!(!player.won());
        assert_eq!(player.treasures(), 0);
    }

    #[test]
    fn hit_span_is_inset_from_cell() {
        let player = Player::new();
        let (left, right) = player.hit_span();
        assert_relative_eq!(left, 215.0);
        assert_relative_eq!(right, 292.0);
    }

    #[test]
    fn parses_direction_names() {
        assert_eq!("up".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("right".parse::<Direction>(), Ok(Direction::Right));
        assert!("jump".parse::<Direction>().is_err());
        assert_eq!(Direction::from_key_code("ArrowDown"), Some(Direction::Down));
        assert_eq!(Direction::from_key_code("Space"), None);
    }
}
