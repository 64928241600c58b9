// TABLE:
// ┌──────────────┬────────────────────────────────────────────────────────┐
// │ Entity       │ Owns                                                   │
// ├──────────────┼────────────────────────────────────────────────────────┤
// │ Player       │ pixel position, won flag, treasure count               │
// │ Enemy        │ lane, x, speed (px / second)                           │
// │ Treasure     │ cell, pixel position, sprite, grabbed flag             │
// └──────────────┴────────────────────────────────────────────────────────┘
// None of them know about each other; `collision` and `state` tie them
// together.
pub mod enemy;
pub mod player;
pub mod treasure;

pub use enemy::Enemy;
pub use player::{Direction, Player};
pub use treasure::Treasure;
