use crate::collision::{self, Collision};
use crate::entity::{Direction, Enemy, Player, Treasure};
use crate::placement;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Running ticks every animation frame; Paused stops rescheduling until an
/// explicit restart
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Paused,
}

/// What the page should show over the board. Produced by the state, consumed
/// by the HUD; the core never touches the DOM.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum DisplayState {
    None,
    Win { elapsed: f64, treasures: u32 },
    Lose,
}

/// ┌────────────────────────── One Tick ──────────────────────────┐
/// │  apply queued input → update(dt) → draw → resolve()          │
/// │                                                              │
/// │  resolve():                                                  │
/// │    won?            → Win  message, Paused (state kept)       │
/// │    enemy hit?      → Lose message, reset, Paused             │
/// │    otherwise       → grab treasures, Running                 │
/// └──────────────────────────────────────────────────────────────┘
pub struct GameState {
    player: Player,
    enemies: Vec<Enemy>,
    treasures: Vec<Treasure>,
    elapsed: f64,
    display: DisplayState,
    rng: StdRng,
}

impl GameState {
    pub fn new(mut rng: StdRng) -> Self {
        let enemies = Enemy::spawn_all(&mut rng);
        let mut state = GameState {
            player: Player::new(),
            enemies,
            treasures: Vec::new(),
            elapsed: 0.0,
            display: DisplayState::None,
            rng,
        };
        state.reset();
        state
    }

    pub fn from_entropy() -> Self {
        GameState::new(StdRng::from_entropy())
    }

    /// Back to the start cell with fresh treasures and a zeroed clock.
    /// Enemies keep running where they are.
    pub fn reset(&mut self) {
        self.player.reset_pos();
        self.elapsed = 0.0;
        self.treasures = placement::generate(&mut self.rng);
    }

    /// Clear any message and start over
    pub fn restart(&mut self) {
        self.display = DisplayState::None;
        self.reset();
    }

    pub fn handle_input(&mut self, direction: Direction) {
        self.player.handle_input(direction);
    }

    /// Move enemies and advance the clock; `delta` is in seconds
    pub fn update(&mut self, delta: f64) {
        for enemy in self.enemies.iter_mut() {
            enemy.update(delta);
        }
        self.elapsed += delta;
    }

    /// Check for a terminal outcome after the frame has been drawn
    pub fn resolve(&mut self) -> LoopState {
        if self.player.won() {
            self.display = DisplayState::Win {
                elapsed: self.elapsed,
                treasures: self.player.treasures(),
            };
            return LoopState::Paused;
        }

        match collision::detect(&mut self.player, &self.enemies, &mut self.treasures) {
            Collision::Hit => {
                self.display = DisplayState::Lose;
                self.reset();
                LoopState::Paused
            }
            Collision::Clear { .. } => LoopState::Running,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn treasures(&self) -> &[Treasure] {
        &self.treasures
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn display(&self) -> DisplayState {
        self.display
    }

    #[cfg(test)]
    pub(crate) fn enemies_mut(&mut self) -> &mut Vec<Enemy> {
        &mut self.enemies
    }

    #[cfg(test)]
    pub(crate) fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }
}
