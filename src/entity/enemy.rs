use crate::engine::Point;
use crate::grid::{CANVAS_WIDTH, CELL_HEIGHT};
use crate::sprite::{Renderable, SpriteId};
use rand::Rng;

pub const BODY_WIDTH: f64 = 101.0;

// bug images are shorter than a cell, so they sit 68px down from the lane top
const LANE_Y_OFFSET: f64 = 68.0;
const SPAWN_X: f64 = -80.0;
const WRAP_MARGIN: f64 = 70.0;
const WRAP_X: f64 = -50.0;

/// Starting spread for one lane
/// - x = SPAWN_X + [0, max_offset)
/// - speed = base_speed + [0, speed_jitter)
#[derive(Debug, Copy, Clone)]
pub struct LaneProfile {
    pub lane: u8,
    pub max_offset: u32,
    pub base_speed: u32,
    pub speed_jitter: u32,
}

pub const LANES: [LaneProfile; 3] = [
    LaneProfile {
        lane: 1,
        max_offset: 505,
        base_speed: 30,
        speed_jitter: 40,
    },
    LaneProfile {
        lane: 2,
        max_offset: 200,
        base_speed: 40,
        speed_jitter: 50,
    },
    LaneProfile {
        lane: 3,
        max_offset: 400,
        base_speed: 40,
        speed_jitter: 25,
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    x: f64,
    speed: f64,
    lane: u8,
}

impl Enemy {
    pub fn new(lane: u8, x: f64, speed: f64) -> Self {
        Enemy { x, speed, lane }
    }

    /// Randomize starting offset and speed within the lane's profile
    pub fn spawn<R: Rng + ?Sized>(profile: &LaneProfile, rng: &mut R) -> Self {
        let offset = rng.gen_range(0..profile.max_offset);
        let jitter = rng.gen_range(0..profile.speed_jitter);
        Enemy {
            x: SPAWN_X + offset as f64,
            speed: (profile.base_speed + jitter) as f64,
            lane: profile.lane,
        }
    }

    /// One of each lane
    pub fn spawn_all<R: Rng + ?Sized>(rng: &mut R) -> Vec<Self> {
        LANES.iter().map(|profile| Enemy::spawn(profile, rng)).collect()
    }

    /// Advance by `speed * delta` (delta in seconds), wrapping back to the
    /// left once the bug is fully off the right edge
    pub fn update(&mut self, delta: f64) {
        self.x += self.speed * delta;
        if self.x > CANVAS_WIDTH + WRAP_MARGIN {
            self.x = WRAP_X;
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn lane(&self) -> u8 {
        self.lane
    }

    /// Horizontal (left, right) interval of the bug's body
    pub fn body_span(&self) -> (f64, f64) {
        (self.x, self.x + BODY_WIDTH)
    }
}

impl Renderable for Enemy {
    fn sprite(&self) -> SpriteId {
        SpriteId::EnemyBug
    }

    fn position(&self) -> Point {
        Point {
            x: self.x,
            y: f64::from(self.lane.saturating_sub(1)) * CELL_HEIGHT + LANE_Y_OFFSET,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn update_scales_with_delta() {
        let mut enemy = Enemy::new(1, 10.0, 50.0);
        enemy.update(0.5);
        assert_relative_eq!(enemy.x(), 35.0);
        enemy.update(0.016);
        assert_relative_eq!(enemy.x(), 35.8);
    }

    #[test]
    fn wraps_exactly_to_left_offset() {
        let mut enemy = Enemy::new(2, 570.0, 100.0);
        enemy.update(0.04);
        assert_relative_eq!(enemy.x(), 574.0);
        enemy.update(0.02);
        assert_relative_eq!(enemy.x(), WRAP_X);
    }

    #[test]
    fn spawn_stays_inside_lane_profile() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let enemies = Enemy::spawn_all(&mut rng);
            assert_eq!(enemies.len(), 3);
            for (enemy, profile) in enemies.iter().zip(LANES.iter()) {
                assert_eq!(enemy.lane(), profile.lane);
                assert!(enemy.x() >= SPAWN_X);
                assert!(enemy.x() < SPAWN_X + profile.max_offset as f64);
                assert!(enemy.speed() >= profile.base_speed as f64);
                assert!(enemy.speed() < (profile.base_speed + profile.speed_jitter) as f64);
            }
        }
    }

    #[test]
    fn lanes_draw_on_stone_rows() {
        let ys: Vec<f64> = LANES
            .iter()
            .map(|profile| Enemy::new(profile.lane, 0.0, 0.0).position().y)
            .collect();
        assert_relative_eq!(ys[0], 68.0);
        assert_relative_eq!(ys[1], 151.0);
        assert_relative_eq!(ys[2], 234.0);
    }
}
