use crate::entity::{Enemy, Player, Treasure};

/// What one collision pass found
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Collision {
    /// An enemy touched the player; treasures were not checked
    Hit,
    /// No hit; number of treasures picked up this pass (may be 0)
    Clear { grabbed: u32 },
}

/// True when an enemy body and a hit-span (both closed intervals) overlap:
/// - the hit-span's left edge falls inside the body
/// - the hit-span's right edge falls inside the body
/// - the body lies entirely inside the hit-span
pub fn spans_overlap(body: (f64, f64), hit_span: (f64, f64)) -> bool {
    let (body_left, body_right) = body;
    let (span_left, span_right) = hit_span;

    (body_left <= span_left && body_right >= span_left)
        || (body_left <= span_right && body_right >= span_right)
        || (body_left >= span_left && body_right <= span_right)
}

/// Only enemies running in the player's row can hit
pub fn enemy_hits_player(enemy: &Enemy, player: &Player) -> bool {
    enemy.lane() == player.cell().row && spans_overlap(enemy.body_span(), player.hit_span())
}

/// Enemies first; treasures are only collected on a hit-free pass
pub fn detect(player: &mut Player, enemies: &[Enemy], treasures: &mut [Treasure]) -> Collision {
    if enemies.iter().any(|enemy| enemy_hits_player(enemy, player)) {
        return Collision::Hit;
    }

    let cell = player.cell();
    let mut grabbed = 0;
    for treasure in treasures.iter_mut().filter(|t| t.cell() == cell) {
        if treasure.grab() {
            player.collect_treasure();
            grabbed += 1;
        }
    }
    Collision::Clear { grabbed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;
    use crate::sprite::SpriteId;

    fn player_in_row_three() -> Player {
        let mut player = Player::new();
        player.place_at(Cell::new(3, 2));
        player
    }

    // player at col 2 -> hit-span [215, 292]
    #[test]
    fn span_left_edge_inside_body() {
        let player = player_in_row_three();
        assert!(enemy_hits_player(&Enemy::new(3, 200.0, 0.0), &player));
    }

    #[test]
    fn span_right_edge_inside_body() {
        let player = player_in_row_three();
        assert!(enemy_hits_player(&Enemy::new(3, 250.0, 0.0), &player));
    }

    #[test]
    fn body_inside_span() {
        // only reachable with a body narrower than the hit-span
        assert!(spans_overlap((220.0, 280.0), (215.0, 292.0)));
        assert!(!spans_overlap((300.0, 310.0), (215.0, 292.0)));
    }

    #[test]
    fn touching_edges_count_as_hit() {
        let player = player_in_row_three();
        assert!(enemy_hits_player(&Enemy::new(3, 114.0, 0.0), &player));
        assert!(enemy_hits_player(&Enemy::new(3, 292.0, 0.0), &player));
    }

    #[test]
    fn no_hit_when_spans_apart() {
        let player = player_in_row_three();
        assert!(!enemy_hits_player(&Enemy::new(3, 113.0, 0.0), &player));
        assert!(!enemy_hits_player(&Enemy::new(3, 292.5, 0.0), &player));
    }

    #[test]
    fn no_hit_in_other_lane() {
        let player = player_in_row_three();
        assert!(!enemy_hits_player(&Enemy::new(2, 215.0, 0.0), &player));
    }

    #[test]
    fn hit_skips_treasures() {
        let mut player = player_in_row_three();
        let enemies = [Enemy::new(3, 200.0, 0.0)];
        let mut treasures = [Treasure::at(SpriteId::Key, Cell::new(3, 2))];
        assert_eq!(detect(&mut player, &enemies, &mut treasures), Collision::Hit);
        assert!(!treasures[0].grabbed());
        assert_eq!(player.treasures(), 0);
    }

    #[test]
    fn treasure_is_grabbed_once() {
        let mut player = player_in_row_three();
        let enemies = [Enemy::new(1, 200.0, 0.0)];
        let mut treasures = [
            Treasure::at(SpriteId::Key, Cell::new(3, 2)),
            Treasure::at(SpriteId::Star, Cell::new(3, 3)),
        ];
        assert_eq!(
            detect(&mut player, &enemies, &mut treasures),
            Collision::Clear { grabbed: 1 }
        );
        assert_eq!(
            detect(&mut player, &enemies, &mut treasures),
            Collision::Clear { grabbed: 0 }
        );
        assert_eq!(player.treasures(), 1);
        assert!(treasures[0].grabbed());
        assert!(!treasures[1].grabbed());
    }
}
