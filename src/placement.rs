use crate::entity::Treasure;
use crate::sprite::{Renderable, SpriteId};
use rand::Rng;

/// Retries per treasure before a colliding spot is accepted anyway
pub const MAX_ATTEMPTS: u32 = 100;

/// One treasure per sprite in `SpriteId::TREASURES`, each on its own cell.
///
/// Every treasure gets up to `MAX_ATTEMPTS` random spots; a spot is rejected
/// while its pixel position equals one already placed. When the attempts run
/// out the last spot is kept, even if it overlaps.
pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Vec<Treasure> {
    let mut placed: Vec<Treasure> = Vec::with_capacity(SpriteId::TREASURES.len());
    for sprite in SpriteId::TREASURES {
        let mut treasure = Treasure::new(sprite);
        for _ in 0..MAX_ATTEMPTS {
            treasure.gen_pos(rng);
            if is_free(&placed, &treasure) {
                break;
            }
        }
        placed.push(treasure);
    }
    placed
}

fn is_free(placed: &[Treasure], candidate: &Treasure) -> bool {
    placed
        .iter()
        .all(|other| other.position() != candidate.position())
}
