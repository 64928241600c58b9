use crate::engine::{Point, Size};
use serde::Deserialize;

/// Every image the game draws. The manifest maps each id to an image path,
/// using the kebab-case name as key (e.g. `"enemy-bug"`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpriteId {
    StoneBlock,
    WaterBlock,
    GrassBlock,
    EnemyBug,
    CharBoy,
    GemGreen,
    GemBlue,
    GemOrange,
    Heart,
    Key,
    Star,
}

impl SpriteId {
    pub const ALL: [SpriteId; 11] = [
        SpriteId::StoneBlock,
        SpriteId::WaterBlock,
        SpriteId::GrassBlock,
        SpriteId::EnemyBug,
        SpriteId::CharBoy,
        SpriteId::GemGreen,
        SpriteId::GemBlue,
        SpriteId::GemOrange,
        SpriteId::Heart,
        SpriteId::Key,
        SpriteId::Star,
    ];

    /// Sprites handed out to treasures, one treasure each, in placement order
    pub const TREASURES: [SpriteId; 5] = [
        SpriteId::GemGreen,
        SpriteId::GemBlue,
        SpriteId::Star,
        SpriteId::Key,
        SpriteId::Heart,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SpriteId::StoneBlock => "stone-block",
            SpriteId::WaterBlock => "water-block",
            SpriteId::GrassBlock => "grass-block",
            SpriteId::EnemyBug => "enemy-bug",
            SpriteId::CharBoy => "char-boy",
            SpriteId::GemGreen => "gem-green",
            SpriteId::GemBlue => "gem-blue",
            SpriteId::GemOrange => "gem-orange",
            SpriteId::Heart => "heart",
            SpriteId::Key => "key",
            SpriteId::Star => "star",
        }
    }
}

/// Anything the renderer can put on the canvas
/// - `size` of None draws the image at its natural size
/// - invisible items are skipped entirely
pub trait Renderable {
    fn sprite(&self) -> SpriteId;
    fn position(&self) -> Point;

    fn size(&self) -> Option<Size> {
        None
    }

    fn is_visible(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let names: HashSet<_> = SpriteId::ALL.iter().map(SpriteId::name).collect();
        assert_eq!(names.len(), SpriteId::ALL.len());
    }

    #[test]
    fn treasure_sprites_are_distinct_and_known() {
        let treasures: HashSet<_> = SpriteId::TREASURES.iter().collect();
        assert_eq!(treasures.len(), 5);
        assert!(SpriteId::TREASURES.iter().all(|s| SpriteId::ALL.contains(s)));
        assert!(!treasures.contains(&SpriteId::GemOrange));
    }
}
