//! Tests that need a real browser. Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use gem_crossing::game::Manifest;
use gem_crossing::grid::Cell;
use gem_crossing::sprite::SpriteId;
use gem_crossing::state::{GameState, LoopState};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn manifest_deserializes_from_js_object() {
    let json = js_sys::JSON::parse(
        r#"{ "sprites": {
            "stone-block": "images/stone-block.png",
            "water-block": "images/water-block.png",
            "grass-block": "images/grass-block.png",
            "enemy-bug": "images/enemy-bug.png",
            "char-boy": "images/char-boy.png",
            "gem-green": "images/gem-green.png",
            "gem-blue": "images/gem-blue.png",
            "gem-orange": "images/gem-orange.png",
            "heart": "images/heart.png",
            "key": "images/key.png",
            "star": "images/star.png"
        } }"#,
    )
    .expect("valid json");

    let manifest: Manifest = gem_crossing::from_js_value(json).expect("manifest");
    let paths = manifest.paths().expect("every sprite listed");
    assert_eq!(paths.len(), SpriteId::ALL.len());
    assert!(paths.contains(&(SpriteId::CharBoy, "images/char-boy.png")));
}

#[wasm_bindgen_test]
fn unknown_sprite_name_is_rejected() {
    let json = js_sys::JSON::parse(r#"{ "sprites": { "dragon": "images/dragon.png" } }"#)
        .expect("valid json");
    assert!(gem_crossing::from_js_value::<Manifest>(json).is_err());
}

#[wasm_bindgen_test]
fn entropy_seeded_state_runs_in_browser() {
    // exercises getrandom's js backend
    let mut state = GameState::from_entropy();
    assert_eq!(state.treasures().len(), 5);
    assert_eq!(state.player().cell(), Cell::new(5, 2));
    // the start row has no enemy lane and no treasures
    state.update(0.016);
    assert_eq!(state.resolve(), LoopState::Running);
}
