// ==================== Modules ====================
#[macro_use]
mod browser;
pub mod collision;
pub mod engine;
pub mod entity;
pub mod game;
pub mod grid;
mod hud;
pub mod placement;
pub mod sprite;
pub mod state;

use engine::GameLoop;
use game::GemCrossing;
use wasm_bindgen::prelude::*;

pub use browser::from_js_value;

// ==================== Main Functions ====================
/// Main entry for the WebAssembly module
/// - installs the panic hook
/// - loads assets, then starts ticking
#[wasm_bindgen]
pub fn main_js() -> Result<(), JsValue> {
    // better panic messages in the console
    console_error_panic_hook::set_once();

    browser::spawn_local(async move {
        if let Err(err) = GameLoop::start(GemCrossing::new()).await {
            error!("Could not start game : {:#?}", err);
        }
    });

    Ok(())
}
