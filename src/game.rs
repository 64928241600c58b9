use crate::browser;
use crate::engine::input::KeyState;
use crate::engine::{self, Game, Rect, Renderer};
use crate::entity::Direction;
use crate::grid::{Cell, Terrain, CANVAS_SIZE};
use crate::hud::{self, Hud};
use crate::sprite::{Renderable, SpriteId};
use crate::state::{DisplayState, GameState, LoopState};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use futures::future::try_join_all;
use serde::Deserialize;
use std::collections::HashMap;
use web_sys::HtmlImageElement;

/// ┌───────────────────────── Tick Overview ─────────────────────────┐
/// │                                                                 │
/// │  GameLoop ──update(dt)──► GemCrossing ──► GameState             │
/// │     │                        │   ├─ arrow keys → Player         │
/// │     │                        │   └─ enemies move, clock runs    │
/// │     ├──────draw()───────────►│ background, treasures,           │
/// │     │                        │ enemies, player                  │
/// │     └──────resolve()────────►│ win / hit / pickup → Hud         │
/// │                                                                 │
/// └─────────────────────────────────────────────────────────────────┘
pub enum GemCrossing {
    /// Waiting for the manifest and images
    Loading,

    /// Images ready, board in play
    Loaded(Crossing),
}

impl GemCrossing {
    const MANIFEST_PATH: &'static str = "assets.json";

    pub fn new() -> Self {
        GemCrossing::Loading
    }
}

impl Default for GemCrossing {
    fn default() -> Self {
        GemCrossing::new()
    }
}

#[async_trait(?Send)]
impl Game for GemCrossing {
    async fn initialize(&self) -> Result<Box<dyn Game>> {
        match self {
            GemCrossing::Loading => {
                let manifest = browser::fetch_json::<Manifest>(Self::MANIFEST_PATH)
                    .await
                    .with_context(|| {
                        format!("Failed to load asset manifest from : {}", Self::MANIFEST_PATH)
                    })?;
                let resources = Resources::load(&manifest).await?;
                log!("Loaded {} sprites", SpriteId::ALL.len());

                let canvas = browser::canvas()?;
                canvas.set_width(CANVAS_SIZE.width as u32);
                canvas.set_height(CANVAS_SIZE.height as u32);

                let crossing = Crossing {
                    state: GameState::from_entropy(),
                    resources,
                    hud: Hud::new()?,
                };
                crossing.hud.show(DisplayState::None)?;
                Ok(Box::new(GemCrossing::Loaded(crossing)))
            }
            GemCrossing::Loaded(_) => Err(anyhow!("Game is already initialized")),
        }
    }

    fn update(&mut self, delta: f64, keystate: &KeyState) {
        if let GemCrossing::Loaded(crossing) = self {
            for direction in keystate.released().filter_map(Direction::from_key_code) {
                crossing.state.handle_input(direction);
            }
            crossing.state.update(delta);
        }
    }

    fn draw(&self, renderer: &Renderer) {
        if let GemCrossing::Loaded(crossing) = self {
            renderer.clear(&Rect::new(Default::default(), CANVAS_SIZE));
            // back to front : tiles, treasures, bugs, player
            crossing.draw_background(renderer);
            for treasure in crossing.state.treasures() {
                crossing.draw_renderable(renderer, treasure);
            }
            for enemy in crossing.state.enemies() {
                crossing.draw_renderable(renderer, enemy);
            }
            crossing.draw_renderable(renderer, crossing.state.player());
        }
    }

    fn resolve(&mut self) -> LoopState {
        match self {
            GemCrossing::Loaded(crossing) => crossing.resolve(),
            GemCrossing::Loading => LoopState::Paused,
        }
    }

    fn restart(&mut self) {
        if let GemCrossing::Loaded(crossing) = self {
            log!("Restarting");
            crossing.state.restart();
            crossing.show_display();
        }
    }
}

pub struct Crossing {
    state: GameState,
    resources: Resources,
    hud: Hud,
}

impl Crossing {
    fn resolve(&mut self) -> LoopState {
        let loop_state = self.state.resolve();
        if loop_state == LoopState::Paused {
            match self.state.display() {
                DisplayState::Win { elapsed, treasures } => log!(
                    "Reached the water in {}s with {} treasures",
                    hud::format_seconds(elapsed),
                    treasures
                ),
                DisplayState::Lose => log!("ouch"),
                DisplayState::None => {}
            }
            self.show_display();
        } else {
            self.hud.set_elapsed(self.state.elapsed());
        }
        loop_state
    }

    fn show_display(&self) {
        if let Err(err) = self.hud.show(self.state.display()) {
            error!("{:#}", err);
        }
    }

    fn draw_background(&self, renderer: &Renderer) {
        for cell in Cell::all() {
            let sprite = Terrain::of_row(cell.row).sprite();
            if let Some(image) = self.resources.get(sprite) {
                renderer.draw_entire_image(image, &cell.origin());
            }
        }
    }

    fn draw_renderable(&self, renderer: &Renderer, item: &impl Renderable) {
        if !item.is_visible() {
            return;
        }
        let Some(image) = self.resources.get(item.sprite()) else {
            error!("No image loaded for sprite {}", item.sprite().name());
            return;
        };
        match item.size() {
            Some(size) => renderer.draw_scaled_image(image, &Rect::new(item.position(), size)),
            None => renderer.draw_entire_image(image, &item.position()),
        }
    }
}

/// `assets.json` : sprite name → image path
/// ```json
/// { "sprites": { "enemy-bug": "images/enemy-bug.png", ... } }
/// ```
#[derive(Debug, Deserialize, Clone)]
pub struct Manifest {
    pub sprites: HashMap<SpriteId, String>,
}

impl Manifest {
    /// Path for every sprite, failing on the first one missing
    pub fn paths(&self) -> Result<Vec<(SpriteId, &str)>> {
        SpriteId::ALL
            .iter()
            .map(|sprite| {
                self.sprites
                    .get(sprite)
                    .map(|path| (*sprite, path.as_str()))
                    .ok_or_else(|| anyhow!("Asset manifest has no entry for '{}'", sprite.name()))
            })
            .collect()
    }
}

/// Loaded image handles, one per sprite
pub struct Resources {
    images: HashMap<SpriteId, HtmlImageElement>,
}

impl Resources {
    async fn load(manifest: &Manifest) -> Result<Self> {
        let paths = manifest.paths()?;
        // all images load in parallel, total time is the slowest one
        let images = try_join_all(paths.into_iter().map(|(sprite, path)| async move {
            engine::load_image(path)
                .await
                .with_context(|| format!("Failed to load sprite '{}'", sprite.name()))
                .map(|image| (sprite, image))
        }))
        .await?;

        Ok(Resources {
            images: images.into_iter().collect(),
        })
    }

    pub fn get(&self, sprite: SpriteId) -> Option<&HtmlImageElement> {
        self.images.get(&sprite)
    }
}
