use crate::browser;
use crate::state::LoopState;
use anyhow::{anyhow, Context, Error, Result};
// wasm is single threaded, so Rc RefCell over Arc Mutex
use async_trait::async_trait;
use futures::channel::mpsc::UnboundedReceiver;
use futures::channel::oneshot::channel;
use futures::StreamExt;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{
    // unchecked_ref casts the closure into a js Function; we build the
    // closures ourselves so the type is known to be right
    JsCast,
    JsValue,
};
use web_sys::{CanvasRenderingContext2d, HtmlElement, HtmlImageElement};

use self::input::{KeyPress, KeyState};

#[async_trait(?Send)]
pub trait Game {
    async fn initialize(&self) -> Result<Box<dyn Game>>;
    /// `delta` is the time since the previous tick, in seconds
    fn update(&mut self, delta: f64, keystate: &KeyState);
    fn draw(&self, renderer: &Renderer);
    /// Runs after `draw`; Paused stops the loop
    fn resolve(&mut self) -> LoopState;
    /// Called when the player asks for a new game while paused
    fn restart(&mut self);
}

/// ┌──────────────────────── Loop States ────────────────────────┐
/// │                                                             │
/// │   start ──► Running ── resolve() == Paused ──► Paused       │
/// │               ▲                                  │          │
/// │               └────────── restart click ─────────┘          │
/// │                                                             │
/// │ Running : every frame requests the next one                 │
/// │ Paused  : nothing is requested, so no more ticks happen     │
/// └─────────────────────────────────────────────────────────────┘
pub struct GameLoop {
    last_frame: f64,
    state: LoopState,
    keystate: KeyState,
    keyevent_receiver: UnboundedReceiver<KeyPress>,
}

type SharedLoopClosure = Rc<RefCell<Option<browser::LoopClosure>>>;

impl GameLoop {
    pub async fn start(game: impl Game + 'static) -> Result<()> {
        let keyevent_receiver = input::prepare_input()?;
        let mut restart_receiver = add_click_handler(browser::element(
            browser::html::RESTART_BUTTON_ID,
        )?);

        let game = Rc::new(RefCell::new(game.initialize().await?));
        let game_loop = Rc::new(RefCell::new(GameLoop {
            last_frame: browser::now()?,
            state: LoopState::Running,
            keystate: KeyState::new(),
            keyevent_receiver,
        }));
        let renderer = Renderer::new(browser::context()?);

        let f: SharedLoopClosure = Rc::new(RefCell::new(None));
        let g = f.clone();
        {
            let game = game.clone();
            let game_loop = game_loop.clone();
            *g.borrow_mut() = Some(browser::create_raf_closure(move |perf: f64| {
                let mut game_loop = game_loop.borrow_mut();
                let mut game = game.borrow_mut();

                let delta = game_loop.advance(perf);
                game.update(delta, &game_loop.keystate);
                game.draw(&renderer);
                game_loop.state = game.resolve();

                if game_loop.state == LoopState::Running {
                    if let Some(closure) = f.borrow().as_ref() {
                        if let Err(err) = browser::request_animation_frame(closure) {
                            error!("GameLoop: {:#}", err);
                        }
                    }
                }
            }));
        }

        browser::request_animation_frame(
            g.borrow()
                .as_ref()
                .ok_or_else(|| anyhow!("GameLoop: Loop is None"))?,
        )?;

        browser::spawn_local(async move {
            while restart_receiver.next().await.is_some() {
                if let Err(err) = GameLoop::resume(&game, &game_loop, &g) {
                    error!("GameLoop: could not restart : {:#}", err);
                }
            }
        });

        Ok(())
    }

    /// Seconds since the previous frame, after draining this frame's input
    fn advance(&mut self, perf: f64) -> f64 {
        let delta = frame_delta(self.last_frame, perf);
        self.last_frame = perf;
        input::process_input(&mut self.keystate, &mut self.keyevent_receiver);
        delta
    }

    /// Keys pressed while paused belong to the finished game
    fn discard_input(&mut self) {
        input::process_input(&mut self.keystate, &mut self.keyevent_receiver);
        self.keystate = KeyState::new();
    }

    fn resume(
        game: &Rc<RefCell<Box<dyn Game>>>,
        game_loop: &Rc<RefCell<GameLoop>>,
        closure: &SharedLoopClosure,
    ) -> Result<()> {
        let mut game_loop = game_loop.borrow_mut();
        // a click while running must not start a second loop
        if game_loop.state == LoopState::Running {
            return Ok(());
        }

        game_loop.discard_input();
        game_loop.last_frame = browser::now()?;
        game_loop.state = LoopState::Running;
        game.borrow_mut().restart();

        browser::request_animation_frame(
            closure
                .borrow()
                .as_ref()
                .ok_or_else(|| anyhow!("GameLoop: Loop is None"))?,
        )?;
        Ok(())
    }
}

/// Time between two millisecond frame timestamps, in seconds.
/// A rAF timestamp can predate a `now()` taken just before the request, so
/// the result never goes below zero.
pub fn frame_delta(last_frame: f64, perf: f64) -> f64 {
    ((perf - last_frame) / 1000.0).max(0.0)
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Rect {
    pub position: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(position: Point, size: Size) -> Self {
        Rect { position, size }
    }
}

pub struct Renderer {
    context: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn new(context: CanvasRenderingContext2d) -> Self {
        Renderer { context }
    }

    pub fn clear(&self, rect: &Rect) {
        self.context.clear_rect(
            rect.position.x,
            rect.position.y,
            rect.size.width,
            rect.size.height,
        );
    }

    /// Draw the whole image at its natural size
    pub fn draw_entire_image(&self, image: &HtmlImageElement, position: &Point) {
        if let Err(err) = self
            .context
            .draw_image_with_html_image_element(image, position.x, position.y)
        {
            error!("Renderer: draw failed : {:#?}", err);
        }
    }

    /// Draw the whole image squeezed into `destination`
    pub fn draw_scaled_image(&self, image: &HtmlImageElement, destination: &Rect) {
        if let Err(err) = self.context.draw_image_with_html_image_element_and_dw_and_dh(
            image,
            destination.position.x,
            destination.position.y,
            destination.size.width,
            destination.size.height,
        ) {
            error!("Renderer: draw failed : {:#?}", err);
        }
    }
}

/// Asynchronously load an image from a given source path
/// # Arguments
/// * `source` - string slice to path/url
/// # Returns
/// * `Ok(HtmlImageElement)` - on load success
/// * `Err` - on load fail
pub async fn load_image(source: &str) -> Result<HtmlImageElement> {
    let image = browser::create_html_image_element()?;
    let (tx, rx) = channel::<Result<(), Error>>();
    let success_tx = Rc::new(RefCell::new(Some(tx)));
    let error_tx = success_tx.clone();

    let success_callback = browser::closure_once(move || {
        if let Some(tx) = success_tx.borrow_mut().take() {
            let _ = tx.send(Ok(()));
        }
    });

    let source_name = source.to_string();
    let error_callback = browser::closure_once(move |err: JsValue| {
        if let Some(tx) = error_tx.borrow_mut().take() {
            let _ = tx.send(Err(anyhow!(
                "Error loading image {} : {:#?}",
                source_name,
                err
            )));
        }
    });

    image.set_onload(Some(success_callback.as_ref().unchecked_ref()));
    image.set_onerror(Some(error_callback.as_ref().unchecked_ref()));
    image.set_src(source);

    // keep callbacks alive until the image loads or errors
    success_callback.forget();
    error_callback.forget();

    // Result<Result<(), Error>, oneshot::Canceled>
    // - first ? : channel result
    // - second ? : image load result
    rx.await
        .with_context(|| format!("image loader for {} went away", source))??;

    Ok(image)
}

/// Each click on `element` becomes one `()` on the returned stream
pub fn add_click_handler(element: HtmlElement) -> UnboundedReceiver<()> {
    let (mut click_sender, click_receiver) = futures::channel::mpsc::unbounded();
    let on_click = browser::closure_wrap(Box::new(move || {
        let _ = click_sender.start_send(());
    }) as Box<dyn FnMut()>);
    element.set_onclick(Some(on_click.as_ref().unchecked_ref()));
    on_click.forget();
    click_receiver
}

pub mod input {
    use crate::browser;
    use anyhow::Result;
    use futures::channel::mpsc::{unbounded, UnboundedReceiver};
    use wasm_bindgen::JsCast;

    pub enum KeyPress {
        KeyUp(web_sys::KeyboardEvent),
    }

    /// Keys released since the previous tick, oldest first.
    /// Movement is one cell per release, so held keys do not repeat.
    #[derive(Debug, Default)]
    pub struct KeyState {
        released: Vec<String>,
    }

    impl KeyState {
        pub fn new() -> Self {
            KeyState::default()
        }

        pub fn released(&self) -> impl Iterator<Item = &str> {
            self.released.iter().map(String::as_str)
        }

        pub fn release(&mut self, code: &str) {
            self.released.push(code.to_string());
        }

        fn clear(&mut self) {
            self.released.clear();
        }
    }

    pub fn prepare_input() -> Result<UnboundedReceiver<KeyPress>> {
        let (mut keyup_sender, keyevent_receiver) = unbounded();
        let onkeyup = browser::closure_wrap(Box::new(move |keycode: web_sys::KeyboardEvent| {
            let _ = keyup_sender.start_send(KeyPress::KeyUp(keycode));
        }) as Box<dyn FnMut(web_sys::KeyboardEvent)>);

        browser::document()?.set_onkeyup(Some(onkeyup.as_ref().unchecked_ref()));
        onkeyup.forget();
        Ok(keyevent_receiver)
    }

    /// Replace the key state with whatever arrived since the last call
    pub fn process_input(state: &mut KeyState, receiver: &mut UnboundedReceiver<KeyPress>) {
        state.clear();
        loop {
            match receiver.try_next() {
                Ok(None) => break,
                Err(_err) => break,
                Ok(Some(KeyPress::KeyUp(evt))) => state.release(&evt.code()),
            }
        }
    }

}
