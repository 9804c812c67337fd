//! Breakout entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, TouchEvent};

    use breakout::consts::*;
    use breakout::platform::{InputEvent, InputState, Key};
    use breakout::renderer::{RenderState, ShapeBatch, colors};
    use breakout::sim::{GameEvent, GamePhase, GameState, tick};
    use breakout::{Config, canvas_size_for_viewport};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        batch: ShapeBatch,
        input: InputState,
        accumulator: f32,
        last_time: f64,
        /// An animation frame is scheduled
        running: bool,
    }

    impl Game {
        fn new(config: Config, width: f32, height: f32, seed: u64) -> Self {
            let input = InputState::new(config.touch_threshold);
            Self {
                state: GameState::new(config, width, height, seed),
                render_state: None,
                batch: ShapeBatch::new(),
                input,
                accumulator: 0.0,
                last_time: 0.0,
                running: false,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(MAX_FRAME_DT);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.take_tick_input();
                tick(&mut self.state, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            self.state.draw(&mut self.batch);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(self.batch.vertices()) {
                    Ok(()) => {}
                    Err(breakout::renderer::RenderError::Surface(
                        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated,
                    )) => {
                        let (w, h) = render_state.size;
                        let canvas_size = render_state.canvas_size;
                        render_state.resize(w, h, canvas_size);
                    }
                    Err(e) => log::warn!("Render error: {}", e),
                }
            }
        }

        /// Write HUD labels into the DOM overlay
        fn update_hud(&self, document: &Document) {
            for (i, label) in self.batch.labels().iter().enumerate() {
                let Some(el) = hud_label(document, i) else {
                    continue;
                };
                if el.text_content().as_deref() != Some(label.text.as_str()) {
                    el.set_text_content(Some(&label.text));
                }
                let style = el.style();
                let _ = style.set_property("left", &format!("{}px", label.x));
                // Canvas text is drawn from its baseline
                let _ = style.set_property("top", &format!("{}px", label.y - 16.0));
                let _ = style.set_property("color", &colors::to_css(label.color));
            }
        }

        /// Drain session events; returns false once the loop should stop
        fn handle_events(&mut self, document: &Document) -> bool {
            let mut keep_running = true;
            for event in self.state.drain_events() {
                match event {
                    GameEvent::GameOver { score } => {
                        log::info!("Game over, final score {}", score);
                        set_visible(document, "gameOverModal", true);
                        keep_running = false;
                    }
                    GameEvent::Won { score } => {
                        log::info!("Field cleared, final score {}", score);
                        set_visible(document, "winModal", true);
                        keep_running = false;
                    }
                    other => log::debug!("{:?}", other),
                }
            }
            keep_running && !self.state.phase.is_terminal()
        }

        fn resize_to_viewport(&mut self, canvas: &HtmlCanvasElement) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (width, height) = viewport_canvas_size(&window);
            let (px_w, px_h) = apply_canvas_size(&window, canvas, width, height);
            self.state.resize(width, height);
            self.accumulator = 0.0;
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(px_w, px_h, (width, height));
            }
        }
    }

    fn viewport_canvas_size(window: &web_sys::Window) -> (f32, f32) {
        let vw = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(CANVAS_WIDTH as f64) as f32;
        let vh = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(CANVAS_HEIGHT as f64) as f32;
        canvas_size_for_viewport(vw, vh)
    }

    /// Size the canvas in CSS pixels and its backing store in device pixels
    fn apply_canvas_size(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        width: f32,
        height: f32,
    ) -> (u32, u32) {
        let dpr = window.device_pixel_ratio();
        let px_w = (width as f64 * dpr) as u32;
        let px_h = (height as f64 * dpr) as u32;
        canvas.set_width(px_w);
        canvas.set_height(px_h);
        let style = canvas.style();
        let _ = style.set_property("width", &format!("{}px", width));
        let _ = style.set_property("height", &format!("{}px", height));
        (px_w, px_h)
    }

    fn hud_label(document: &Document, index: usize) -> Option<HtmlElement> {
        let id = format!("hud-label-{}", index);
        if let Some(el) = document.get_element_by_id(&id) {
            return el.dyn_into().ok();
        }
        let hud = document.get_element_by_id("hud")?;
        let el = document.create_element("div").ok()?;
        el.set_id(&id);
        let _ = el.set_attribute("class", "hud-label");
        hud.append_child(&el).ok()?;
        el.dyn_into().ok()
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let display = if visible { "block" } else { "none" };
            let _ = el.style().set_property("display", display);
        }
    }

    /// Optional JSON tuning embedded in the page
    fn load_config(document: &Document) -> Config {
        let Some(json) = document
            .get_element_by_id("game-config")
            .and_then(|el| el.text_content())
        else {
            return Config::default();
        };
        match Config::from_json(&json) {
            Ok(config) => {
                log::info!("Loaded game config from page");
                config
            }
            Err(e) => {
                log::warn!("Invalid game config, using defaults: {}", e);
                Config::default()
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Breakout starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("myCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let config = load_config(&document);
        let (width, height) = viewport_canvas_size(&window);
        let (px_w, px_h) = apply_canvas_size(&window, &canvas, width, height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(config, width, height, seed)));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU, falling back to WebGL2
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, px_w, px_h, (width, height))
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        game.borrow_mut().render_state = Some(render_state);

        set_visible(&document, "gameOverModal", false);
        set_visible(&document, "winModal", false);

        setup_input_handlers(&window, &canvas, game.clone());
        setup_buttons(&document, game.clone());
        setup_resize(&window, &canvas, game.clone());
        setup_auto_pause(&window, game.clone());

        // Draw the Ready frame; ticks are no-ops until start
        arm_loop(&game);

        log::info!("Breakout running!");
        Ok(())
    }

    fn touch_x(event: &TouchEvent, canvas: &HtmlCanvasElement) -> Option<f32> {
        let touch = event.touches().get(0)?;
        let rect = canvas.get_bounding_client_rect();
        Some(touch.client_x() as f32 - rect.left() as f32)
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) {
        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom(&event.key()) {
                    if key == Key::Space {
                        event.prevent_default();
                    }
                    game.borrow_mut().input.handle(InputEvent::KeyDown(key));
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom(&event.key()) {
                    game.borrow_mut().input.handle(InputEvent::KeyUp(key));
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(x) = touch_x(&event, &canvas_clone) {
                    game.borrow_mut().input.handle(InputEvent::TouchStart { x });
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(x) = touch_x(&event, &canvas_clone) {
                    game.borrow_mut().input.handle(InputEvent::TouchMove { x });
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                game.borrow_mut().input.handle(InputEvent::TouchEnd);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn on_click(document: &Document, id: &str, mut handler: impl FnMut() + 'static) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Missing #{}", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| handler());
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let doc = document.clone();
            on_click(document, "startButton", move || {
                {
                    let mut g = game.borrow_mut();
                    g.state.start();
                    g.last_time = 0.0;
                }
                set_visible(&doc, "startButton", false);
                arm_loop(&game);
            });
        }

        for (button, modal) in [("gameOverButton", "gameOverModal"), ("winButton", "winModal")] {
            let game = game.clone();
            let doc = document.clone();
            on_click(document, button, move || {
                {
                    let mut g = game.borrow_mut();
                    g.state.reset();
                    g.input.release_all();
                    g.accumulator = 0.0;
                    g.last_time = 0.0;
                }
                set_visible(&doc, modal, false);
                arm_loop(&game);
            });
        }
    }

    fn setup_resize(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) {
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize_to_viewport(&canvas);
        });
        let _ =
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_auto_pause(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // Window blur (click outside)
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            g.input.release_all();
            if g.state.phase == GamePhase::Playing {
                g.input.handle(InputEvent::KeyDown(Key::Space));
                log::info!("Auto-paused (window blur)");
            }
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Schedule the loop unless a frame is already pending
    fn arm_loop(game: &Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.running {
                return;
            }
            g.running = true;
        }
        request_animation_frame(game.clone());
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let keep_running = {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud(&document);
            let keep_running = g.handle_events(&document);
            g.running = keep_running;
            keep_running
        };

        if keep_running {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Breakout (native) starting...");
    log::info!("Native mode runs a headless autopilot session - serve the wasm build to play");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match breakout::Config::load_file(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path);
                config
            }
            Err(e) => {
                log::warn!("Could not load {}: {}; using defaults", path, e);
                breakout::Config::default()
            }
        },
        None => breakout::Config::default(),
    };
    let config = match std::env::var("BREAKOUT_COLLISION") {
        Ok(name) => match breakout::CollisionMode::from_str(&name) {
            Some(collision) => breakout::Config { collision, ..config },
            None => {
                log::warn!(
                    "Unknown collision mode {:?}; keeping {}",
                    name,
                    config.collision.as_str()
                );
                config
            }
        },
        Err(_) => config,
    };
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

    let summary = headless::run(config, seed, headless::MAX_TICKS);
    println!(
        "seed {}: {:?} after {} ticks, score {}, lives {}",
        seed, summary.phase, summary.ticks, summary.score, summary.lives
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use breakout::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, TICKS_PER_SECOND};
    use breakout::renderer::ShapeBatch;
    use breakout::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use breakout::Config;

    /// Ten simulated minutes
    pub const MAX_TICKS: u64 = 10 * 60 * TICKS_PER_SECOND as u64;

    pub struct Summary {
        pub phase: GamePhase,
        pub ticks: u64,
        pub score: u32,
        pub lives: u32,
    }

    /// Play one autopilot session on the default canvas
    pub fn run(config: Config, seed: u64, max_ticks: u64) -> Summary {
        let mut state = GameState::new(config, CANVAS_WIDTH, CANVAS_HEIGHT, seed);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        let mut batch = ShapeBatch::new();
        let mut ticks = 0;

        while ticks < max_ticks && !state.phase.is_terminal() {
            tick(&mut state, &input);
            ticks += 1;

            for event in state.drain_events() {
                match event {
                    GameEvent::PowerUpActivated(kind) => {
                        log::info!("t={} power-up {}", ticks, kind.as_str())
                    }
                    GameEvent::LifeLost { lives_left } => {
                        log::info!("t={} life lost, {} left", ticks, lives_left)
                    }
                    other => log::debug!("t={} {:?}", ticks, other),
                }
            }

            // Exercise the draw path once a second
            if ticks % TICKS_PER_SECOND as u64 == 0 {
                state.draw(&mut batch);
                log::trace!(
                    "frame: {} vertices, {} labels",
                    batch.vertices().len(),
                    batch.labels().len()
                );
            }
        }

        log::info!(
            "Session ended in {:?}: {} bricks left",
            state.phase,
            state.field.active_count()
        );
        Summary {
            phase: state.phase,
            ticks,
            score: state.score,
            lives: state.lives,
        }
    }
}
