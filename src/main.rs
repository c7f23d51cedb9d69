//! Orbit Path entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, MouseEvent, TouchEvent};

    use orbit_path::consts::{HAPTIC_CAPTURE_MS, HAPTIC_RELEASE_MS, HAPTIC_TARGET_MS};
    use orbit_path::renderer::{RenderState, Starfield, build_scene};
    use orbit_path::sim::{FrameOutcome, ShipStep, Viewport};
    use orbit_path::{GameSettings, Session, SessionEvents, TickSource};

    /// Id of the optional `<script type="application/json">` settings block
    const CONFIG_ELEMENT: &str = "orbit-path-config";

    /// Frame clock over requestAnimationFrame
    struct AnimationFrameTicks {
        callback: Option<js_sys::Function>,
        handle: Option<i32>,
    }

    impl AnimationFrameTicks {
        fn new() -> Self {
            Self {
                callback: None,
                handle: None,
            }
        }

        fn bind(&mut self, callback: js_sys::Function) {
            self.callback = Some(callback);
        }

        /// The pending frame has been delivered
        fn fired(&mut self) {
            self.handle = None;
        }
    }

    impl TickSource for AnimationFrameTicks {
        fn schedule(&mut self) {
            if self.handle.is_some() {
                return;
            }
            let (Some(window), Some(callback)) = (web_sys::window(), self.callback.as_ref()) else {
                return;
            };
            match window.request_animation_frame(callback) {
                Ok(handle) => self.handle = Some(handle),
                Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
            }
        }

        fn cancel(&mut self) {
            if let (Some(handle), Some(window)) = (self.handle.take(), web_sys::window()) {
                let _ = window.cancel_animation_frame(handle);
            }
        }

        fn is_scheduled(&self) -> bool {
            self.handle.is_some()
        }
    }

    /// Short vibration, ignored where the device has no vibrator
    fn vibrate(ms: u32) {
        if let Some(window) = web_sys::window() {
            let _ = window.navigator().vibrate_with_duration(ms);
        }
    }

    /// DOM score readouts
    struct Hud {
        document: Document,
    }

    impl Hud {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_visible(&self, id: &str, visible: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
            }
        }
    }

    impl SessionEvents for Hud {
        fn on_score_update(&mut self, score: u32) {
            self.set_text("score", &format!("{score} km"));
        }

        fn on_game_over(&mut self, final_score: u32) {
            self.set_text("final-score", &format!("{final_score} km"));
            self.set_visible("game-over", true);
        }
    }

    /// Game instance holding all host state
    struct Game {
        session: Session<AnimationFrameTicks>,
        settings: GameSettings,
        render_state: Option<RenderState>,
        stars: Starfield,
        hud: Hud,
        canvas: HtmlCanvasElement,
    }

    impl Game {
        /// Canvas rectangle in client coordinates
        fn viewport(&self) -> Viewport {
            let rect = self.canvas.get_bounding_client_rect();
            Viewport::new(
                rect.left() as f32,
                rect.top() as f32,
                rect.width() as f32,
                rect.height() as f32,
            )
        }

        fn start(&mut self) {
            let seed = js_sys::Date::now() as u64;
            self.hud.set_visible("game-over", false);
            self.hud.on_score_update(0);
            self.session.start(&self.settings, seed);
        }

        /// One animation frame: step, then draw
        fn frame(&mut self) {
            self.session.ticks_mut().fired();
            match self.session.on_tick(&mut self.hud) {
                FrameOutcome::Running {
                    step: ShipStep::Captured,
                    ..
                } => vibrate(HAPTIC_CAPTURE_MS),
                FrameOutcome::GameOver { .. } => {
                    let best = self.session.high_scores().best();
                    self.hud.set_text("best-score", &format!("{best} km"));
                }
                _ => {}
            }
            self.render();
        }

        fn hold_start(&mut self, client_x: f32, client_y: f32) {
            let viewport = self.viewport();
            if self.session.hold_start(client_x, client_y, &viewport).is_some() {
                vibrate(HAPTIC_TARGET_MS);
            }
        }

        fn hold_end(&mut self) {
            if self.session.hold_end() {
                vibrate(HAPTIC_RELEASE_MS);
            }
        }

        fn render(&mut self) {
            let Some(world) = self.session.world() else {
                return;
            };
            let vertices = build_scene(world, self.session.intent(), &self.stars);
            if let Some(render_state) = self.render_state.as_mut() {
                match render_state.render(&vertices) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost) => render_state.reconfigure(),
                    Err(wgpu::SurfaceError::OutOfMemory) => log::error!("Out of memory!"),
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn resize(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (width, height) = canvas_pixel_size(&window, &self.canvas);
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.resize(width, height);
            }
        }
    }

    fn canvas_pixel_size(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = window.device_pixel_ratio();
        (
            (canvas.client_width() as f64 * dpr) as u32,
            (canvas.client_height() as f64 * dpr) as u32,
        )
    }

    /// Settings from the page, or defaults when absent or malformed
    fn read_settings(document: &Document) -> GameSettings {
        let Some(text) = document
            .get_element_by_id(CONFIG_ELEMENT)
            .and_then(|el| el.text_content())
        else {
            return GameSettings::default();
        };
        GameSettings::from_json(&text).unwrap_or_else(|e| {
            log::warn!("Ignoring page settings: {}", e);
            GameSettings::default()
        })
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Orbit Path starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let (width, height) = canvas_pixel_size(&window, &canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = read_settings(&document);
        log::info!("Settings: {:?}", settings);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let game = Rc::new(RefCell::new(Game {
            session: Session::new(AnimationFrameTicks::new()),
            settings,
            render_state: Some(render_state),
            stars: Starfield::new(js_sys::Date::now() as u64),
            hud: Hud {
                document: document.clone(),
            },
            canvas: canvas.clone(),
        }));

        // The frame callback lives for the lifetime of the page
        let tick = {
            let game = game.clone();
            Closure::<dyn FnMut(f64)>::new(move |_time: f64| game.borrow_mut().frame())
        };
        game.borrow_mut()
            .session
            .ticks_mut()
            .bind(tick.as_ref().unchecked_ref::<js_sys::Function>().clone());
        tick.forget();

        setup_input_handlers(&window, &canvas, game.clone())?;
        setup_restart_button(&document, game.clone())?;
        setup_resize(&window, game.clone())?;

        game.borrow_mut().start();

        log::info!("Orbit Path running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Mouse down - target the body under the pointer
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .hold_start(event.client_x() as f32, event.client_y() as f32);
            });
            canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch start - same, from the first touch point
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    game.borrow_mut()
                        .hold_start(touch.client_x() as f32, touch.client_y() as f32);
                }
            });
            canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Release anywhere on the page
        for name in ["mouseup", "touchend", "touchcancel"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().hold_end();
            });
            window.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_restart_button(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().start();
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_resize(window: &web_sys::Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize();
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use orbit_path::consts::{WORLD_HEIGHT, WORLD_WIDTH};
    use orbit_path::renderer::{Starfield, build_scene};
    use orbit_path::sim::{FrameOutcome, InputIntent, Viewport, World};
    use orbit_path::{GameSettings, ManualTicks, Session, SessionEvents};

    /// Frames before a run is abandoned
    pub const MAX_FRAMES: u64 = 60 * 60 * 10;

    /// Frames the autopilot stays in orbit before looking for a release
    const MIN_ORBIT_FRAMES: u32 = 30;

    #[derive(Debug, Default)]
    struct LogEvents {
        last_score: u32,
    }

    impl SessionEvents for LogEvents {
        fn on_score_update(&mut self, score: u32) {
            if score / 100 > self.last_score / 100 {
                log::debug!("Passed {} km", score);
            }
            self.last_score = score;
        }

        fn on_game_over(&mut self, final_score: u32) {
            log::info!("Final distance: {} km", final_score);
        }
    }

    enum Pilot {
        /// Press at this client position
        Hold(f32, f32),
        Release,
        Wait,
    }

    /// Very small heuristic player: grab the nearest body ahead, orbit for a
    /// while and sling off once the ship is heading up-screen
    fn pilot(world: &World, intent: &InputIntent, orbit_frames: u32) -> Pilot {
        let ship = &world.ship;
        let speed = world.settings.initial_speed;

        if ship.is_orbiting() {
            return if orbit_frames > MIN_ORBIT_FRAMES && ship.vel.y < -0.7 * speed {
                Pilot::Release
            } else {
                Pilot::Wait
            };
        }

        if intent.hold_active {
            let passed = intent
                .target
                .and_then(|id| world.body(id))
                .is_none_or(|b| b.pos.y > ship.pos.y + b.inner_radius);
            return if passed { Pilot::Release } else { Pilot::Wait };
        }

        world
            .bodies
            .iter()
            .filter(|b| b.pos.y < ship.pos.y && ship.pos.distance(b.pos) < b.gravity_radius)
            .min_by(|a, b| {
                ship.pos
                    .distance_squared(a.pos)
                    .total_cmp(&ship.pos.distance_squared(b.pos))
            })
            .map(|b| Pilot::Hold(b.pos.x, b.pos.y - world.camera_y))
            .unwrap_or(Pilot::Wait)
    }

    /// Play one run with the autopilot. Returns the final score.
    pub fn run(settings: &GameSettings, seed: u64, max_frames: u64) -> u32 {
        let viewport = Viewport::new(0.0, 0.0, WORLD_WIDTH, WORLD_HEIGHT);
        let mut session = Session::new(ManualTicks::new());
        let mut events = LogEvents::default();
        session.start(settings, seed);

        let mut orbit_frames = 0;
        let mut frames = 0;
        let mut score = 0;
        while frames < max_frames && session.ticks_mut().fire() {
            let action = session
                .world()
                .map(|w| pilot(w, session.intent(), orbit_frames))
                .unwrap_or(Pilot::Wait);
            match action {
                Pilot::Hold(x, y) => {
                    session.hold_start(x, y, &viewport);
                }
                Pilot::Release => {
                    session.hold_end();
                }
                Pilot::Wait => {}
            }

            let outcome = session.on_tick(&mut events);
            if let Some(s) = outcome.score() {
                score = s;
            }
            if let FrameOutcome::GameOver { cause, .. } = outcome {
                log::info!("Run ended after {} frames: {:?}", frames + 1, cause);
            }

            let orbiting = session.world().is_some_and(|w| w.ship.is_orbiting());
            orbit_frames = if orbiting { orbit_frames + 1 } else { 0 };
            frames += 1;
        }

        if session.is_playing() {
            log::info!("Frame limit reached at {} km", score);
            session.stop();
        }

        if let Some(world) = session.world() {
            let stars = Starfield::new(seed);
            let vertices = build_scene(world, session.intent(), &stars);
            log::debug!("Last frame: {} vertices", vertices.len());
        }

        score
    }

    /// Settings from a JSON file, or defaults when unreadable
    pub fn load_settings(path: &str) -> GameSettings {
        match std::fs::read_to_string(path) {
            Ok(text) => GameSettings::from_json(&text).unwrap_or_else(|e| {
                log::warn!("{}: {}; using defaults", path, e);
                GameSettings::default()
            }),
            Err(e) => {
                log::warn!("Cannot read {}: {}; using defaults", path, e);
                GameSettings::default()
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Orbit Path (native) starting...");
    log::info!("Native mode runs a headless autopilot - run with `trunk serve` for web version");

    let mut args = std::env::args().skip(1);
    let settings = args
        .next()
        .map(|path| headless::load_settings(&path))
        .unwrap_or_default();
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    let score = headless::run(&settings, seed, headless::MAX_FRAMES);
    println!("seed {seed}: {score} km");
}
