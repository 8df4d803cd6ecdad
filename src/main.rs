//! BENJI Survival entry point
//!
//! Web: handles platform-specific initialization and runs the game loop.
//! Native: plays one headless run with the autopilot and logs the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlAnchorElement, HtmlCanvasElement, MouseEvent, TouchEvent};

    use benji_survival::challenge::{CHALLENGE_PATH, ChallengeLink};
    use benji_survival::consts::SIM_DT;
    use benji_survival::platform::{self, LocalStore};
    use benji_survival::renderer::{self, RenderState, SceneOptions, Viewport};
    use benji_survival::session::Session;
    use benji_survival::sim::{Autopilot, ControlMode, GameEvent, PointerInput, RunPhase};

    /// Game instance holding all state
    struct Game {
        session: Session<LocalStore>,
        render_state: Option<RenderState>,
        pointer: PointerInput,
        autopilot: Autopilot,
        /// Bot plays instead of the pointer
        idle_mode: bool,
        last_time: f64,
        /// Canvas CSS size, for pointer mapping
        client_size: (u32, u32),
        /// Page origin for share links
        origin: String,
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(session: Session<LocalStore>, origin: String) -> Self {
            Self {
                session,
                render_state: None,
                pointer: PointerInput::new(),
                autopilot: Autopilot::new(),
                idle_mode: false,
                last_time: 0.0,
                client_size: (1, 1),
                origin,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Canvas-relative CSS pixels to playfield coordinates
        fn to_field(&self, x: f32, y: f32) -> Vec2 {
            let (w, h) = self.client_size;
            Viewport::new(w, h).screen_to_field(Vec2::new(x, y))
        }

        /// Tap / click / space: whatever the current screen expects
        fn press(&mut self) {
            let state = self.session.state();
            match state.phase {
                RunPhase::Ready => self.pointer.press_start(),
                RunPhase::GameOver => self.pointer.press_restart(),
                RunPhase::Paused => self.pointer.press_pause(),
                RunPhase::Playing => {
                    if state.control == ControlMode::Jump {
                        self.pointer.press_jump();
                    }
                }
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            if self.idle_mode {
                self.session.advance(dt, &mut self.autopilot);
            } else {
                self.session.advance(dt, &mut self.pointer);
            }

            for event in self.session.drain_events() {
                match event {
                    GameEvent::WaveAdvanced { wave } => log::info!("Wave {}", wave),
                    GameEvent::ChallengeBeaten { target } => {
                        log::info!("Challenge beaten (target {})", target)
                    }
                    GameEvent::RunOver { .. } => self.update_share_link(),
                    _ => {}
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let opts = SceneOptions::from_settings(self.session.settings());
            let vertices = renderer::build(self.session.state(), &opts);
            match render_state.render(&vertices, renderer::background(&opts)) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    let (w, h) = (render_state.config.width, render_state.config.height);
                    render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        fn update_share_link(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(anchor) = document
                .get_element_by_id("share-challenge")
                .and_then(|el| el.dyn_into::<HtmlAnchorElement>().ok())
            {
                anchor.set_href(&self.session.share_link(&self.origin));
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let state = self.session.state();

            set_text(&document, "#hud-score .hud-value", &state.score.to_string());
            set_text(&document, "#hud-wave .hud-value", &state.wave.to_string());
            set_text(&document, "#hud-best .hud-value", &self.session.best().to_string());
            set_text(&document, "#hud-lives .hud-value", &"\u{2764}".repeat(state.lives as usize));
            set_text(&document, "#hud-fps .hud-value", &self.fps.to_string());
            set_visible(&document, "hud-fps", self.session.settings().show_fps);
            set_visible(&document, "idle-badge", self.idle_mode);

            set_visible(&document, "start-screen", state.phase == RunPhase::Ready);
            set_visible(&document, "pause-menu", state.phase == RunPhase::Paused);

            let over = state.phase == RunPhase::GameOver;
            set_visible(&document, "game-over", over);
            if over {
                set_text(&document, "#final-score", &state.score.to_string());
                set_text(&document, "#final-wave", &state.wave.to_string());
                set_visible(&document, "new-best", self.session.is_new_best());
            }

            if let Some(challenge) = &state.challenge {
                let text = if challenge.is_beaten() {
                    format!("You beat {}!", challenge.link.challenger_name)
                } else {
                    format!(
                        "Beat {}'s {}",
                        challenge.link.challenger_name,
                        challenge.target()
                    )
                };
                set_text(&document, "#challenge-banner", &text);
            }
        }
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    /// Challenge link from the URL, when opened on the challenge page
    fn challenge_from_location(window: &web_sys::Window) -> Option<ChallengeLink> {
        let location = window.location();
        let path = location.pathname().ok()?;
        if !path.trim_end_matches('/').ends_with(CHALLENGE_PATH) {
            return None;
        }
        let link = ChallengeLink::from_query(&location.search().ok()?);
        if link.is_none() {
            log::warn!("Ignoring malformed challenge link");
        }
        link
    }

    async fn init_renderer(
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Result<RenderState, String> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| format!("surface: {e}"))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| format!("adapter: {e}"))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| format!("renderer: {e}"))
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("BENJI Survival starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()
            .map_err(|_| "not a canvas")?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width().max(1) as u32;
        let client_h = canvas.client_height().max(1) as u32;
        let (width, height) = renderer::clamp_surface_size(
            (client_w as f64 * dpr) as u32,
            (client_h as f64 * dpr) as u32,
            renderer::MAX_SURFACE_DIM,
        );
        canvas.set_width(width);
        canvas.set_height(height);

        // Host handshake decides whose best score we load
        let host = platform::signal_ready().await;
        let challenge = challenge_from_location(&window);
        set_visible(&document, "challenge-banner", challenge.is_some());

        let seed = js_sys::Date::now() as u64;
        let session = Session::new(LocalStore::new(), host.namespace(), seed, challenge);
        let origin = window.location().origin().unwrap_or_default();
        let game = Rc::new(RefCell::new(Game::new(session, origin)));
        game.borrow_mut().client_size = (client_w, client_h);

        log::info!("Game initialized with seed: {}", seed);

        match init_renderer(&canvas, width, height).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::warn!("Rendering disabled: {}", e),
        }

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        setup_input_handlers(&canvas, game.clone());
        setup_auto_pause(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("BENJI Survival running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.client_size = (
                    canvas_clone.client_width().max(1) as u32,
                    canvas_clone.client_height().max(1) as u32,
                );
                let pos = g.to_field(event.offset_x() as f32, event.offset_y() as f32);
                g.pointer.point_at(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().press();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start / move share the position update; only start presses
        for (name, presses) in [("touchstart", true), ("touchmove", false)] {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                if let Some(touch) = event.touches().get(0) {
                    g.client_size = (
                        canvas_clone.client_width().max(1) as u32,
                        canvas_clone.client_height().max(1) as u32,
                    );
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    let y = touch.client_y() as f32 - rect.top() as f32;
                    let pos = g.to_field(x, y);
                    g.pointer.point_at(pos);
                }
                if presses {
                    g.press();
                }
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        if let Some(window) = web_sys::window() {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "ArrowUp" | "Enter" => g.press(),
                    "Escape" | "p" | "P" => g.pointer.press_pause(),
                    "i" | "I" => {
                        g.idle_mode = !g.idle_mode;
                        log::info!("Idle mode: {}", g.idle_mode);
                    }
                    key => {
                        // m/f/g/h/r flip settings
                        let next = g.session.settings().toggled(key);
                        if let Some(settings) = next {
                            g.session.update_settings(settings);
                        }
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.session.state().phase == RunPhase::Playing {
                        g.pointer.press_pause();
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.session.state().phase == RunPhase::Playing {
                    g.pointer.press_pause();
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

/// Headless run: the autopilot plays until run over (or the tick cap)
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use benji_survival::consts::SIM_DT;
    use benji_survival::platform::{MemoryStore, PlayerNamespace};
    use benji_survival::session::Session;
    use benji_survival::sim::Autopilot;

    /// Ten minutes of play
    const MAX_TICKS: u64 = 60 * 60 * 10;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xBE57);
    log::info!("BENJI Survival (native, headless) seed {}", seed);
    log::info!("Native mode plays with the autopilot - build for wasm32 to play in a browser");

    let mut session = Session::new(MemoryStore::new(), PlayerNamespace::Anonymous, seed, None);
    let mut bot = Autopilot::new();
    while !session.state().is_over() && session.state().time_ticks < MAX_TICKS {
        session.advance(SIM_DT, &mut bot);
    }

    let state = session.state();
    println!(
        "score {} | wave {} | ticks {} | lives {}",
        state.score, state.wave, state.time_ticks, state.lives
    );
    println!("share: {}", session.share_link("http://localhost:8080"));
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
