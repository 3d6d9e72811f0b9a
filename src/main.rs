//! Swarm Shooter entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use glam::Vec2;
    use wasm_bindgen::convert::FromWasmAbi;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, EventTarget, HtmlCanvasElement, HtmlElement, MouseEvent};

    use swarm_shooter::highscores::LocalStorage;
    use swarm_shooter::platform::{Hud, WebScheduler};
    use swarm_shooter::renderer::CanvasSurface;
    use swarm_shooter::sim::GameState;
    use swarm_shooter::{GameController, GameEvent, Settings};

    type Controller = GameController<LocalStorage, WebScheduler>;

    /// DOM side of the HUD: score counter and the two modal panels
    struct DomHud {
        score: Option<Element>,
        start_modal: Option<HtmlElement>,
        end_modal: Option<HtmlElement>,
        start_high_score: Option<Element>,
        end_high_score: Option<Element>,
        final_score: Option<Element>,
    }

    impl DomHud {
        fn new(document: &Document) -> Self {
            let find = |selector: &str| document.query_selector(selector).ok().flatten();
            let find_html = |selector: &str| -> Option<HtmlElement> {
                find(selector).and_then(|el| el.dyn_into().ok())
            };
            Self {
                score: find("#scoreValue"),
                start_modal: find_html("#start-modal"),
                end_modal: find_html("#end-modal"),
                start_high_score: find("#start-modal #high-score"),
                end_high_score: find("#end-modal #high-score"),
                final_score: find("#end-modal .modal-score"),
            }
        }

        fn set_text(el: &Option<Element>, text: &str) {
            if let Some(el) = el {
                el.set_text_content(Some(text));
            }
        }

        fn set_display(el: &Option<HtmlElement>, display: &str) {
            if let Some(el) = el {
                let _ = el.style().set_property("display", display);
            }
        }

        fn show_start_high_score(&self, high_score: u64) {
            Self::set_text(&self.start_high_score, &high_score.to_string());
        }
    }

    impl Hud for DomHud {
        fn apply(&mut self, event: &GameEvent) {
            match *event {
                GameEvent::SessionStarted { high_score } => {
                    Self::set_display(&self.start_modal, "none");
                    Self::set_display(&self.end_modal, "none");
                    self.show_start_high_score(high_score);
                }
                GameEvent::ScoreChanged { score } => {
                    Self::set_text(&self.score, &score.to_string());
                }
                GameEvent::SessionEnded {
                    score, high_score, ..
                } => {
                    Self::set_display(&self.end_modal, "flex");
                    Self::set_text(&self.final_score, &score.to_string());
                    Self::set_text(&self.end_high_score, &high_score.to_string());
                }
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        controller: Controller,
        surface: CanvasSurface,
        hud: DomHud,
    }

    impl Game {
        fn frame(&mut self, time: f64) {
            self.controller.animate(&mut self.surface, time);
            self.flush_events();
        }

        fn flush_events(&mut self) {
            for event in self.controller.drain_events() {
                self.hud.apply(&event);
            }
        }
    }

    fn viewport_size(window: &web_sys::Window) -> Vec2 {
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        Vec2::new(w as f32, h as f32)
    }

    /// Register a handler that lives for the rest of the page
    fn listen<E: FromWasmAbi + 'static>(
        target: &EventTarget,
        event: &str,
        handler: impl FnMut(E) + 'static,
    ) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger already set: {}", e).into());
        }

        log::info!("Swarm Shooter starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .query_selector("canvas")?
            .ok_or("no canvas")?
            .dyn_into()?;

        let size = viewport_size(&window);
        canvas.set_width(size.x as u32);
        canvas.set_height(size.y as u32);

        let surface = CanvasSurface::from_canvas(&canvas)?;
        let store = LocalStorage::open();
        let settings = Settings::load(&store);
        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(seed, size, settings);
        let hud = DomHud::new(&document);

        let game = Rc::new_cyclic(|weak: &Weak<RefCell<Game>>| {
            let on_frame = {
                let weak = weak.clone();
                move |time: f64| {
                    if let Some(game) = weak.upgrade() {
                        game.borrow_mut().frame(time);
                    }
                }
            };
            let on_interval = {
                let weak = weak.clone();
                move || {
                    if let Some(game) = weak.upgrade() {
                        game.borrow_mut().controller.on_spawn_timer();
                    }
                }
            };
            let scheduler = WebScheduler::new(window.clone(), on_frame, on_interval);
            RefCell::new(Game {
                controller: GameController::new(state, store, scheduler),
                surface,
                hud,
            })
        });

        {
            let g = game.borrow();
            g.hud.show_start_high_score(g.controller.high_score());
        }
        log::info!("Game initialized with seed: {}", seed);

        // Start / restart buttons
        for selector in ["#startGameBtn", "#restartGameBtn"] {
            if let Some(btn) = document.query_selector(selector)? {
                let game = game.clone();
                listen(&btn, "click", move |_event: MouseEvent| {
                    let mut g = game.borrow_mut();
                    g.controller.start_game();
                    g.flush_events();
                })?;
            }
        }

        // Shooting
        {
            let game = game.clone();
            listen(&window, "click", move |event: MouseEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.controller
                    .handle_click(event.client_x() as f32, event.client_y() as f32);
            })?;
        }

        // No context menu over the canvas
        listen(&canvas, "contextmenu", |event: web_sys::Event| {
            event.prevent_default();
        })?;

        // Resize: canvas follows the window, player re-centers
        {
            let game = game.clone();
            let window_clone = window.clone();
            let canvas = canvas.clone();
            listen(&window, "resize", move |_event: web_sys::Event| {
                let size = viewport_size(&window_clone);
                canvas.set_width(size.x as u32);
                canvas.set_height(size.y as u32);
                game.borrow_mut().controller.resize(size.x, size.y);
            })?;
        }

        // Tab visibility: spawning pauses, the frame loop does not
        {
            let game = game.clone();
            let document_clone = document.clone();
            listen(&document, "visibilitychange", move |_event: web_sys::Event| {
                game.borrow_mut()
                    .controller
                    .on_visibility_change(document_clone.hidden());
            })?;
        }

        // Keep the best score if the page goes away mid-session
        {
            let game = game.clone();
            listen(&window, "beforeunload", move |_event: web_sys::Event| {
                game.borrow_mut().controller.persist_high_score();
            })?;
        }

        log::info!("Swarm Shooter ready");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Swarm Shooter (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    run_headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play one session with a recording surface and a bot that shoots at the
/// closest enemy four times a second
#[cfg(not(target_arch = "wasm32"))]
fn run_headless_demo() {
    use glam::Vec2;
    use swarm_shooter::platform::{Hud, LogHud, ManualScheduler};
    use swarm_shooter::renderer::RecordingSurface;
    use swarm_shooter::sim::GameState;
    use swarm_shooter::{GameController, MemoryStore, SessionPhase, Settings};

    /// Give up after this many simulated seconds
    const MAX_SECONDS: u32 = 300;
    const SHOT_INTERVAL_MS: f64 = 250.0;

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let store = MemoryStore::new();
    let settings = Settings::load(&store);
    let state = GameState::new(seed, Vec2::new(1280.0, 720.0), settings);
    let mut controller = GameController::new(state, store, ManualScheduler::new());
    let mut surface = RecordingSurface::new();
    let mut hud = LogHud;

    log::info!("Headless session with seed: {}", seed);
    controller.start_game();

    let shots_per_second = (1000.0 / SHOT_INTERVAL_MS) as u32;
    'session: for _ in 0..MAX_SECONDS {
        for _ in 0..shots_per_second {
            let center = controller.state().center();
            let closest = controller
                .state()
                .enemies
                .iter()
                .map(|e| e.body.pos)
                .min_by(|a, b| {
                    a.distance(center)
                        .partial_cmp(&b.distance(center))
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
            if let Some(target) = closest {
                controller.handle_click(target.x, target.y);
            }

            surface.clear();
            controller.run_for(&mut surface, SHOT_INTERVAL_MS);
            for event in controller.drain_events() {
                hud.apply(&event);
            }
            if controller.phase() != SessionPhase::Running {
                break 'session;
            }
        }
    }

    if controller.phase() == SessionPhase::Running {
        controller.end_game();
        controller.drain_events();
    }

    log::info!(
        "Headless session over: score {} (high score {}), {:.1}s simulated",
        controller.score(),
        controller.high_score(),
        controller.scheduler().now_ms() / 1000.0
    );
}
