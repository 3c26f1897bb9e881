//! Space Shooter entry point
//!
//! Handles platform-specific initialization and runs the game loop.
//! The browser build draws to `#canvas`; the native build runs a headless
//! autopilot session and prints a summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use space_shooter::Game;
    use space_shooter::audio::WebAudio;
    use space_shooter::persistence::LocalStorageStore;
    use space_shooter::renderer::{Canvas2dRenderer, Hud, Renderer};
    use space_shooter::sim::GamePhase;
    use space_shooter::tuning::Tuning;

    /// Browser app: the game plus its canvas and frame-loop flag
    struct App {
        game: Game<LocalStorageStore, WebAudio>,
        renderer: Option<Canvas2dRenderer>,
        /// A requestAnimationFrame callback is pending
        running: bool,
    }

    impl App {
        fn render(&mut self) {
            if let Some(renderer) = &mut self.renderer {
                if let Err(e) = renderer.draw(&self.game.view()) {
                    log::warn!("Render error: {}", e);
                }
            }
        }

        /// Update score, overlays and mute button in the DOM
        fn update_hud(&self, document: &Document) {
            let hud = Hud::new(self.game.state(), self.game.is_muted());
            set_text(document, "score", &hud.score.to_string());
            set_text(document, "high-score", &hud.high_score.to_string());
            set_text(document, "final-score", &hud.score.to_string());
            set_text(document, "mute-btn", hud.mute_label());
            set_hidden(document, "menu-overlay", !hud.show_menu);
            set_hidden(document, "game-over-overlay", !hud.show_game_over);
            set_hidden(document, "new-high-score", !hud.show_new_high_score);
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    /// Toggle the `hidden` class, leaving the element's other classes alone
    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            if let Err(e) = el.class_list().toggle_with_force("hidden", hidden) {
                log::warn!("Could not toggle #{}: {:?}", id, e);
            }
        }
    }

    fn current_document() -> Option<Document> {
        web_sys::window()?.document()
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        log::info!("Space Shooter starting...");

        let Some(document) = current_document() else {
            log::error!("No document - cannot start");
            return;
        };

        let renderer = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .and_then(|canvas| match Canvas2dRenderer::new(&canvas) {
                Ok(r) => Some(r),
                Err(e) => {
                    log::error!("Canvas unavailable: {}", e);
                    None
                }
            });

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(
            Tuning::default(),
            seed,
            LocalStorageStore::open(),
            WebAudio::new(),
        );
        log::info!("Game initialized with seed: {}", seed);

        let app = Rc::new(RefCell::new(App {
            game,
            renderer,
            running: false,
        }));

        setup_input_handlers(app.clone());
        setup_buttons(&document, app.clone());

        {
            let mut a = app.borrow_mut();
            a.render();
            a.update_hud(&document);
        }
        log::info!("Space Shooter running!");
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                let mut a = app.borrow_mut();
                if a.game.bindings().is_bound(&key) && a.game.phase() == GamePhase::Playing {
                    // Keep space/arrows from scrolling the page
                    event.prevent_default();
                }
                a.game.key_down(&key);
                if key == "i" || key == "I" {
                    let enabled = !a.game.autopilot_enabled();
                    a.game.set_autopilot(enabled);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().game.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, app: Rc<RefCell<App>>) {
        for id in ["start-btn", "play-again-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    let schedule = {
                        let mut a = app.borrow_mut();
                        let started = a.game.start();
                        let schedule = started && !a.running;
                        if schedule {
                            a.running = true;
                        }
                        schedule
                    };
                    if schedule {
                        request_animation_frame(app.clone());
                    }
                });
                let _ = btn
                    .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        if let Some(btn) = document.get_element_by_id("menu-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut a = app.borrow_mut();
                if a.game.menu() {
                    if let Some(document) = current_document() {
                        a.update_hud(&document);
                    }
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("mute-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut a = app.borrow_mut();
                let muted = a.game.toggle_mute();
                log::info!("Muted: {}", muted);
                if let Some(document) = current_document() {
                    a.update_hud(&document);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        let keep_running = {
            let mut a = app.borrow_mut();
            let keep_running = a.game.frame(time);
            a.render();
            if let Some(document) = current_document() {
                a.update_hud(&document);
            }
            // Leaving the playing phase halts scheduling
            a.running = keep_running;
            keep_running
        };

        if keep_running {
            request_animation_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Ticks simulated by the native demo when no count is given (two minutes)
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_DEMO_TICKS: u64 = 2 * 60 * 60;

/// Usage: `space-shooter [ticks] [store.json]`
///
/// `SPACE_SHOOTER_TUNING` may point at a JSON tuning file.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use space_shooter::persistence::{JsonFileStore, MemoryStore};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Space Shooter (native) starting...");
    log::info!("Native mode runs a headless autopilot session - build for wasm32 to play");

    let mut args = std::env::args().skip(1);
    let ticks = match args.next() {
        Some(arg) => arg.parse().unwrap_or_else(|_| {
            log::warn!("Invalid tick count {:?}, using {}", arg, DEFAULT_DEMO_TICKS);
            DEFAULT_DEMO_TICKS
        }),
        None => DEFAULT_DEMO_TICKS,
    };

    let tuning = load_tuning();
    match args.next() {
        Some(path) => {
            let store = JsonFileStore::open_or_empty(path);
            log::info!("Persisting to {}", store.path().display());
            run_demo(tuning, store, ticks)
        }
        None => run_demo(tuning, MemoryStore::new(), ticks),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning() -> space_shooter::Tuning {
    use space_shooter::Tuning;

    let Ok(path) = std::env::var("SPACE_SHOOTER_TUNING") else {
        return Tuning::default();
    };
    let loaded = std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
    match loaded {
        Ok(tuning) => {
            log::info!("Loaded tuning from {}", path);
            tuning
        }
        Err(e) => {
            log::warn!("Ignoring tuning file {}: {}", path, e);
            Tuning::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run_demo<S: space_shooter::persistence::KvStore>(
    tuning: space_shooter::Tuning,
    store: S,
    ticks: u64,
) {
    use space_shooter::Game;
    use space_shooter::audio::LogAudio;
    use space_shooter::consts::FRAME_MS;

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut game = Game::new(tuning, seed, store, LogAudio::new());
    game.set_autopilot(true);
    game.start();

    // Simulated 60 Hz clock
    let mut now = 0.0;
    for _ in 0..ticks {
        now += FRAME_MS;
        if !game.frame(now) {
            break;
        }
    }

    let state = game.state();
    let summary = serde_json::json!({
        "seed": seed,
        "ticks": state.time_ticks,
        "phase": state.phase,
        "score": state.score,
        "high_score": state.high_score,
        "new_high_score": state.is_new_high_score(),
        "enemies_on_screen": state.enemies.len(),
        "spawn_interval_ms": state.spawner.interval_ms,
    });
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not format summary: {}", e),
    }
}
