//! LIFF Shooter entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, MouseEvent};

    use liff_shooter::ScoreStore;
    use liff_shooter::audio::AudioManager;
    use liff_shooter::persistence::LocalStorageStore;
    use liff_shooter::platform::{client_to_field_x, now_ms};
    use liff_shooter::renderer::CanvasRenderer;
    use liff_shooter::settings::Settings;
    use liff_shooter::share::{ShareCard, spawn_share};
    use liff_shooter::sim::{ClickOutcome, GameState, Spawner, handle_click, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        spawner: Spawner,
        audio: AudioManager,
        store: LocalStorageStore,
        renderer: CanvasRenderer,
        settings: Settings,
        share_card: ShareCard,
        /// An animation frame is scheduled
        running: bool,
    }

    impl Game {
        fn new(renderer: CanvasRenderer, seed: u64) -> Self {
            let settings = Settings::load();
            let store = LocalStorageStore::default();
            let high_score = store.load_high_score();
            log::info!("Loaded high score: {}", high_score);

            Self {
                state: GameState::new(high_score),
                spawner: Spawner::new(seed, now_ms()),
                audio: AudioManager::from_settings(&settings),
                store,
                renderer,
                settings,
                share_card: ShareCard::default(),
                running: false,
            }
        }

        /// Advance one frame
        fn update(&mut self, time: f64) {
            tick(
                &mut self.state,
                &mut self.spawner,
                time,
                &self.audio,
                &mut self.store,
            );
        }

        /// Render the current frame
        fn render(&self) {
            if let Err(e) = self.renderer.render(&self.state) {
                log::warn!("Render error: {:?}", e);
            }
        }

        /// Apply a click; true when the frame loop has to be started again
        fn click(&mut self, field_x: f32) -> bool {
            match handle_click(&mut self.state, field_x, &self.audio) {
                ClickOutcome::Restarted => {
                    self.spawner.rearm(now_ms());
                    self.render();
                    !self.running
                }
                ClickOutcome::Fired(_) => false,
            }
        }

        /// Show the panel matching the current phase
        fn update_hud(&self) {
            let Some(document) = document() else { return };
            let over = self.state.is_game_over();

            if let Some(el) = document.get_element_by_id("instructions") {
                let _ = el.set_attribute("class", if over { "hidden" } else { "" });
            }
            if let Some(el) = document.get_element_by_id("game-over") {
                let _ = el.set_attribute("class", if over { "" } else { "hidden" });
            }
        }

        /// Page hidden/shown
        fn on_visibility(&mut self, hidden: bool) {
            if !self.settings.mute_on_blur {
                return;
            }
            self.audio.set_muted(hidden || self.settings.muted);
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("LIFF Shooter starting...");

        let document = document().ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        let renderer = CanvasRenderer::new(&canvas)?;
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(renderer, seed)));
        log::info!("Game initialized with seed: {}", seed);

        setup_click_handler(&canvas, game.clone());
        setup_share_button(&document, game.clone());
        setup_visibility(&document, game.clone());

        game.borrow().update_hud();
        start_loop(game);

        log::info!("LIFF Shooter running!");
        Ok(())
    }

    fn setup_click_handler(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let rect = canvas_clone.get_bounding_client_rect();
            let x = client_to_field_x(event.client_x() as f64, rect.left(), rect.width());

            let restart = {
                let mut g = game.borrow_mut();
                let restart = g.click(x);
                g.update_hud();
                restart
            };
            if restart {
                start_loop(game.clone());
            }
        });
        let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_share_button(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(btn) = document.get_element_by_id("share-btn") else {
            log::warn!("No #share-btn element, sharing disabled");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let g = game.borrow();
            spawn_share(g.share_card.clone(), g.state.score);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_visibility(document: &Document, game: Rc<RefCell<Game>>) {
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let hidden = document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
            game.borrow_mut().on_visibility(hidden);
        });
        let _ = document.add_event_listener_with_callback(
            "visibilitychange",
            closure.as_ref().unchecked_ref(),
        );
        closure.forget();
    }

    fn start_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().running = true;
        request_animation_frame(game);
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();

            if g.state.is_game_over() {
                // Last frame shows the banner; a click restarts the loop
                g.running = false;
                g.update_hud();
                return;
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("LIFF Shooter (native) starting...");
    log::info!("Native mode has no canvas - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(12345);
    headless::autoplay(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless autoplay session through the same update and click paths
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use liff_shooter::persistence::MemoryStore;
    use liff_shooter::sim::{GameState, Spawner, handle_click, tick};
    use liff_shooter::{AudioManager, ScoreStore};

    /// 60 fps frame clock
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Ten minutes of play at most
    const MAX_FRAMES: u32 = 60 * 60 * 10;
    /// Fire every this many frames
    const FIRE_EVERY: u32 = 8;

    /// Center x of the enemy closest to the bottom
    fn autopilot_target(state: &GameState) -> Option<f32> {
        state
            .enemies
            .iter()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|e| e.pos.x + e.size.x / 2.0)
    }

    pub fn autoplay(seed: u64) {
        let audio = AudioManager::new();
        let mut store = MemoryStore::default();
        let mut state = GameState::new(store.load_high_score());
        let mut spawner = Spawner::new(seed, 0.0);

        let mut frame = 0;
        while frame < MAX_FRAMES && !state.is_game_over() {
            frame += 1;
            let now = frame as f64 * FRAME_MS;

            if frame % FIRE_EVERY == 0 {
                if let Some(x) = autopilot_target(&state) {
                    handle_click(&mut state, x, &audio);
                }
            }
            tick(&mut state, &mut spawner, now, &audio, &mut store);
        }

        log::info!(
            "Autoplay finished after {} frames ({:.1}s): score {}, level {}, power {}",
            frame,
            frame as f64 * FRAME_MS / 1000.0,
            state.score,
            state.difficulty,
            state.player.power_level
        );
        println!("score={} frames={} seed={}", state.score, frame, seed);
    }
}
