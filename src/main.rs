//! Mini Rush entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use mini_rush::input::{KeyAction, key_action};
    use mini_rush::persistence::LocalStorageStore;
    use mini_rush::platform::{BrowserNavigator, CanvasSurface, dom};
    use mini_rush::{Game, GameStatus, LoopControl, Settings};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Browser-side wrapper holding the game and its frame scheduling
    struct App {
        game: Game<LocalStorageStore, Pcg32>,
        surface: Option<CanvasSurface>,
        navigator: BrowserNavigator,
        /// Handle of the pending requestAnimationFrame callback
        frame_handle: Option<i32>,
    }

    impl App {
        /// Drop any pending frame callback
        fn cancel_frame(&mut self) {
            if let Some(handle) = self.frame_handle.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(handle);
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let status = self.game.status();

            if let Some(el) = document.get_element_by_id(dom::HUD_SCORE) {
                let class = if self.game.settings().show_hud { "" } else { dom::HIDDEN };
                let _ = el.set_attribute("class", class);
                el.set_text_content(Some(&format!("{} PTS", self.game.score())));
            }

            if let Some(el) = document.get_element_by_id(dom::START_SCREEN) {
                let class = if status == GameStatus::NotStarted { "" } else { dom::HIDDEN };
                let _ = el.set_attribute("class", class);
            }

            if let Some(el) = document.get_element_by_id(dom::GAME_OVER) {
                if status == GameStatus::Ended {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id(dom::FINAL_SCORE) {
                        score_el.set_text_content(Some(&self.game.score().to_string()));
                    }
                    if let Some(best_el) = document.get_element_by_id(dom::BEST_SCORE) {
                        best_el.set_text_content(Some(&self.game.best_score().to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", dom::HIDDEN);
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Mini Rush starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document to mount on");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id(dom::CANVAS)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("Page has no <canvas id=\"{}\">", dom::CANVAS);
            return;
        };

        let settings = Settings::load();
        canvas.set_width(settings.field_width as u32);
        canvas.set_height(settings.field_height as u32);

        let surface = CanvasSurface::new(&canvas);
        if surface.is_none() {
            log::warn!("Canvas 2D context unavailable - frames will be skipped");
        }

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(settings, LocalStorageStore::new(), Pcg32::seed_from_u64(seed));
        log::info!("Game initialized with seed: {}", seed);

        let app = Rc::new(RefCell::new(App {
            game,
            surface,
            navigator: BrowserNavigator,
            frame_handle: None,
        }));

        setup_keyboard(app.clone());
        setup_buttons(app.clone());
        app.borrow().update_hud();

        log::info!("Mini Rush ready!");
    }

    /// Start a run and its frame loop
    fn start_run(app: &Rc<RefCell<App>>) {
        let generation = {
            let mut a = app.borrow_mut();
            if !a.game.start() {
                return;
            }
            a.cancel_frame();
            a.update_hud();
            a.game.generation()
        };
        request_animation_frame(app.clone(), generation);
    }

    fn exit_game(app: &Rc<RefCell<App>>) {
        let mut a = app.borrow_mut();
        a.cancel_frame();
        let App { game, navigator, .. } = &mut *a;
        game.exit(navigator);
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let key = event.key();
            match key_action(&key) {
                Some(KeyAction::Start) => start_run(&app),
                Some(KeyAction::Exit) => exit_game(&app),
                Some(_) => {
                    let mut a = app.borrow_mut();
                    let App { game, navigator, .. } = &mut *a;
                    game.key_down(&key, navigator);
                }
                None => {}
            }
        });
        let _ = window
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        for id in [dom::START_BUTTON, dom::RESTART_BUTTON] {
            if let Some(btn) = document.get_element_by_id(id) {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    start_run(&app);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        if let Some(btn) = document.get_element_by_id(dom::EXIT_BUTTON) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                exit_game(&app);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>, generation: u64) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let app_for_frame = app.clone();
        let closure = Closure::once(move |_time: f64| {
            game_loop(app_for_frame, generation);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => app.borrow_mut().frame_handle = Some(handle),
            Err(e) => log::warn!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, generation: u64) {
        let control = {
            let mut a = app.borrow_mut();
            a.frame_handle = None;
            // Stale callback from a stopped or replaced loop
            if !a.game.is_current(generation) {
                return;
            }

            let App { game, surface, .. } = &mut *a;
            let control = game.frame(surface.as_mut());
            a.update_hud();
            control
        };

        if control == LoopControl::Continue {
            request_animation_frame(app, generation);
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

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use mini_rush::persistence::MemoryStore;
    use mini_rush::platform::LogNavigator;
    use mini_rush::renderer::Framebuffer;
    use mini_rush::{Game, LoopControl, Settings};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    env_logger::init();
    log::info!("Mini Rush (native) starting...");
    log::info!(
        "Native mode runs a headless autopilot session - run with `trunk serve` for the web version"
    );

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(12345);

    let settings = Settings {
        autopilot: true,
        ..Settings::load()
    };
    let mut framebuffer = Framebuffer::new(
        settings.field_width as u32,
        settings.field_height as u32,
    );
    let mut game = Game::new(settings, MemoryStore::new(), Pcg32::seed_from_u64(seed));
    game.start();

    // Cap the demo at five minutes of 60 Hz frames
    let mut frames = 0u32;
    while frames < 60 * 60 * 5 {
        frames += 1;
        if game.frame(Some(&mut framebuffer)) == LoopControl::Stop {
            break;
        }
    }

    println!(
        "Seed {}: {} frames, score {} (best {})",
        seed,
        frames,
        game.score(),
        game.best_score()
    );
    game.exit(&mut LogNavigator);
}
