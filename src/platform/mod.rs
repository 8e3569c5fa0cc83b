//! Platform abstraction layer
//!
//! Browser glue for the canvas 2D surface and scene navigation. Storage
//! lives in `persistence`.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{BrowserNavigator, CanvasSurface};

/// Element ids the browser build expects in `index.html`
pub mod dom {
    pub const CANVAS: &str = "canvas";
    pub const HUD_SCORE: &str = "hud-score";
    pub const START_SCREEN: &str = "start-screen";
    pub const GAME_OVER: &str = "game-over";
    pub const FINAL_SCORE: &str = "final-score";
    pub const BEST_SCORE: &str = "best-score";
    pub const START_BUTTON: &str = "start-btn";
    pub const RESTART_BUTTON: &str = "restart-btn";
    pub const EXIT_BUTTON: &str = "exit-btn";

    pub const ALL: [&str; 9] = [
        CANVAS,
        HUD_SCORE,
        START_SCREEN,
        GAME_OVER,
        FINAL_SCORE,
        BEST_SCORE,
        START_BUTTON,
        RESTART_BUTTON,
        EXIT_BUTTON,
    ];

    /// Class that hides an overlay
    pub const HIDDEN: &str = "hidden";
}

/// Native navigator: there is no parent scene, so leaving just logs
#[derive(Debug, Default)]
pub struct LogNavigator;

impl crate::game::Navigator for LogNavigator {
    fn return_to_parent(&mut self) {
        log::info!("Leaving game (no parent scene)");
    }
}
