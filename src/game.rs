//! Session state machine and frame loop
//!
//! `Game` is the top-level driver. Each animation frame the platform calls
//! `frame()`, which ticks the simulation once and paints it. A crash ends the
//! session and stops scheduling until the player restarts.

use crate::input::{InputAdapter, KeyAction, autopilot, key_action};
use crate::persistence::ScoreStore;
use crate::renderer::{self, Surface};
use crate::settings::Settings;
use crate::sim::{LaneChange, RandomSource, SimulationState, TickStatus, tick};

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    NotStarted,
    Playing,
    Ended,
}

/// Whether the platform should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Score bookkeeping for the current session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub status: GameStatus,
    pub score: u64,
    pub best_score: u64,
}

/// Parent-scene navigation
pub trait Navigator {
    /// Leave the game and return to the scene that opened it
    fn return_to_parent(&mut self);
}

/// The game controller
pub struct Game<S: ScoreStore, R: RandomSource> {
    session: GameSession,
    sim: Option<SimulationState>,
    input: InputAdapter,
    settings: Settings,
    store: S,
    rng: R,
    /// Bumped whenever a frame loop starts or is torn down
    generation: u64,
}

impl<S: ScoreStore, R: RandomSource> Game<S, R> {
    pub fn new(settings: Settings, store: S, rng: R) -> Self {
        let best_score = store.best_score();
        Self {
            session: GameSession {
                status: GameStatus::NotStarted,
                score: 0,
                best_score,
            },
            sim: None,
            input: InputAdapter::new(),
            settings,
            store,
            rng,
            generation: 0,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn status(&self) -> GameStatus {
        self.session.status
    }

    pub fn score(&self) -> u64 {
        self.session.score
    }

    pub fn best_score(&self) -> u64 {
        self.session.best_score
    }

    /// Live simulation state, only while playing
    pub fn sim(&self) -> Option<&SimulationState> {
        self.sim.as_ref()
    }

    pub fn sim_mut(&mut self) -> Option<&mut SimulationState> {
        self.sim.as_mut()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Identifies the current frame loop
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a frame callback scheduled under `generation` may still run
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation && self.session.status == GameStatus::Playing
    }

    /// Begin a fresh run. Returns false if a run is already in progress.
    pub fn start(&mut self) -> bool {
        if self.session.status == GameStatus::Playing {
            log::debug!("Start ignored: already playing");
            return false;
        }

        self.sim = Some(SimulationState::new(self.settings.field()));
        self.session.score = 0;
        self.session.status = GameStatus::Playing;
        self.input.clear();
        self.generation += 1;
        log::info!("Run started (loop generation {})", self.generation);
        true
    }

    /// Start again after a crash
    pub fn restart(&mut self) -> bool {
        self.start()
    }

    /// Queue a lane change for the next tick. Ignored unless playing.
    pub fn request_lane_change(&mut self, change: LaneChange) {
        if self.session.status == GameStatus::Playing {
            self.input.request(change);
        }
    }

    /// Switch the demo driver on or off and remember the choice
    pub fn set_autopilot(&mut self, enabled: bool) {
        self.settings.autopilot = enabled;
        log::info!("Autopilot: {}", enabled);
        if let Err(e) = self.settings.save() {
            log::warn!("Could not persist settings: {}", e);
        }
    }

    /// Route a key press. Returns the action taken, if any.
    pub fn key_down(&mut self, key: &str, navigator: &mut impl Navigator) -> Option<KeyAction> {
        let action = key_action(key)?;
        match action {
            KeyAction::Steer(change) => self.request_lane_change(change),
            KeyAction::Start => {
                self.start();
            }
            KeyAction::Exit => self.exit(navigator),
            KeyAction::ToggleAutopilot => self.set_autopilot(!self.settings.autopilot),
        }
        Some(action)
    }

    /// Advance the simulation by one tick
    pub fn step(&mut self) -> LoopControl {
        if self.session.status != GameStatus::Playing {
            return LoopControl::Stop;
        }
        let Some(sim) = self.sim.as_mut() else {
            return LoopControl::Stop;
        };

        let buffered = self.input.take();
        let change = if self.settings.autopilot {
            autopilot(sim)
        } else {
            buffered
        };

        let report = tick(sim, change, &mut self.rng);
        if report.status == TickStatus::Collision {
            self.end();
            return LoopControl::Stop;
        }

        self.session.score += report.points;
        LoopControl::Continue
    }

    /// One animation frame: tick, then paint if the run continues
    pub fn frame<T: Surface + ?Sized>(&mut self, surface: Option<&mut T>) -> LoopControl {
        let control = self.step();
        if control == LoopControl::Continue {
            self.render(surface);
        }
        control
    }

    /// Paint the live simulation, if any
    pub fn render<T: Surface + ?Sized>(&self, surface: Option<&mut T>) {
        if let Some(sim) = self.sim.as_ref() {
            renderer::render(sim, &self.settings, surface);
        }
    }

    /// Finish the run after a crash and record a new best
    fn end(&mut self) {
        self.session.status = GameStatus::Ended;
        self.sim = None;
        self.input.clear();

        let score = self.session.score;
        log::info!("Crash! Final score {}", score);
        if score > self.session.best_score {
            self.session.best_score = score;
            match self.store.set_best_score(score) {
                Ok(()) => log::info!("New best score: {}", score),
                Err(e) => log::warn!("Could not persist best score: {}", e),
            }
        }
    }

    /// Tear down the loop and hand control back to the parent scene
    ///
    /// An abandoned run is not recorded.
    pub fn exit(&mut self, navigator: &mut impl Navigator) {
        if self.session.status == GameStatus::Playing {
            log::info!("Run abandoned at score {}", self.session.score);
        }
        self.sim = None;
        self.input.clear();
        self.session.status = GameStatus::NotStarted;
        self.session.score = 0;
        self.generation += 1;
        navigator.return_to_parent();
    }
}
