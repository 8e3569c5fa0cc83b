//! Mini Rush - A three-lane wrong-way driving game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lanes, spawning, collisions, scoring)
//! - `renderer`: 2D drawing of the simulation onto a raster surface
//! - `input`: Key mapping and per-tick lane-change buffering
//! - `game`: Session state machine and frame loop
//! - `persistence`: Best-score storage
//! - `platform`: Browser glue (canvas, LocalStorage, navigation)

pub mod game;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{Game, GameSession, GameStatus, LoopControl, Navigator};
pub use settings::Settings;

/// Game configuration constants
///
/// Sizes and positions are for the reference 400x700 field; `sim::Field`
/// scales them to the configured field size.
pub mod consts {
    /// Reference field dimensions
    pub const FIELD_WIDTH: f32 = 400.0;
    pub const FIELD_HEIGHT: f32 = 700.0;
    pub const LANE_COUNT: usize = 3;

    /// Player car sprite (square)
    pub const CAR_SIZE: f32 = 70.0;
    /// Distance from the bottom of the field to the top of the car
    pub const PLAYER_BOTTOM_OFFSET: f32 = 130.0;
    /// Hitbox insets: x inset on the left, total width/height shrink
    pub const HITBOX_INSET_X: f32 = 15.0;
    pub const HITBOX_SHRINK_W: f32 = 30.0;
    pub const HITBOX_SHRINK_H: f32 = 20.0;
    pub const START_LANE: usize = 1;
    /// Lane smoothing factor per tick
    pub const LANE_LERP: f32 = 0.2;

    /// Oncoming cars
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    pub const OBSTACLE_HEIGHT: f32 = 100.0;
    /// Teddy collectibles (square)
    pub const COLLECTIBLE_SIZE: f32 = 40.0;
    /// Row above the field where new entities appear
    pub const SPAWN_Y: f32 = -150.0;
    /// Entities are dropped once they pass the bottom edge by this much
    pub const PRUNE_MARGIN: f32 = 100.0;

    /// Speed (reference units per tick). Accumulated in f64 so the spawn
    /// interval floors land on the same ticks over long runs.
    pub const INITIAL_SPEED: f64 = 8.0;
    pub const MAX_SPEED: f64 = 25.0;
    pub const SPEED_INCREMENT: f64 = 0.005;
    /// Oncoming traffic closes faster than the road scrolls
    pub const OBSTACLE_SPEED_FACTOR: f32 = 1.5;

    /// Obstacle spawn gate: interval = max(MIN, BASE - SLOPE * speed)
    pub const OBSTACLE_SPAWN_BASE: f64 = 100.0;
    pub const OBSTACLE_SPAWN_SLOPE: f64 = 2.0;
    pub const OBSTACLE_SPAWN_MIN: u64 = 30;
    /// Spawn only when random() > this threshold (60% chance)
    pub const OBSTACLE_SPAWN_THRESHOLD: f32 = 0.4;
    /// No obstacle may sit within this distance of the spawn row
    pub const OBSTACLE_SPACING: f32 = 200.0;

    /// Collectible spawn gate
    pub const COLLECTIBLE_SPAWN_INTERVAL: u64 = 120;
    pub const COLLECTIBLE_CLEARANCE: f32 = 150.0;

    /// Scoring
    pub const COLLECTIBLE_REWARD: u64 = 10;
    pub const SURVIVAL_INTERVAL: u64 = 10;
    pub const SURVIVAL_REWARD: u64 = 1;
}
