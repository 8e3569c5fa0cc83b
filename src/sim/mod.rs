//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, no wall-clock time
//! - Injected random source only
//! - Spawn order is insertion order
//! - No rendering, logging or platform dependencies

pub mod collision;
pub mod field;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use field::Field;
pub use spawn::{RandomSource, obstacle_spawn_interval};
pub use state::{Collectible, LaneChange, Obstacle, SimulationState};
pub use tick::{TickReport, TickStatus, tick};
