//! Spawn policy for oncoming cars and teddies
//!
//! Both spawners are gated on the tick counter. Randomness comes from a
//! `RandomSource` so runs can be replayed from a seed or scripted in tests.

use super::state::SimulationState;
use crate::consts::*;

/// Uniform random numbers in [0, 1)
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;

    /// Uniformly pick one of the lanes
    fn next_lane(&mut self) -> usize {
        ((self.next_unit() * LANE_COUNT as f32) as usize).min(LANE_COUNT - 1)
    }
}

impl<R: rand::Rng> RandomSource for R {
    fn next_unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Ticks between obstacle spawn attempts at the given speed
pub fn obstacle_spawn_interval(speed: f64) -> u64 {
    let interval = (OBSTACLE_SPAWN_BASE - OBSTACLE_SPAWN_SLOPE * speed).floor();
    (interval.max(0.0) as u64).max(OBSTACLE_SPAWN_MIN)
}

/// Obstacle spawn gate. Returns true if a car was spawned this tick.
///
/// The spacing check measures every existing car against the fixed spawn
/// row rather than against the nearest car.
pub fn spawn_obstacle(state: &mut SimulationState, rng: &mut impl RandomSource) -> bool {
    let interval = obstacle_spawn_interval(state.speed);
    if !state.frame_count.is_multiple_of(interval) {
        return false;
    }
    if rng.next_unit() <= OBSTACLE_SPAWN_THRESHOLD {
        return false;
    }

    let lane = rng.next_lane();
    let spawn_y = state.field.spawn_y();
    let spacing = state.field.scale_y(OBSTACLE_SPACING);
    let too_close = state
        .obstacles
        .iter()
        .any(|o| (o.rect.top() - spawn_y).abs() < spacing);
    if too_close {
        return false;
    }

    state.spawn_obstacle(lane, spawn_y);
    true
}

/// Collectible spawn gate. Returns true if a teddy was spawned this tick.
pub fn spawn_collectible(state: &mut SimulationState, rng: &mut impl RandomSource) -> bool {
    if !state.frame_count.is_multiple_of(COLLECTIBLE_SPAWN_INTERVAL) {
        return false;
    }

    let lane = rng.next_lane();
    let spawn_y = state.field.spawn_y();
    let clearance = state.field.scale_y(COLLECTIBLE_CLEARANCE);
    let blocked = state
        .obstacles
        .iter()
        .any(|o| o.lane == lane && (o.rect.top() - spawn_y).abs() < clearance);
    if blocked {
        return false;
    }

    state.spawn_collectible(lane, spawn_y);
    true
}
