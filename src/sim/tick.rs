//! Fixed-step simulation tick
//!
//! Advances the road by exactly one frame. Scoring is reported back to the
//! caller instead of being applied here.

use glam::Vec2;

use super::spawn::{RandomSource, spawn_collectible, spawn_obstacle};
use super::state::{LaneChange, SimulationState};
use crate::consts::*;

/// Outcome of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    Continue,
    /// The player hit an oncoming car; the run is over
    Collision,
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub status: TickStatus,
    /// Points earned this tick (teddies plus survival)
    pub points: u64,
    /// Teddies picked up this tick
    pub collected: u32,
}

impl TickReport {
    fn collision() -> Self {
        Self {
            status: TickStatus::Collision,
            points: 0,
            collected: 0,
        }
    }

    pub fn is_collision(&self) -> bool {
        self.status == TickStatus::Collision
    }
}

/// Advance the simulation by one step
///
/// `lane_change` is the single buffered request since the previous tick.
pub fn tick(
    state: &mut SimulationState,
    lane_change: Option<LaneChange>,
    rng: &mut impl RandomSource,
) -> TickReport {
    if let Some(change) = lane_change {
        state.change_lane(change);
    }

    // Difficulty ramp
    if state.speed < MAX_SPEED {
        state.speed = (state.speed + SPEED_INCREMENT).min(MAX_SPEED);
    }

    state.frame_count += 1;
    let field = state.field;
    let road_step = field.scale_y(state.speed as f32);
    state.scroll_offset = (state.scroll_offset + road_step).rem_euclid(field.height);

    // Drift toward the lane target
    let target_x = state.target_x();
    state.player_x += (target_x - state.player_x) * LANE_LERP;
    let (min_x, max_x) = field.player_x_bounds();
    state.player_x = state.player_x.clamp(min_x, max_x);

    spawn_obstacle(state, rng);
    spawn_collectible(state, rng);

    // Oncoming cars close faster than the road scrolls; teddies sit on the road
    let obstacle_step = Vec2::new(0.0, road_step * OBSTACLE_SPEED_FACTOR);
    for obstacle in &mut state.obstacles {
        obstacle.rect.translate(obstacle_step);
    }
    let collectible_step = Vec2::new(0.0, road_step);
    for collectible in &mut state.collectibles {
        collectible.rect.translate(collectible_step);
    }

    let hitbox = state.player_hitbox();
    if state.obstacles.iter().any(|o| hitbox.overlaps(&o.rect)) {
        return TickReport::collision();
    }

    let mut points = 0;
    let mut collected = 0;
    for collectible in &mut state.collectibles {
        if !collectible.collected && hitbox.overlaps(&collectible.rect) {
            collectible.collected = true;
            collected += 1;
            points += COLLECTIBLE_REWARD;
        }
    }

    if state.frame_count.is_multiple_of(SURVIVAL_INTERVAL) {
        points += SURVIVAL_REWARD;
    }

    let limit = field.prune_limit();
    state.obstacles.retain(|o| o.rect.top() < limit);
    state
        .collectibles
        .retain(|c| !c.collected && c.rect.top() < limit);

    TickReport {
        status: TickStatus::Continue,
        points,
        collected,
    }
}
