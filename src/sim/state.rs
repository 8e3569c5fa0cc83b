//! Simulation state and entity types
//!
//! One `SimulationState` exists per run. It is created when a run starts and
//! dropped when the run ends; nothing carries over between runs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::field::Field;
use crate::consts::*;

/// A requested one-lane move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneChange {
    Left,
    Right,
}

impl LaneChange {
    pub fn delta(self) -> i32 {
        match self {
            LaneChange::Left => -1,
            LaneChange::Right => 1,
        }
    }

    /// Map a signed direction (-1, 0, +1) to a lane change
    pub fn from_delta(delta: i32) -> Option<Self> {
        match delta.signum() {
            -1 => Some(LaneChange::Left),
            1 => Some(LaneChange::Right),
            _ => None,
        }
    }
}

/// An oncoming car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub lane: usize,
    pub rect: Rect,
}

/// A teddy lying on the road
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub lane: usize,
    pub rect: Rect,
    pub collected: bool,
}

/// Complete simulation state for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    pub field: Field,
    /// Authoritative lane (0 = left, 1 = center, 2 = right)
    pub player_lane: usize,
    /// Smoothed x of the car's left edge
    pub player_x: f32,
    /// Forward speed in reference units per tick
    pub speed: f64,
    /// Oncoming cars in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Teddies in spawn order
    pub collectibles: Vec<Collectible>,
    /// Ticks since the run started
    pub frame_count: u64,
    /// Road scroll position in [0, field.height)
    pub scroll_offset: f32,
}

impl SimulationState {
    pub fn new(field: Field) -> Self {
        Self {
            field,
            player_lane: START_LANE,
            player_x: field.width / 2.0 - field.car_size().0 / 2.0,
            speed: INITIAL_SPEED,
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            frame_count: 0,
            scroll_offset: 0.0,
        }
    }

    /// Apply a lane change. Clamped to the outer lanes; only the lane index
    /// moves here, `player_x` follows during the next ticks.
    pub fn change_lane(&mut self, change: LaneChange) {
        let lane = (self.player_lane as i32 + change.delta()).clamp(0, LANE_COUNT as i32 - 1);
        self.player_lane = lane as usize;
    }

    pub fn target_x(&self) -> f32 {
        self.field.player_target_x(self.player_lane)
    }

    pub fn player_rect(&self) -> Rect {
        self.field.player_rect(self.player_x)
    }

    pub fn player_hitbox(&self) -> Rect {
        self.field.player_hitbox(self.player_x)
    }

    /// Place an obstacle with its top edge at `y` in `lane`
    pub fn spawn_obstacle(&mut self, lane: usize, y: f32) {
        let lane = lane.min(LANE_COUNT - 1);
        let (w, h) = self.field.obstacle_size();
        self.obstacles.push(Obstacle {
            lane,
            rect: Rect {
                pos: Vec2::new(self.field.obstacle_x(lane), y),
                size: Vec2::new(w, h),
            },
        });
    }

    /// Place a collectible with its top edge at `y` in `lane`
    pub fn spawn_collectible(&mut self, lane: usize, y: f32) {
        let lane = lane.min(LANE_COUNT - 1);
        let (w, h) = self.field.collectible_size();
        self.collectibles.push(Collectible {
            lane,
            rect: Rect {
                pos: Vec2::new(self.field.collectible_x(lane), y),
                size: Vec2::new(w, h),
            },
            collected: false,
        });
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new(Field::default())
    }
}
