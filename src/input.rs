//! Keyboard input and lane-change buffering
//!
//! Key presses arrive between frames. Only the most recent direction is kept
//! and it is consumed by the next tick, so mashing a key moves one lane per
//! tick at most.

use crate::consts::LANE_COUNT;
use crate::sim::{LaneChange, SimulationState};

/// What a key press means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Steer(LaneChange),
    /// Start a run, or restart after a crash
    Start,
    /// Leave the game
    Exit,
    /// Toggle demo mode
    ToggleAutopilot,
}

/// Map a `KeyboardEvent.key` value to an action
pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(KeyAction::Steer(LaneChange::Left)),
        "ArrowRight" | "d" | "D" => Some(KeyAction::Steer(LaneChange::Right)),
        " " | "Enter" => Some(KeyAction::Start),
        "Escape" => Some(KeyAction::Exit),
        "i" | "I" => Some(KeyAction::ToggleAutopilot),
        _ => None,
    }
}

/// One-slot buffer of the last requested lane change
#[derive(Debug, Clone, Default)]
pub struct InputAdapter {
    pending: Option<LaneChange>,
}

impl InputAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a request; replaces anything not yet consumed
    pub fn request(&mut self, change: LaneChange) {
        self.pending = Some(change);
    }

    pub fn pending(&self) -> Option<LaneChange> {
        self.pending
    }

    /// Hand the buffered request to the tick and clear it
    pub fn take(&mut self) -> Option<LaneChange> {
        self.pending.take()
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}

/// How far ahead of the car the autopilot looks, in field heights
const AUTOPILOT_LOOKAHEAD: f32 = 0.6;

/// Demo driver: steer one lane toward the lane with the most room ahead
///
/// Lanes are scored by the distance to the nearest car approaching the
/// player. A free lane holding a teddy wins ties.
pub fn autopilot(state: &SimulationState) -> Option<LaneChange> {
    let field = &state.field;
    let player = state.player_rect();
    let horizon = player.top() - field.height * AUTOPILOT_LOOKAHEAD;

    let clearance = |lane: usize| -> f32 {
        state
            .obstacles
            .iter()
            .filter(|o| {
                o.lane == lane && o.rect.bottom() > horizon && o.rect.top() < player.bottom()
            })
            .map(|o| (player.top() - o.rect.bottom()).max(0.0))
            .fold(f32::INFINITY, f32::min)
    };
    let has_teddy = |lane: usize| {
        state
            .collectibles
            .iter()
            .any(|c| c.lane == lane && !c.collected && c.rect.top() < player.bottom())
    };

    let current = state.player_lane;
    let mut best = current;
    let mut best_room = clearance(current);
    let mut best_teddy = has_teddy(current);

    // Only adjacent lanes are reachable in one move
    for lane in [current.wrapping_sub(1), current + 1] {
        if lane >= LANE_COUNT {
            continue;
        }
        let room = clearance(lane);
        let teddy = has_teddy(lane);
        let better = room > best_room || (room == best_room && teddy && !best_teddy);
        if better {
            best = lane;
            best_room = room;
            best_teddy = teddy;
        }
    }

    LaneChange::from_delta(best as i32 - current as i32)
}
