//! Play-field geometry
//!
//! The field is split into three equal lanes. All sizes are authored for a
//! 400x700 field and scale with the configured dimensions: horizontal
//! quantities by `width / 400`, vertical ones by `height / 700`.

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Default for Field {
    fn default() -> Self {
        Self::new(FIELD_WIDTH, FIELD_HEIGHT)
    }
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    /// Horizontal scale relative to the reference field
    #[inline]
    pub fn scale_x(&self, v: f32) -> f32 {
        v * self.width / FIELD_WIDTH
    }

    /// Vertical scale relative to the reference field
    #[inline]
    pub fn scale_y(&self, v: f32) -> f32 {
        v * self.height / FIELD_HEIGHT
    }

    pub fn lane_width(&self) -> f32 {
        self.width / LANE_COUNT as f32
    }

    pub fn lane_center_x(&self, lane: usize) -> f32 {
        let lane = lane.min(LANE_COUNT - 1);
        self.lane_width() * lane as f32 + self.lane_width() / 2.0
    }

    /// X of the lane boundary between `lane` and `lane + 1`
    pub fn divider_x(&self, lane: usize) -> f32 {
        self.lane_width() * (lane + 1) as f32
    }

    pub fn car_size(&self) -> (f32, f32) {
        (self.scale_x(CAR_SIZE), self.scale_y(CAR_SIZE))
    }

    pub fn obstacle_size(&self) -> (f32, f32) {
        (self.scale_x(OBSTACLE_WIDTH), self.scale_y(OBSTACLE_HEIGHT))
    }

    pub fn collectible_size(&self) -> (f32, f32) {
        (
            self.scale_x(COLLECTIBLE_SIZE),
            self.scale_y(COLLECTIBLE_SIZE),
        )
    }

    /// Resting x of the player car in `lane`
    pub fn player_target_x(&self, lane: usize) -> f32 {
        self.lane_center_x(lane) - self.car_size().0 / 2.0
    }

    pub fn obstacle_x(&self, lane: usize) -> f32 {
        self.lane_center_x(lane) - self.obstacle_size().0 / 2.0
    }

    pub fn collectible_x(&self, lane: usize) -> f32 {
        self.lane_center_x(lane) - self.collectible_size().0 / 2.0
    }

    /// Fixed top edge of the player car
    pub fn player_y(&self) -> f32 {
        self.height - self.scale_y(PLAYER_BOTTOM_OFFSET)
    }

    pub fn spawn_y(&self) -> f32 {
        self.scale_y(SPAWN_Y)
    }

    /// Entities at or past this y are pruned
    pub fn prune_limit(&self) -> f32 {
        self.height + self.scale_y(PRUNE_MARGIN)
    }

    /// Visual bounds of the player car
    pub fn player_rect(&self, player_x: f32) -> Rect {
        let (w, h) = self.car_size();
        Rect::new(player_x, self.player_y(), w, h)
    }

    /// Collision bounds of the player car, inset from the sprite
    pub fn player_hitbox(&self, player_x: f32) -> Rect {
        self.player_rect(player_x).inset(
            self.scale_x(HITBOX_INSET_X),
            0.0,
            self.scale_x(HITBOX_SHRINK_W),
            self.scale_y(HITBOX_SHRINK_H),
        )
    }

    /// Horizontal range the player car may occupy
    pub fn player_x_bounds(&self) -> (f32, f32) {
        (0.0, self.width - self.car_size().0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_lane_targets() {
        let field = Field::default();
        // Lane centers at 200/3 * (2k + 1)
        assert!((field.player_target_x(0) - (400.0 / 6.0 - 35.0)).abs() < 1e-4);
        assert!((field.player_target_x(1) - 165.0).abs() < 1e-4);
        assert!((field.obstacle_x(2) - (400.0 * 5.0 / 6.0 - 30.0)).abs() < 1e-4);
        assert_eq!(field.player_y(), 570.0);
        assert_eq!(field.spawn_y(), -150.0);
        assert_eq!(field.prune_limit(), 800.0);
    }

    #[test]
    fn test_reference_hitbox() {
        let field = Field::default();
        let hitbox = field.player_hitbox(165.0);
        assert_eq!(hitbox, Rect::new(180.0, 570.0, 40.0, 50.0));
    }

    #[test]
    fn test_geometry_scales_with_field() {
        let field = Field::new(800.0, 1400.0);
        assert_eq!(field.car_size(), (140.0, 140.0));
        assert_eq!(field.player_y(), 1400.0 - 260.0);
        assert_eq!(field.spawn_y(), -300.0);
        assert!((field.player_target_x(1) - 330.0).abs() < 1e-3);
        let hitbox = field.player_hitbox(330.0);
        assert!((hitbox.size.x - 80.0).abs() < 1e-3);
        assert!((hitbox.size.y - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_lane_index_clamped() {
        let field = Field::default();
        assert_eq!(field.lane_center_x(7), field.lane_center_x(2));
    }

    #[test]
    fn test_targets_inside_bounds() {
        let field = Field::default();
        let (lo, hi) = field.player_x_bounds();
        for lane in 0..LANE_COUNT {
            let x = field.player_target_x(lane);
            assert!(x >= lo && x <= hi);
        }
    }
}
