//! Colors for game elements

use super::Color;

pub const ROAD: Color = [0.267, 0.267, 0.267, 1.0];
pub const GRASS: Color = [0.298, 0.686, 0.314, 1.0];
pub const SPEED_LINE: Color = [1.0, 1.0, 1.0, 0.1];
pub const LANE_MARKER: Color = [1.0, 1.0, 1.0, 1.0];

// Oncoming blue three-wheeler
pub const OBSTACLE_BODY: Color = [0.0, 0.4, 0.8, 1.0];
pub const OBSTACLE_ROOF: Color = [0.0, 0.298, 0.6, 1.0];
pub const OBSTACLE_GLASS: Color = [0.678, 0.847, 0.902, 1.0];
pub const WHEEL_SHADOW: Color = [0.0, 0.0, 0.0, 0.5];

// Teddy
pub const TEDDY_FUR: Color = [0.545, 0.271, 0.075, 1.0];
pub const TEDDY_MUZZLE: Color = [0.804, 0.522, 0.247, 1.0];
pub const TEDDY_EYE: Color = [0.0, 0.0, 0.0, 1.0];

// Player car
pub const CAR_SHADOW: Color = [0.0, 0.0, 0.0, 0.4];
pub const CAR_BODY: Color = [0.678, 1.0, 0.184, 1.0];
pub const CAR_HOOD: Color = [0.067, 0.067, 0.067, 1.0];
pub const CAR_ROOF: Color = [0.561, 0.808, 0.0, 1.0];
pub const CAR_GLASS: Color = [0.529, 0.808, 0.922, 1.0];

pub const HEADLIGHT: Color = [1.0, 1.0, 1.0, 1.0];

/// CSS `rgba()` string for canvas fill/stroke styles
pub fn css(color: Color) -> String {
    let [r, g, b, a] = color;
    format!(
        "rgba({}, {}, {}, {})",
        (r.clamp(0.0, 1.0) * 255.0).round() as u8,
        (g.clamp(0.0, 1.0) * 255.0).round() as u8,
        (b.clamp(0.0, 1.0) * 255.0).round() as u8,
        a.clamp(0.0, 1.0)
    )
}
