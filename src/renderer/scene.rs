//! Scene composition: road, traffic, teddies and the player car
//!
//! Draw order is back to front. Sprite details are authored in reference
//! field units and scaled with the field.

use glam::Vec2;

use super::palette::*;
use super::{Color, Surface};
use crate::settings::Settings;
use crate::sim::{Collectible, Field, Obstacle, Rect, SimulationState};

/// Width of the grass strip on each side
const GRASS_WIDTH: f32 = 20.0;
/// Speed lines: spacing, size and inset from the road edge
const SPEED_LINE_SPACING: u32 = 50;
const SPEED_LINE_SIZE: Vec2 = Vec2::new(5.0, 30.0);
const SPEED_LINE_INSET: f32 = 25.0;
/// Lane dividers
const DIVIDER_DASH: f32 = 40.0;
const DIVIDER_WIDTH: f32 = 6.0;
const DIVIDER_OVERHANG: f32 = 100.0;

/// Paint one frame. A missing surface skips the frame.
pub fn render<T: Surface + ?Sized>(
    state: &SimulationState,
    settings: &Settings,
    surface: Option<&mut T>,
) {
    let Some(surface) = surface else {
        return;
    };
    let pen = Pen {
        field: state.field,
    };

    surface.clear();
    draw_road(surface, &pen, state, settings.speed_lines());
    for obstacle in &state.obstacles {
        draw_obstacle(surface, &pen, obstacle);
    }
    for collectible in state.collectibles.iter().filter(|c| !c.collected) {
        draw_collectible(surface, &pen, collectible);
    }
    draw_player(surface, &pen, state.player_x, state.field.player_y());
}

/// Scales reference-unit offsets to the current field
struct Pen {
    field: Field,
}

impl Pen {
    fn x(&self, v: f32) -> f32 {
        self.field.scale_x(v)
    }

    fn y(&self, v: f32) -> f32 {
        self.field.scale_y(v)
    }

    /// Rect at `origin + (dx, dy)` with reference size (w, h)
    fn rect(&self, origin: Vec2, dx: f32, dy: f32, w: f32, h: f32) -> Rect {
        Rect::new(
            origin.x + self.x(dx),
            origin.y + self.y(dy),
            self.x(w),
            self.y(h),
        )
    }

    fn point(&self, origin: Vec2, dx: f32, dy: f32) -> Vec2 {
        origin + Vec2::new(self.x(dx), self.y(dy))
    }

    fn radii(&self, rx: f32, ry: f32) -> Vec2 {
        Vec2::new(self.x(rx), self.y(ry))
    }

    fn scaled(&self, v: Vec2) -> Vec2 {
        self.radii(v.x, v.y)
    }

    fn dot<T: Surface + ?Sized>(&self, surface: &mut T, center: Vec2, r: f32, color: Color) {
        surface.fill_ellipse(center, self.radii(r, r), color);
    }
}

fn draw_road<T: Surface + ?Sized>(
    surface: &mut T,
    pen: &Pen,
    state: &SimulationState,
    speed_lines: bool,
) {
    let field = &state.field;
    let (w, h) = (field.width, field.height);

    surface.fill_rect(Rect::new(0.0, 0.0, w, h), ROAD);

    let grass = pen.x(GRASS_WIDTH);
    surface.fill_rect(Rect::new(0.0, 0.0, grass, h), GRASS);
    surface.fill_rect(Rect::new(w - grass, 0.0, grass, h), GRASS);

    if speed_lines {
        let size = pen.scaled(SPEED_LINE_SIZE);
        let inset = pen.x(SPEED_LINE_INSET);
        // Strips blink in alternating pairs as the frame counter advances
        let blink = state.frame_count.wrapping_mul(10);
        for i in (0..crate::consts::FIELD_HEIGHT as u32).step_by(SPEED_LINE_SPACING as usize) {
            if (i as u64).wrapping_add(blink) % 100 >= 50 {
                continue;
            }
            let y = (pen.y(i as f32) + state.scroll_offset).rem_euclid(h);
            surface.fill_rect(Rect::new(inset, y, size.x, size.y), SPEED_LINE);
            surface.fill_rect(
                Rect::new(w - inset - size.x, y, size.x, size.y),
                SPEED_LINE,
            );
        }
    }

    let dash = pen.y(DIVIDER_DASH);
    let overhang = pen.y(DIVIDER_OVERHANG);
    for lane in 0..crate::consts::LANE_COUNT - 1 {
        surface.dashed_vline(
            field.divider_x(lane),
            -overhang,
            h + overhang,
            pen.x(DIVIDER_WIDTH),
            dash,
            dash,
            state.scroll_offset,
            LANE_MARKER,
        );
    }
}

fn draw_obstacle<T: Surface + ?Sized>(surface: &mut T, pen: &Pen, obstacle: &Obstacle) {
    let r = obstacle.rect;
    let o = r.pos;
    // Reference-unit size of this car
    let w = r.size.x / pen.x(1.0);
    let h = r.size.y / pen.y(1.0);

    surface.fill_rect(r, OBSTACLE_BODY);
    surface.fill_rect(pen.rect(o, 5.0, 10.0, w - 10.0, h - 30.0), OBSTACLE_ROOF);
    // Windshield faces the player
    surface.fill_rect(pen.rect(o, 8.0, 60.0, w - 16.0, 20.0), OBSTACLE_GLASS);
    pen.dot(surface, pen.point(o, 10.0, 90.0), 5.0, HEADLIGHT);
    pen.dot(surface, pen.point(o, w - 10.0, 90.0), 5.0, HEADLIGHT);
    surface.fill_rect(pen.rect(o, 5.0, h - 5.0, 10.0, 10.0), WHEEL_SHADOW);
    surface.fill_rect(pen.rect(o, w - 15.0, h - 5.0, 10.0, 10.0), WHEEL_SHADOW);
}

fn draw_collectible<T: Surface + ?Sized>(surface: &mut T, pen: &Pen, teddy: &Collectible) {
    let r = teddy.rect;
    let o = r.pos;
    let center = r.center();
    let w = r.size.x / pen.x(1.0);

    surface.fill_ellipse(center, r.size * 0.5, TEDDY_FUR);
    pen.dot(surface, pen.point(o, 8.0, 8.0), 6.0, TEDDY_MUZZLE);
    pen.dot(surface, pen.point(o, w - 8.0, 8.0), 6.0, TEDDY_MUZZLE);
    surface.fill_ellipse(
        pen.point(center, 0.0, 5.0),
        pen.radii(10.0, 8.0),
        TEDDY_MUZZLE,
    );
    pen.dot(surface, pen.point(center, -4.0, 0.0), 2.0, TEDDY_EYE);
    pen.dot(surface, pen.point(center, 4.0, 0.0), 2.0, TEDDY_EYE);
}

fn draw_player<T: Surface + ?Sized>(surface: &mut T, pen: &Pen, x: f32, y: f32) {
    let o = Vec2::new(x, y);
    let size = crate::consts::CAR_SIZE;

    surface.fill_ellipse(
        pen.point(o, size / 2.0, size - 5.0),
        pen.radii(size / 2.0 + 5.0, 10.0),
        CAR_SHADOW,
    );
    surface.fill_round_rect(pen.rect(o, 0.0, 0.0, size, size), pen.x(10.0), CAR_BODY);
    // Black hood with a center stripe
    surface.fill_rect(pen.rect(o, size / 2.0 - 10.0, 0.0, 20.0, 30.0), CAR_HOOD);
    surface.fill_round_rect(
        pen.rect(o, 5.0, 5.0, size - 10.0, 25.0),
        pen.x(5.0),
        CAR_HOOD,
    );
    surface.fill_rect(pen.rect(o, 5.0, 30.0, size - 10.0, 30.0), CAR_ROOF);
    surface.fill_rect(pen.rect(o, 8.0, 35.0, size - 16.0, 15.0), CAR_GLASS);
    pen.dot(surface, pen.point(o, 10.0, 10.0), 6.0, HEADLIGHT);
    pen.dot(surface, pen.point(o, size - 10.0, 10.0), 6.0, HEADLIGHT);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Framebuffer;
    use crate::sim::spawn::tests::Scripted;
    use crate::sim::tick;

    /// Records draw calls instead of painting
    #[derive(Default)]
    struct CallLog {
        calls: Vec<(&'static str, Color)>,
    }

    impl Surface for CallLog {
        fn clear(&mut self) {
            self.calls.clear();
        }

        fn fill_rect(&mut self, _rect: Rect, color: Color) {
            self.calls.push(("rect", color));
        }

        fn fill_round_rect(&mut self, _rect: Rect, _radius: f32, color: Color) {
            self.calls.push(("round_rect", color));
        }

        fn fill_ellipse(&mut self, _center: Vec2, _radii: Vec2, color: Color) {
            self.calls.push(("ellipse", color));
        }

        fn dashed_vline(
            &mut self,
            _x: f32,
            _y0: f32,
            _y1: f32,
            _width: f32,
            _dash: f32,
            _gap: f32,
            _phase: f32,
            color: Color,
        ) {
            self.calls.push(("dashed", color));
        }
    }

    fn first_index(log: &CallLog, color: Color) -> usize {
        log.calls.iter().position(|(_, c)| *c == color).unwrap()
    }

    #[test]
    fn test_draw_order_back_to_front() {
        let mut state = SimulationState::default();
        state.spawn_obstacle(0, 100.0);
        state.spawn_collectible(2, 100.0);
        let mut log = CallLog::default();
        render(&state, &Settings::default(), Some(&mut log));

        let road = first_index(&log, ROAD);
        let grass = first_index(&log, GRASS);
        let lines = first_index(&log, SPEED_LINE);
        let divider = first_index(&log, LANE_MARKER);
        let obstacle = first_index(&log, OBSTACLE_BODY);
        let teddy = first_index(&log, TEDDY_FUR);
        let car = first_index(&log, CAR_SHADOW);
        assert!(road < grass);
        assert!(grass < lines);
        assert!(lines < divider);
        assert!(divider < obstacle);
        assert!(obstacle < teddy);
        assert!(teddy < car);
    }

    #[test]
    fn test_collected_teddies_are_not_drawn() {
        let mut state = SimulationState::default();
        state.spawn_collectible(2, 100.0);
        state.collectibles[0].collected = true;
        let mut log = CallLog::default();
        render(&state, &Settings::default(), Some(&mut log));
        assert!(log.calls.iter().all(|(_, c)| *c != TEDDY_FUR));
    }

    #[test]
    fn test_reduced_motion_skips_speed_lines() {
        let state = SimulationState::default();
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let mut log = CallLog::default();
        render(&state, &settings, Some(&mut log));
        assert!(log.calls.iter().all(|(_, c)| *c != SPEED_LINE));
        assert_eq!(
            log.calls.iter().filter(|(kind, _)| *kind == "dashed").count(),
            2
        );
    }

    #[test]
    fn test_missing_surface_is_noop() {
        let state = SimulationState::default();
        render::<Framebuffer>(&state, &Settings::default(), None);
    }

    #[test]
    fn test_render_does_not_mutate_state() {
        let mut state = SimulationState::default();
        let mut rng = Scripted::new(&[0.9, 0.1]);
        for _ in 0..150 {
            tick(&mut state, None, &mut rng);
        }
        let before = serde_json::to_string(&state).unwrap();
        let mut fb = Framebuffer::new(400, 700);
        render(&state, &Settings::default(), Some(&mut fb));
        assert_eq!(serde_json::to_string(&state).unwrap(), before);
    }

    #[test]
    fn test_player_pixels() {
        let state = SimulationState::default();
        let mut fb = Framebuffer::new(400, 700);
        render(&state, &Settings::default(), Some(&mut fb));

        // Roof color in the middle of the car
        let x = (state.player_x + 35.0) as u32;
        let p = fb.pixel(x, 570 + 55).unwrap();
        assert_eq!((p.r, p.g, p.b), (143, 206, 0));

        // Grass at the far left edge
        let p = fb.pixel(2, 10).unwrap();
        assert_eq!((p.r, p.g, p.b), (76, 175, 80));
    }
}
