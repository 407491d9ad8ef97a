//! The player's pad and its input-driven controller

use glam::Vec2;

use crate::consts::*;
use crate::transform::Viewport;

/// Axis-aligned pad; `position` is the bottom-left corner
#[derive(Debug, Clone, PartialEq)]
pub struct Pad {
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
    /// Speed (px/s)
    pub velocity: f32,
}

impl Pad {
    pub fn new(field: Viewport, velocity: f32) -> Self {
        let height = field.height * PAD_HEIGHT_RATIO;
        Self {
            position: Vec2::new(field.width / 2.0, height * PAD_LIFT_RATIO),
            width: field.width * PAD_WIDTH_RATIO,
            height,
            velocity,
        }
    }

    pub fn left(&self) -> f32 {
        self.position.x
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.position.y + self.height
    }

    /// Below this line a ball is lost
    pub fn stop_line(&self) -> f32 {
        self.position.y - self.height
    }
}

/// Drives a [`Pad`] from a steering direction and tracks the streak bonus.
///
/// `series` grows (signed) while the same direction is held and resets on
/// any change, including releasing the keys.
#[derive(Debug, Clone, PartialEq)]
pub struct PadController {
    pub pad: Pad,
    pub series: i32,
    previous_direction: i8,
    streak_scale: f32,
    contact_tolerance: f32,
}

impl PadController {
    pub fn new(pad: Pad, streak_scale: f32, contact_tolerance: f32) -> Self {
        Self {
            pad,
            series: 0,
            previous_direction: 0,
            streak_scale,
            contact_tolerance,
        }
    }

    /// Move by `direction` (-1, 0 or 1) for `dt` seconds, staying inside the field
    pub fn update(&mut self, direction: i8, dt: f32, field_width: f32) {
        let direction = direction.signum();
        self.pad.position.x += direction as f32 * self.pad.velocity * dt;
        self.clamp_to(field_width);

        if direction == self.previous_direction {
            self.series += direction as i32;
        } else {
            self.series = 0;
        }
        self.previous_direction = direction;
    }

    /// Keep the pad's left edge within `[0, field_width - width]`
    pub fn clamp_to(&mut self, field_width: f32) {
        let max_x = (field_width - self.pad.width).max(0.0);
        self.pad.position.x = self.pad.position.x.clamp(0.0, max_x);
    }

    /// Return-speed multiplier for a ball bounced off the pad
    pub fn acceleration(&self) -> f32 {
        (1.0 + self.series as f32 / self.streak_scale).clamp(MIN_ACCELERATION, MAX_ACCELERATION)
    }

    /// Whether a point lies on the pad's top edge, within the contact band
    pub fn is_touching(&self, x: f32, y: f32) -> bool {
        x >= self.pad.left()
            && x <= self.pad.right()
            && (y - self.pad.top()).abs() <= self.contact_tolerance
    }

    /// Whether a point moving down from `from_y` to `to_y` at column `x`
    /// passes through the contact band this step
    pub fn is_crossing(&self, x: f32, from_y: f32, to_y: f32) -> bool {
        let top = self.pad.top();
        x >= self.pad.left()
            && x <= self.pad.right()
            && to_y <= top + self.contact_tolerance
            && from_y >= top - self.contact_tolerance
    }

    pub fn increase_speed(&mut self) {
        self.pad.velocity *= EFFECT_FACTOR;
    }

    pub fn decrease_speed(&mut self) {
        self.pad.velocity /= EFFECT_FACTOR;
    }

    pub fn increase_width(&mut self, field_width: f32) {
        self.pad.width = (self.pad.width * EFFECT_FACTOR).min(field_width);
        self.clamp_to(field_width);
    }

    pub fn decrease_width(&mut self, field_width: f32) {
        self.pad.width /= EFFECT_FACTOR;
        self.clamp_to(field_width);
    }
}
