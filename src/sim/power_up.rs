//! Falling power-ups

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use crate::transform::Viewport;

/// Where hidden power-ups wait, well outside any field
const PARKED: Vec2 = Vec2::new(-1000.0, -1000.0);

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    /// Widens the pad
    LongPad,
    /// Speeds the ball up
    SpeedUp,
    /// Slows the ball down
    SpeedDown,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::LongPad,
        PowerUpKind::SpeedUp,
        PowerUpKind::SpeedDown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::LongPad => "LongPad",
            PowerUpKind::SpeedUp => "SpeedUp",
            PowerUpKind::SpeedDown => "SpeedDown",
        }
    }
}

/// A power-up; hidden until it drops, then falls until caught or missed
#[derive(Debug, Clone, PartialEq)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    /// Center, pixel space
    pub position: Vec2,
    pub radius: f32,
    /// Fall speed (px/s)
    pub velocity: f32,
    pub appeared: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, radius: f32, velocity: f32) -> Self {
        Self {
            kind,
            position: PARKED,
            radius,
            velocity,
            appeared: false,
        }
    }

    /// Appear at a random spot along the top of the field.
    ///
    /// Does nothing and returns false while already visible.
    pub fn drop_randomly(&mut self, rng: &mut impl Rng, field: Viewport) -> bool {
        if self.appeared {
            return false;
        }
        let margin = field.width * (1.0 - POWER_UP_SPAWN_SPAN) / 2.0;
        let x = if field.width - 2.0 * margin > 0.0 {
            rng.random_range(margin..=field.width - margin)
        } else {
            field.width / 2.0
        };
        self.position = Vec2::new(x, field.height - self.radius);
        self.appeared = true;
        true
    }

    pub fn fall(&mut self, dt: f32) {
        self.position.y -= self.velocity * dt;
    }

    /// Lowest point of the marker
    pub fn bottom(&self) -> f32 {
        self.position.y - self.radius
    }

    pub fn hide(&mut self) {
        self.position = PARKED;
        self.appeared = false;
    }
}
