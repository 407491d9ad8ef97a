//! The ball

use glam::Vec2;

use crate::consts::*;
use crate::transform::Viewport;

/// A ball moving through the field.
///
/// `direction` is not a unit vector: its sign encodes travel and its
/// magnitude scales speed per axis. Bounces re-sign a component and keep its
/// magnitude.
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    /// Center, pixel space
    pub position: Vec2,
    pub radius: f32,
    /// Speed scalar (px/s)
    pub velocity: f32,
    pub direction: Vec2,
}

impl Ball {
    /// Ball at the serve spot, heading down with the given horizontal component
    pub fn new(field: Viewport, radius: f32, velocity: f32, horizontal: f32) -> Self {
        Self {
            position: Vec2::new(field.width / 2.0, field.height * BALL_START_HEIGHT),
            radius,
            velocity,
            direction: Vec2::new(horizontal, -1.0),
        }
    }

    /// Where the ball would be after `dt` without any collisions
    pub fn tentative_position(&self, dt: f32) -> Vec2 {
        self.position + self.direction * self.velocity * dt
    }

    pub fn is_moving_down(&self) -> bool {
        self.direction.y < 0.0
    }

    pub fn increase_speed(&mut self, max_velocity: f32) {
        self.velocity = (self.velocity * EFFECT_FACTOR).min(max_velocity);
    }

    pub fn decrease_speed(&mut self) {
        self.velocity /= EFFECT_FACTOR;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_spot() {
        let ball = Ball::new(Viewport::new(800.0, 600.0), 20.0, 240.0, 1.5);
        assert_eq!(ball.position, Vec2::new(400.0, 450.0));
        assert_eq!(ball.direction, Vec2::new(1.5, -1.0));
        assert!(ball.is_moving_down());
    }

    #[test]
    fn test_tentative_position_scales_with_direction() {
        let ball = Ball::new(Viewport::new(800.0, 600.0), 20.0, 100.0, 2.0);
        let next = ball.tentative_position(0.5);
        assert_eq!(next, Vec2::new(500.0, 400.0));
        // Tentative moves never touch the ball itself
        assert_eq!(ball.position, Vec2::new(400.0, 450.0));
    }

    #[test]
    fn test_speed_effects() {
        let mut ball = Ball::new(Viewport::new(800.0, 600.0), 20.0, 240.0, 0.0);
        ball.increase_speed(1000.0);
        assert!((ball.velocity - 300.0).abs() < 1e-4);
        ball.decrease_speed();
        assert!((ball.velocity - 240.0).abs() < 1e-4);

        ball.increase_speed(250.0);
        assert_eq!(ball.velocity, 250.0);
    }
}
