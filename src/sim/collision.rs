//! Ball versus field walls
//!
//! Bounces re-sign a direction component with `abs`, so a ball that is
//! still overlapping a wall on the next tick keeps heading away from it
//! instead of flipping back and forth.

use glam::Vec2;

use crate::transform::Viewport;

/// Field edge the ball bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Left,
    Right,
    Top,
}

/// Send the ball down if its top crosses the field's top edge
pub fn bounce_off_ceiling(
    position: Vec2,
    radius: f32,
    direction: &mut Vec2,
    field: Viewport,
) -> Option<Wall> {
    if position.y + radius > field.height {
        direction.y = -direction.y.abs();
        Some(Wall::Top)
    } else {
        None
    }
}

/// Send the ball back inward if it crosses the left or right edge
pub fn bounce_off_sides(
    position: Vec2,
    radius: f32,
    direction: &mut Vec2,
    field: Viewport,
) -> Option<Wall> {
    if position.x - radius < 0.0 {
        direction.x = direction.x.abs();
        Some(Wall::Left)
    } else if position.x + radius > field.width {
        direction.x = -direction.x.abs();
        Some(Wall::Right)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FIELD: Viewport = Viewport::new(800.0, 600.0);

    #[test]
    fn test_left_wall() {
        let mut dir = Vec2::new(-1.5, -1.0);
        let hit = bounce_off_sides(Vec2::new(10.0, 300.0), 20.0, &mut dir, FIELD);
        assert_eq!(hit, Some(Wall::Left));
        assert_eq!(dir, Vec2::new(1.5, -1.0));
    }

    #[test]
    fn test_right_wall() {
        let mut dir = Vec2::new(2.0, 1.0);
        let hit = bounce_off_sides(Vec2::new(790.0, 300.0), 20.0, &mut dir, FIELD);
        assert_eq!(hit, Some(Wall::Right));
        assert_eq!(dir, Vec2::new(-2.0, 1.0));
    }

    #[test]
    fn test_ceiling() {
        let mut dir = Vec2::new(0.5, 1.25);
        let hit = bounce_off_ceiling(Vec2::new(400.0, 590.0), 20.0, &mut dir, FIELD);
        assert_eq!(hit, Some(Wall::Top));
        assert_eq!(dir, Vec2::new(0.5, -1.25));
    }

    #[test]
    fn test_overlap_does_not_flip_back() {
        // Already heading away from the wall while still overlapping it
        let mut dir = Vec2::new(1.0, -1.0);
        bounce_off_sides(Vec2::new(5.0, 300.0), 20.0, &mut dir, FIELD);
        assert_eq!(dir.x, 1.0);
    }

    #[test]
    fn test_open_field_is_untouched() {
        let mut dir = Vec2::new(1.0, 1.0);
        assert_eq!(bounce_off_sides(Vec2::new(400.0, 300.0), 20.0, &mut dir, FIELD), None);
        assert_eq!(bounce_off_ceiling(Vec2::new(400.0, 300.0), 20.0, &mut dir, FIELD), None);
        assert_eq!(dir, Vec2::new(1.0, 1.0));
    }

    proptest! {
        #[test]
        fn prop_side_bounce_flips_only_x(
            x in -50.0f32..850.0,
            y in 0.0f32..600.0,
            dx in -3.0f32..3.0,
            dy in -2.0f32..2.0,
        ) {
            let mut dir = Vec2::new(dx, dy);
            let hit = bounce_off_sides(Vec2::new(x, y), 20.0, &mut dir, FIELD);
            prop_assert_eq!(dir.y, dy);
            prop_assert_eq!(dir.x.abs(), dx.abs());
            match hit {
                Some(Wall::Left) => prop_assert!(dir.x >= 0.0),
                Some(Wall::Right) => prop_assert!(dir.x <= 0.0),
                _ => prop_assert_eq!(dir.x, dx),
            }
        }

        #[test]
        fn prop_ceiling_bounce_flips_only_y(
            y in 500.0f32..700.0,
            dx in -3.0f32..3.0,
            dy in -2.0f32..2.0,
        ) {
            let mut dir = Vec2::new(dx, dy);
            let hit = bounce_off_ceiling(Vec2::new(400.0, y), 20.0, &mut dir, FIELD);
            prop_assert_eq!(dir.x, dx);
            prop_assert_eq!(dir.y.abs(), dy.abs());
            if hit.is_some() {
                prop_assert!(dir.y <= 0.0);
            } else {
                prop_assert_eq!(dir.y, dy);
            }
        }
    }
}
