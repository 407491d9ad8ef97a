//! Transform utilities
//!
//! Projection matrices and conversions between world, clip and screen space.
//! Everything here is left-handed with a [0, 1] depth range to match wgpu.
//! glam uses column vectors, so a world-view-projection transform is written
//! `projection * view * world`.

use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};

use crate::consts::*;

/// Anything that can report the current drawable size in pixels
pub trait SizeProvider {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    /// Width over height, 1.0 for a collapsed (zero height) surface
    fn aspect_ratio(&self) -> f32 {
        let height = self.height();
        if height > 0.0 {
            self.width() / height
        } else {
            1.0
        }
    }
}

/// Drawable area size in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn from_pixels(width: u32, height: u32) -> Self {
        Self::new(width as f32, height as f32)
    }
}

impl SizeProvider for Viewport {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }
}

/// Half-line in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length
    pub direction: Vec3,
}

impl Ray {
    /// Shortest distance from `point` to the infinite line through the ray
    pub fn distance_to(&self, point: Vec3) -> f32 {
        (point - self.origin).cross(self.direction).length()
    }
}

/// Normalize `v`, leaving it untouched when it is too short to have a direction
pub fn safe_normalize(v: Vec3) -> Vec3 {
    let length = v.length();
    if length > NORMALIZE_EPSILON {
        v / length
    } else {
        v
    }
}

/// Perspective projection: 45° vertical FOV, aspect from `size`
pub fn perspective_projection(size: &impl SizeProvider) -> Mat4 {
    Mat4::perspective_lh(
        FIELD_OF_VIEW_DEGREES.to_radians(),
        size.aspect_ratio(),
        NEAR_PLANE,
        FAR_PLANE,
    )
}

/// Orthographic projection spanning [0, width] x [0, height], +Y up
pub fn orthographic_projection(size: &impl SizeProvider) -> Mat4 {
    Mat4::orthographic_lh(
        0.0,
        size.width().max(1.0),
        0.0,
        size.height().max(1.0),
        NEAR_PLANE,
        FAR_PLANE,
    )
}

/// Project a world point to pixel coordinates (origin top-left, Y down).
///
/// Returns `None` when the point sits on the camera plane (W ≈ 0).
pub fn world_to_screen(
    point: Vec3,
    view: &Mat4,
    projection: &Mat4,
    size: &impl SizeProvider,
) -> Option<Vec2> {
    let clip = (*projection * *view) * point.extend(1.0);
    if clip.w.abs() < NORMALIZE_EPSILON {
        return None;
    }
    let ndc = clip.xyz() / clip.w;
    Some(Vec2::new(
        (ndc.x + 1.0) * 0.5 * size.width(),
        (1.0 - ndc.y) * 0.5 * size.height(),
    ))
}

/// Unproject a pixel into a world-space ray.
///
/// Perspective projection is not injective along depth, so the result is a
/// ray from the near plane through every world point that lands on `screen`.
pub fn screen_to_world(
    screen: Vec2,
    view: &Mat4,
    projection: &Mat4,
    size: &impl SizeProvider,
) -> Option<Ray> {
    let view_projection = *projection * *view;
    if view_projection.determinant() == 0.0 {
        return None;
    }
    let inverse = view_projection.inverse();
    if !inverse.is_finite() {
        return None;
    }

    let ndc_x = 2.0 * screen.x / size.width() - 1.0;
    let ndc_y = 1.0 - 2.0 * screen.y / size.height();
    let near = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
    let far = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));

    let direction = far - near;
    if !direction.is_finite() || direction.length() < NORMALIZE_EPSILON {
        return None;
    }
    Some(Ray {
        origin: near,
        direction: direction.normalize(),
    })
}
