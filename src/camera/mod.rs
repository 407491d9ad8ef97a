//! Camera and free-fly camera controller

pub mod controller;

pub use controller::CameraController;

use glam::{Mat4, Vec2, Vec3};

use crate::transform::{self, Ray, SizeProvider};

/// View matrix holder plus projection helpers.
///
/// The camera never owns the window size; every projection queries the
/// size provider it is handed.
#[derive(Debug, Clone)]
pub struct Camera {
    view: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    pub fn new() -> Self {
        Self {
            view: Mat4::IDENTITY,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    pub fn set_view_matrix(&mut self, view: Mat4) {
        self.view = view;
    }

    /// Perspective projection for the current size
    pub fn projection_matrix(&self, size: &impl SizeProvider) -> Mat4 {
        transform::perspective_projection(size)
    }

    /// Pixel-space orthographic projection for the current size
    pub fn orthographic_projection_matrix(&self, size: &impl SizeProvider) -> Mat4 {
        transform::orthographic_projection(size)
    }

    /// `projection * view`, computed fresh on every call
    pub fn view_projection(&self, size: &impl SizeProvider) -> Mat4 {
        self.projection_matrix(size) * self.view
    }

    pub fn world_to_screen(&self, point: Vec3, size: &impl SizeProvider) -> Option<Vec2> {
        transform::world_to_screen(point, &self.view, &self.projection_matrix(size), size)
    }

    pub fn screen_to_world(&self, screen: Vec2, size: &impl SizeProvider) -> Option<Ray> {
        transform::screen_to_world(screen, &self.view, &self.projection_matrix(size), size)
    }
}
