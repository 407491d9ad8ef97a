//! Free-fly camera navigation
//!
//! Mouse travel turns the camera (yaw/pitch), W/S/A/D/Space/C move it.

use glam::{EulerRot, Mat4, Vec2, Vec3};

use super::Camera;
use crate::consts::{MAX_PITCH, MOUSE_RADIANS_PER_PIXEL};
use crate::platform::input::{InputState, Key};
use crate::transform::safe_normalize;

#[derive(Debug, Clone)]
pub struct CameraController {
    pub position: Vec3,
    /// Radians around world Y
    pub yaw: f32,
    /// Radians around the camera X axis, positive looks down
    pub pitch: f32,
    /// World units per second; zero pins the camera in place
    pub velocity_magnitude: f32,
    /// Zero disables mouse look
    pub mouse_sensitivity: f32,
}

impl CameraController {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            velocity_magnitude: 100.0,
            mouse_sensitivity: 1.0,
        }
    }

    /// Fold mouse travel (pixels) into yaw and pitch
    pub fn apply_mouse_delta(&mut self, delta: Vec2) {
        let scale = MOUSE_RADIANS_PER_PIXEL * self.mouse_sensitivity;
        self.yaw += delta.x * scale;
        self.pitch = (self.pitch + delta.y * scale).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Yaw-pitch-roll rotation (roll is always zero)
    pub fn rotation(&self) -> Mat4 {
        Mat4::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation().transform_vector3(Vec3::Z)
    }

    /// Advance one frame and rebuild the camera's view matrix
    pub fn update(&mut self, camera: &mut Camera, input: &InputState, mouse_delta: Vec2, dt: f32) {
        self.apply_mouse_delta(mouse_delta);

        let rotation = self.rotation();
        let forward = rotation.transform_vector3(Vec3::Z);
        let right = rotation.transform_vector3(Vec3::X);
        let up = rotation.transform_vector3(Vec3::Y);

        // x: forward/back, y: world up/down, z: strafe
        let mut local = Vec3::ZERO;
        if input.is_key_down(Key::W) {
            local.x += 1.0;
        }
        if input.is_key_down(Key::S) {
            local.x -= 1.0;
        }
        if input.is_key_down(Key::D) {
            local.z += 1.0;
        }
        if input.is_key_down(Key::A) {
            local.z -= 1.0;
        }
        if input.is_key_down(Key::Space) {
            local.y += 1.0;
        }
        if input.is_key_down(Key::C) {
            local.y -= 1.0;
        }
        let local = safe_normalize(local);

        let direction = safe_normalize(forward * local.x + Vec3::Y * local.y + right * local.z);
        self.position += direction * self.velocity_magnitude * dt;

        camera.set_view_matrix(Mat4::look_at_lh(self.position, self.position + forward, up));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_moves_along_z() {
        let mut camera = Camera::new();
        let mut controller = CameraController::new(Vec3::new(0.0, 0.0, -300.0));
        let mut input = InputState::new();
        input.key_down(Key::W);

        controller.update(&mut camera, &input, Vec2::ZERO, 0.5);
        assert!((controller.position - Vec3::new(0.0, 0.0, -250.0)).length() < 1e-3);

        // The eye sits at the view-space origin
        let eye = camera.view_matrix().transform_point3(controller.position);
        assert!(eye.length() < 1e-3);
    }

    #[test]
    fn test_diagonal_movement_is_renormalized() {
        let mut camera = Camera::new();
        let mut controller = CameraController::new(Vec3::ZERO);
        let mut input = InputState::new();
        input.key_down(Key::W);
        input.key_down(Key::D);
        input.key_down(Key::Space);

        controller.update(&mut camera, &input, Vec2::ZERO, 1.0);
        assert!((controller.position.length() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_zero_velocity_pins_position() {
        let mut camera = Camera::new();
        let mut controller = CameraController::new(Vec3::new(1.0, 2.0, 3.0));
        controller.velocity_magnitude = 0.0;
        let mut input = InputState::new();
        input.key_down(Key::W);
        input.key_down(Key::A);

        controller.update(&mut camera, &input, Vec2::ZERO, 1.0);
        assert_eq!(controller.position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_zero_sensitivity_pins_rotation() {
        let mut camera = Camera::new();
        let mut controller = CameraController::new(Vec3::ZERO);
        controller.mouse_sensitivity = 0.0;

        controller.update(&mut camera, &InputState::new(), Vec2::new(250.0, -90.0), 0.016);
        assert_eq!(controller.yaw, 0.0);
        assert_eq!(controller.pitch, 0.0);
    }

    #[test]
    fn test_mouse_right_turns_right() {
        let mut controller = CameraController::new(Vec3::ZERO);
        controller.apply_mouse_delta(Vec2::new(100.0, 0.0));
        assert!((controller.yaw - 0.3).abs() < 1e-6);
        assert!(controller.forward().x > 0.0);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut controller = CameraController::new(Vec3::ZERO);
        controller.apply_mouse_delta(Vec2::new(0.0, 100_000.0));
        assert_eq!(controller.pitch, MAX_PITCH);
        controller.apply_mouse_delta(Vec2::new(0.0, -200_000.0));
        assert_eq!(controller.pitch, -MAX_PITCH);
    }

    #[test]
    fn test_no_input_keeps_position() {
        let mut camera = Camera::new();
        let mut controller = CameraController::new(Vec3::new(0.0, 0.0, -300.0));

        controller.update(&mut camera, &InputState::new(), Vec2::ZERO, 1.0);
        assert_eq!(controller.position, Vec3::new(0.0, 0.0, -300.0));
        assert!(controller.position.is_finite());
    }
}
