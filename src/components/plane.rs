//! Reference grid and axes in world space

use super::{Component, FrameContext, MeshBinding, log_frame_error};
use crate::error::RenderError;
use crate::renderer::{PipelineDesc, RasterState, RenderDevice, ShaderKind, Topology, shapes};

const GRID_EXTENT: f32 = 1000.0;
const GRID_STEP: f32 = 10.0;
const AXIS_LENGTH: f32 = 100.0;

#[derive(Debug, Default)]
pub struct PlaneComponent {
    mesh: Option<MeshBinding>,
}

impl PlaneComponent {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component for PlaneComponent {
    fn name(&self) -> &str {
        "plane"
    }

    fn init(&mut self, device: &mut dyn RenderDevice) -> Result<(), RenderError> {
        let desc = PipelineDesc {
            label: "plane".to_string(),
            shader: ShaderKind::Color,
            topology: Topology::LineList,
            raster: RasterState::SOLID,
        };
        let vertices = shapes::grid(GRID_EXTENT, GRID_STEP, AXIS_LENGTH);
        self.mesh = Some(MeshBinding::create(device, &desc, &vertices, None)?);
        Ok(())
    }

    fn update(&mut self, device: &mut dyn RenderDevice, ctx: &FrameContext<'_>, _dt: f32) {
        let Some(mesh) = &self.mesh else { return };
        let transform = ctx.camera.view_projection(&ctx.viewport);
        log_frame_error("plane", mesh.set_transform(device, &transform));
    }

    fn draw(&mut self, device: &mut dyn RenderDevice, _dt: f32) {
        if let Some(mesh) = &self.mesh {
            log_frame_error("plane", mesh.draw(device));
        }
    }

    fn dispose(&mut self, device: &mut dyn RenderDevice) {
        if let Some(mesh) = self.mesh.take() {
            mesh.release(device, "plane");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::renderer::HeadlessDevice;
    use crate::settings::Tuning;
    use crate::sim::GameState;
    use crate::transform::Viewport;
    use glam::{Mat4, Vec3};

    #[test]
    fn test_plane_uses_view_projection() {
        let mut device = HeadlessDevice::new(800, 600);
        let mut plane = PlaneComponent::new();
        plane.init(&mut device).unwrap();

        let viewport = Viewport::new(800.0, 600.0);
        let state = GameState::new(1, viewport, Tuning::default());
        let mut camera = Camera::new();
        camera.set_view_matrix(Mat4::look_at_lh(Vec3::new(0.0, 50.0, -300.0), Vec3::ZERO, Vec3::Y));
        let ctx = FrameContext {
            state: &state,
            camera: &camera,
            viewport,
            total_time: 0.0,
        };

        plane.update(&mut device, &ctx, 0.016);
        plane.draw(&mut device, 0.016);

        let call = device.pending[0];
        assert_eq!(device.transform(call.transform), camera.view_projection(&viewport));
        assert_eq!(device.pipeline(call.pipeline).topology, Topology::LineList);
    }
}
