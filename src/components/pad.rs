//! The player's pad on the 2D layer

use super::{Component, FrameContext, MeshBinding, log_frame_error};
use crate::error::RenderError;
use crate::renderer::vertex::colors;
use crate::renderer::{PipelineDesc, RasterState, RenderDevice, ShaderKind, Topology, shapes};

#[derive(Debug, Default)]
pub struct PadComponent {
    mesh: Option<MeshBinding>,
    /// Size the current geometry was built for
    size: (f32, f32),
}

impl PadComponent {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component for PadComponent {
    fn name(&self) -> &str {
        "pad"
    }

    fn init(&mut self, device: &mut dyn RenderDevice) -> Result<(), RenderError> {
        let desc = PipelineDesc {
            label: "pad".to_string(),
            shader: ShaderKind::Color,
            topology: Topology::TriangleList,
            raster: RasterState::SOLID,
        };
        // Real geometry arrives with the first update
        self.size = (0.0, 0.0);
        self.mesh = Some(MeshBinding::create(device, &desc, &[], None)?);
        Ok(())
    }

    fn update(&mut self, device: &mut dyn RenderDevice, ctx: &FrameContext<'_>, _dt: f32) {
        let Some(mesh) = &mut self.mesh else { return };
        let pad = &ctx.state.pad.pad;

        if self.size != (pad.width, pad.height) {
            let vertices = shapes::rectangle(pad.width, pad.height, colors::PAD);
            match mesh.set_vertices(device, &vertices) {
                Ok(()) => self.size = (pad.width, pad.height),
                Err(e) => log::warn!("pad: {}", e),
            }
        }

        let transform = ctx.layer_transform(pad.position);
        log_frame_error("pad", mesh.set_transform(device, &transform));
    }

    fn draw(&mut self, device: &mut dyn RenderDevice, _dt: f32) {
        if let Some(mesh) = &self.mesh {
            log_frame_error("pad", mesh.draw(device));
        }
    }

    fn dispose(&mut self, device: &mut dyn RenderDevice) {
        if let Some(mesh) = self.mesh.take() {
            mesh.release(device, "pad");
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
    use glam::Vec3;

    #[test]
    fn test_pad_geometry_follows_width() {
        let mut device = HeadlessDevice::new(800, 600);
        let mut component = PadComponent::new();
        component.init(&mut device).unwrap();

        let viewport = Viewport::new(800.0, 600.0);
        let mut state = GameState::new(1, viewport, Tuning::default());
        let camera = Camera::new();

        {
            let ctx = FrameContext {
                state: &state,
                camera: &camera,
                viewport,
                total_time: 0.0,
            };
            component.update(&mut device, &ctx, 0.016);
        }
        let mesh = component.mesh.as_ref().unwrap();
        let right = device
            .vertices(mesh.vertices)
            .iter()
            .map(|v| v.position[0])
            .fold(0.0, f32::max);
        assert_eq!(right, 100.0);

        state.pad.increase_width(viewport.width);
        let ctx = FrameContext {
            state: &state,
            camera: &camera,
            viewport,
            total_time: 0.1,
        };
        component.update(&mut device, &ctx, 0.016);
        let mesh = component.mesh.as_ref().unwrap();
        let right = device
            .vertices(mesh.vertices)
            .iter()
            .map(|v| v.position[0])
            .fold(0.0, f32::max);
        assert_eq!(right, 125.0);

        // Pad's bottom-left corner lands on its pixel position
        let transform = device.transform(mesh.transform);
        let expected = ctx.layer_transform(state.pad.pad.position);
        assert_eq!(transform, expected);
        let corner = transform.project_point3(Vec3::ZERO);
        assert!((corner.x - (state.pad.pad.position.x / 400.0 - 1.0)).abs() < 1e-5);
    }

    #[test]
    fn test_dispose_twice_releases_once() {
        let mut device = HeadlessDevice::new(800, 600);
        let mut component = PadComponent::new();
        component.init(&mut device).unwrap();

        component.dispose(&mut device);
        component.dispose(&mut device);
        assert_eq!(device.live_resources(), 0);
        assert_eq!(device.failed_releases, 0);

        // Disposed components draw nothing
        component.draw(&mut device, 0.016);
        assert!(device.pending.is_empty());
    }
}
