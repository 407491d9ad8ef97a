//! The ball on the 2D layer

use super::{Component, FrameContext, MeshBinding, log_frame_error};
use crate::error::RenderError;
use crate::renderer::vertex::colors;
use crate::renderer::{PipelineDesc, RasterState, RenderDevice, ShaderKind, Topology, shapes};

#[derive(Debug, Default)]
pub struct BallComponent {
    mesh: Option<MeshBinding>,
    radius: f32,
}

impl BallComponent {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component for BallComponent {
    fn name(&self) -> &str {
        "ball"
    }

    fn init(&mut self, device: &mut dyn RenderDevice) -> Result<(), RenderError> {
        let desc = PipelineDesc {
            label: "ball".to_string(),
            shader: ShaderKind::Color,
            topology: Topology::TriangleList,
            raster: RasterState::SOLID,
        };
        self.radius = 0.0;
        self.mesh = Some(MeshBinding::create(device, &desc, &[], None)?);
        Ok(())
    }

    fn update(&mut self, device: &mut dyn RenderDevice, ctx: &FrameContext<'_>, _dt: f32) {
        let Some(mesh) = &mut self.mesh else { return };
        let ball = &ctx.state.ball;

        if self.radius != ball.radius {
            match mesh.set_vertices(device, &shapes::disc(ball.radius, colors::BALL)) {
                Ok(()) => self.radius = ball.radius,
                Err(e) => log::warn!("ball: {}", e),
            }
        }

        log_frame_error(
            "ball",
            mesh.set_transform(device, &ctx.layer_transform(ball.position)),
        );
    }

    fn draw(&mut self, device: &mut dyn RenderDevice, _dt: f32) {
        if let Some(mesh) = &self.mesh {
            log_frame_error("ball", mesh.draw(device));
        }
    }

    fn dispose(&mut self, device: &mut dyn RenderDevice) {
        if let Some(mesh) = self.mesh.take() {
            mesh.release(device, "ball");
        }
    }
}
