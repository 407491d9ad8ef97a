//! Falling power-up markers

use super::{Component, FrameContext, MeshBinding, log_frame_error};
use crate::error::RenderError;
use crate::renderer::vertex::colors;
use crate::renderer::{PipelineDesc, RasterState, RenderDevice, ShaderKind, Topology, shapes};
use crate::sim::PowerUpKind;

/// Draws one power-up kind; hidden power-ups sit off-field and draw out of view
#[derive(Debug)]
pub struct PowerUpComponent {
    kind: PowerUpKind,
    name: String,
    mesh: Option<MeshBinding>,
    radius: f32,
}

impl PowerUpComponent {
    pub fn new(kind: PowerUpKind) -> Self {
        Self {
            kind,
            name: format!("power-up {}", kind.as_str()),
            mesh: None,
            radius: 0.0,
        }
    }

    pub fn kind(&self) -> PowerUpKind {
        self.kind
    }
}

fn color(kind: PowerUpKind) -> [f32; 4] {
    match kind {
        PowerUpKind::LongPad => colors::LONG_PAD,
        PowerUpKind::SpeedUp => colors::SPEED_UP,
        PowerUpKind::SpeedDown => colors::SPEED_DOWN,
    }
}

impl Component for PowerUpComponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn init(&mut self, device: &mut dyn RenderDevice) -> Result<(), RenderError> {
        let desc = PipelineDesc {
            label: self.name.clone(),
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
        let Some(power_up) = ctx.state.power_up(self.kind) else {
            return;
        };

        if self.radius != power_up.radius {
            match mesh.set_vertices(device, &shapes::disc(power_up.radius, color(self.kind))) {
                Ok(()) => self.radius = power_up.radius,
                Err(e) => log::warn!("{}: {}", self.name, e),
            }
        }

        log_frame_error(
            &self.name,
            mesh.set_transform(device, &ctx.layer_transform(power_up.position)),
        );
    }

    fn draw(&mut self, device: &mut dyn RenderDevice, _dt: f32) {
        if let Some(mesh) = &self.mesh {
            log_frame_error(&self.name, mesh.draw(device));
        }
    }

    fn dispose(&mut self, device: &mut dyn RenderDevice) {
        if let Some(mesh) = self.mesh.take() {
            mesh.release(device, &self.name);
        }
    }
}
