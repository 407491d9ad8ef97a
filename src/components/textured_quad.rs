//! Checkerboard backdrop quad in world space

use glam::{Mat4, Vec3};

use super::{Component, FrameContext, MeshBinding, log_frame_error, release_logged};
use crate::error::RenderError;
use crate::renderer::{
    CullMode, FillMode, PipelineDesc, RasterState, RenderDevice, Resource, ShaderKind, Topology,
    shapes,
};

const TEXTURE_SIZE: u32 = 64;
const TEXTURE_CELLS: u32 = 8;
const LIGHT: [u8; 4] = [200, 200, 210, 255];
const DARK: [u8; 4] = [40, 40, 60, 255];

#[derive(Debug)]
pub struct TexturedQuadComponent {
    mesh: Option<MeshBinding>,
    position: Vec3,
    half_size: f32,
}

impl Default for TexturedQuadComponent {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 50.0), 50.0)
    }
}

impl TexturedQuadComponent {
    pub fn new(position: Vec3, half_size: f32) -> Self {
        Self {
            mesh: None,
            position,
            half_size,
        }
    }
}

impl Component for TexturedQuadComponent {
    fn name(&self) -> &str {
        "textured quad"
    }

    fn init(&mut self, device: &mut dyn RenderDevice) -> Result<(), RenderError> {
        let pixels = shapes::checkerboard(TEXTURE_SIZE, TEXTURE_CELLS, LIGHT, DARK);
        let texture = device.create_texture("checkerboard", TEXTURE_SIZE, TEXTURE_SIZE, &pixels)?;

        let desc = PipelineDesc {
            label: "textured quad".to_string(),
            shader: ShaderKind::Textured,
            topology: Topology::TriangleStrip,
            raster: RasterState {
                fill: FillMode::Solid,
                cull: CullMode::Back,
            },
        };
        let vertices = shapes::textured_quad(self.half_size);
        match MeshBinding::create(device, &desc, &vertices, Some(texture)) {
            Ok(mesh) => {
                self.mesh = Some(mesh);
                Ok(())
            }
            Err(e) => {
                release_logged(device, Resource::Texture(texture), "textured quad");
                Err(e)
            }
        }
    }

    fn update(&mut self, device: &mut dyn RenderDevice, ctx: &FrameContext<'_>, _dt: f32) {
        if let Some(mesh) = &self.mesh {
            let transform =
                ctx.camera.view_projection(&ctx.viewport) * Mat4::from_translation(self.position);
            log_frame_error("textured quad", mesh.set_transform(device, &transform));
        }
    }

    fn draw(&mut self, device: &mut dyn RenderDevice, _dt: f32) {
        if let Some(mesh) = &self.mesh {
            log_frame_error("textured quad", mesh.draw(device));
        }
    }

    fn dispose(&mut self, device: &mut dyn RenderDevice) {
        if let Some(mesh) = self.mesh.take() {
            mesh.release(device, "textured quad");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::HeadlessDevice;

    #[test]
    fn test_init_binds_texture_and_culls_back_faces() {
        let mut device = HeadlessDevice::new(800, 600);
        let mut quad = TexturedQuadComponent::default();
        quad.init(&mut device).unwrap();
        quad.draw(&mut device, 0.016);

        let call = device.pending[0];
        assert!(call.texture.is_some());
        assert_eq!(call.vertex_count, 4);
        let pipeline = device.pipeline(call.pipeline);
        assert_eq!(pipeline.shader, ShaderKind::Textured);
        assert_eq!(pipeline.topology, Topology::TriangleStrip);
        assert_eq!(pipeline.raster.cull, CullMode::Back);
    }

    #[test]
    fn test_failed_init_releases_texture() {
        let mut device = HeadlessDevice::new(800, 600);
        device.fail_pipeline = Some("textured quad".to_string());
        let mut quad = TexturedQuadComponent::default();

        assert!(quad.init(&mut device).is_err());
        assert_eq!(device.live_resources(), 0);
        assert_eq!(device.failed_releases, 0);
    }

    #[test]
    fn test_dispose_releases_everything() {
        let mut device = HeadlessDevice::new(800, 600);
        let mut quad = TexturedQuadComponent::default();
        quad.init(&mut device).unwrap();
        assert_eq!(device.live_resources(), 4);

        quad.dispose(&mut device);
        assert_eq!(device.live_resources(), 0);
    }
}
