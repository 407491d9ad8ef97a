//! Drawable game components
//!
//! Each component owns its GPU resources from `init` until `dispose` and is
//! driven by the game in registration order: all updates, then all draws.

pub mod ball;
pub mod pad;
pub mod plane;
pub mod power_up;
pub mod textured_quad;

pub use ball::BallComponent;
pub use pad::PadComponent;
pub use plane::PlaneComponent;
pub use power_up::PowerUpComponent;
pub use textured_quad::TexturedQuadComponent;

use glam::{Mat4, Vec2};

use crate::camera::Camera;
use crate::consts::LAYER_DEPTH;
use crate::error::RenderError;
use crate::renderer::{
    BufferHandle, DrawCall, PipelineDesc, PipelineHandle, RenderDevice, Resource, TextureHandle,
    UniformHandle, Vertex,
};
use crate::sim::GameState;
use crate::transform::Viewport;

/// Read-only view of the world handed to every update
pub struct FrameContext<'a> {
    pub state: &'a GameState,
    pub camera: &'a Camera,
    pub viewport: Viewport,
    /// Seconds since the game started
    pub total_time: f32,
}

impl FrameContext<'_> {
    /// Transform for the 2D gameplay layer: pixel-space orthographic
    /// projection with the shape's origin moved to `position`
    pub fn layer_transform(&self, position: Vec2) -> Mat4 {
        self.camera.orthographic_projection_matrix(&self.viewport)
            * Mat4::from_translation(position.extend(LAYER_DEPTH))
    }
}

/// Lifecycle every game component follows
pub trait Component {
    fn name(&self) -> &str;

    /// Create GPU resources; a failure aborts startup
    fn init(&mut self, device: &mut dyn RenderDevice) -> Result<(), RenderError>;

    /// Refresh geometry and transform from the current game state
    fn update(&mut self, device: &mut dyn RenderDevice, ctx: &FrameContext<'_>, dt: f32);

    /// Queue this component's draw call
    fn draw(&mut self, device: &mut dyn RenderDevice, dt: f32);

    /// Release GPU resources; later calls do nothing
    fn dispose(&mut self, device: &mut dyn RenderDevice);
}

/// The GPU side of one drawable: pipeline, vertices and transform uniform,
/// plus an optional texture
#[derive(Debug)]
pub struct MeshBinding {
    pub pipeline: PipelineHandle,
    pub vertices: BufferHandle,
    pub transform: UniformHandle,
    pub texture: Option<TextureHandle>,
    pub vertex_count: u32,
}

impl MeshBinding {
    /// Create everything at once; nothing leaks if a step fails
    pub fn create(
        device: &mut dyn RenderDevice,
        desc: &PipelineDesc,
        vertices: &[Vertex],
        texture: Option<TextureHandle>,
    ) -> Result<Self, RenderError> {
        let pipeline = device.create_pipeline(desc)?;

        let buffer = match device.create_vertex_buffer(&desc.label, vertices) {
            Ok(buffer) => buffer,
            Err(e) => {
                release_logged(device, Resource::Pipeline(pipeline), &desc.label);
                return Err(e);
            }
        };

        let transform = match device.create_uniform_buffer(&desc.label) {
            Ok(transform) => transform,
            Err(e) => {
                let _ = device.release(Resource::Buffer(buffer));
                release_logged(device, Resource::Pipeline(pipeline), &desc.label);
                return Err(e);
            }
        };

        Ok(Self {
            pipeline,
            vertices: buffer,
            transform,
            texture,
            vertex_count: vertices.len() as u32,
        })
    }

    pub fn set_vertices(
        &mut self,
        device: &mut dyn RenderDevice,
        vertices: &[Vertex],
    ) -> Result<(), RenderError> {
        device.write_vertex_buffer(self.vertices, vertices)?;
        self.vertex_count = vertices.len() as u32;
        Ok(())
    }

    pub fn set_transform(
        &self,
        device: &mut dyn RenderDevice,
        transform: &Mat4,
    ) -> Result<(), RenderError> {
        device.write_transform(self.transform, transform)
    }

    pub fn draw(&self, device: &mut dyn RenderDevice) -> Result<(), RenderError> {
        device.draw(DrawCall {
            pipeline: self.pipeline,
            vertices: self.vertices,
            transform: self.transform,
            texture: self.texture,
            vertex_count: self.vertex_count,
        })
    }

    /// Free the pipeline, buffers and texture
    pub fn release(self, device: &mut dyn RenderDevice, owner: &str) {
        let mut resources = vec![
            Resource::Pipeline(self.pipeline),
            Resource::Buffer(self.vertices),
            Resource::Uniform(self.transform),
        ];
        resources.extend(self.texture.map(Resource::Texture));

        for resource in resources {
            release_logged(device, resource, owner);
        }
    }
}

/// Release one resource, logging instead of failing
pub(crate) fn release_logged(device: &mut dyn RenderDevice, resource: Resource, owner: &str) {
    if let Err(e) = device.release(resource) {
        log::warn!("{}: release failed: {}", owner, e);
    }
}

/// Log a per-frame failure and carry on
pub(crate) fn log_frame_error(owner: &str, result: Result<(), RenderError>) {
    if let Err(e) = result {
        log::warn!("{}: {}", owner, e);
    }
}
