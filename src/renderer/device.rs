//! The render device seam
//!
//! Components talk to the GPU only through [`RenderDevice`], using small
//! copyable handles. The wgpu implementation lives in `pipeline.rs`; tests
//! use an in-memory device.

use glam::Mat4;

use super::vertex::Vertex;
use crate::error::RenderError;
use crate::transform::Viewport;

macro_rules! handle {
    ($name:ident, $kind:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub(crate) u32);

        impl $name {
            pub const KIND: &'static str = $kind;

            pub fn index(self) -> u32 {
                self.0
            }
        }
    };
}

handle!(BufferHandle, "vertex buffer");
handle!(UniformHandle, "uniform buffer");
handle!(TextureHandle, "texture");
handle!(PipelineHandle, "pipeline");

/// Any device-owned resource, for [`RenderDevice::release`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Buffer(BufferHandle),
    Uniform(UniformHandle),
    Texture(TextureHandle),
    Pipeline(PipelineHandle),
}

/// Which shader a pipeline runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderKind {
    /// Per-vertex color
    Color,
    /// Texture sampled with per-vertex coordinates
    Textured,
}

impl ShaderKind {
    /// Reject a draw that lacks the texture this shader samples
    pub fn check_texture(
        self,
        label: &str,
        texture: Option<TextureHandle>,
    ) -> Result<(), RenderError> {
        match (self, texture) {
            (ShaderKind::Textured, None) => Err(RenderError::MissingTexture {
                label: label.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    TriangleList,
    TriangleStrip,
    LineList,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    Solid,
    Wireframe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullMode {
    None,
    Front,
    Back,
}

/// Rasterizer state baked into a pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterState {
    pub fill: FillMode,
    pub cull: CullMode,
}

impl RasterState {
    pub const SOLID: RasterState = RasterState {
        fill: FillMode::Solid,
        cull: CullMode::None,
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineDesc {
    pub label: String,
    pub shader: ShaderKind,
    pub topology: Topology,
    pub raster: RasterState,
}

/// One draw: a pipeline, its vertices and the transform to apply
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub pipeline: PipelineHandle,
    pub vertices: BufferHandle,
    pub transform: UniformHandle,
    /// Required by textured pipelines
    pub texture: Option<TextureHandle>,
    pub vertex_count: u32,
}

/// GPU operations the game needs
pub trait RenderDevice {
    /// Current drawable size
    fn viewport(&self) -> Viewport;

    fn create_vertex_buffer(
        &mut self,
        label: &str,
        vertices: &[Vertex],
    ) -> Result<BufferHandle, RenderError>;

    /// Replace a buffer's contents, growing it if needed
    fn write_vertex_buffer(
        &mut self,
        buffer: BufferHandle,
        vertices: &[Vertex],
    ) -> Result<(), RenderError>;

    /// Uniform holding a single 4x4 transform
    fn create_uniform_buffer(&mut self, label: &str) -> Result<UniformHandle, RenderError>;

    fn write_transform(
        &mut self,
        uniform: UniformHandle,
        transform: &Mat4,
    ) -> Result<(), RenderError>;

    /// RGBA8 texture from tightly packed rows
    fn create_texture(
        &mut self,
        label: &str,
        width: u32,
        height: u32,
        rgba: &[u8],
    ) -> Result<TextureHandle, RenderError>;

    fn create_pipeline(&mut self, desc: &PipelineDesc) -> Result<PipelineHandle, RenderError>;

    /// Queue a draw for this frame; zero-vertex draws are dropped
    fn draw(&mut self, call: DrawCall) -> Result<(), RenderError>;

    /// Start a frame by clearing the target
    fn begin_frame(&mut self);

    /// Submit everything queued since `begin_frame`
    fn present(&mut self) -> Result<(), RenderError>;

    /// Rebuild size-dependent targets
    fn resize_targets(&mut self, width: u32, height: u32);

    /// Free a resource; its handle is dead afterwards
    fn release(&mut self, resource: Resource) -> Result<(), RenderError>;
}

/// Slot storage behind device handles.
///
/// Slots are never reused, so a stale handle can never alias a newer
/// resource.
#[derive(Debug)]
pub struct ResourcePool<T> {
    slots: Vec<Option<T>>,
    kind: &'static str,
}

impl<T> ResourcePool<T> {
    pub fn new(kind: &'static str) -> Self {
        Self {
            slots: Vec::new(),
            kind,
        }
    }

    pub fn insert(&mut self, value: T) -> u32 {
        self.slots.push(Some(value));
        (self.slots.len() - 1) as u32
    }

    pub fn get(&self, index: u32) -> Result<&T, RenderError> {
        self.slots
            .get(index as usize)
            .and_then(Option::as_ref)
            .ok_or(RenderError::UnknownHandle {
                kind: self.kind,
                index,
            })
    }

    pub fn get_mut(&mut self, index: u32) -> Result<&mut T, RenderError> {
        let kind = self.kind;
        self.slots
            .get_mut(index as usize)
            .and_then(Option::as_mut)
            .ok_or(RenderError::UnknownHandle { kind, index })
    }

    pub fn remove(&mut self, index: u32) -> Result<T, RenderError> {
        self.slots
            .get_mut(index as usize)
            .and_then(Option::take)
            .ok_or(RenderError::UnknownHandle {
                kind: self.kind,
                index,
            })
    }

    /// Number of live resources
    pub fn live(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_textured_shader_needs_a_texture() {
        assert!(matches!(
            ShaderKind::Textured.check_texture("quad", None),
            Err(RenderError::MissingTexture { label }) if label == "quad"
        ));
        assert!(ShaderKind::Textured.check_texture("quad", Some(TextureHandle(0))).is_ok());
        assert!(ShaderKind::Color.check_texture("pad", None).is_ok());
    }

    #[test]
    fn test_pool_slots_are_not_reused() {
        let mut pool = ResourcePool::new("thing");
        let a = pool.insert(1);
        let b = pool.insert(2);
        assert_eq!(pool.remove(a).unwrap(), 1);

        let c = pool.insert(3);
        assert_ne!(c, a);
        assert_eq!(*pool.get(b).unwrap(), 2);
        assert_eq!(pool.live(), 2);
    }

    #[test]
    fn test_pool_rejects_dead_handles() {
        let mut pool = ResourcePool::new("thing");
        let a = pool.insert(1);
        pool.remove(a).unwrap();

        assert!(matches!(
            pool.get(a),
            Err(RenderError::UnknownHandle { kind: "thing", index: 0 })
        ));
        assert!(pool.remove(a).is_err());
        assert!(pool.get_mut(42).is_err());
    }
}
