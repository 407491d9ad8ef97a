//! Rendering module
//!
//! `device` defines the seam components draw through, `pipeline` implements
//! it on wgpu, `shapes` builds the geometry.

pub mod device;
#[cfg(test)]
pub mod headless;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use device::{
    BufferHandle, CullMode, DrawCall, FillMode, PipelineDesc, PipelineHandle, RasterState,
    RenderDevice, Resource, ShaderKind, TextureHandle, Topology, UniformHandle,
};
#[cfg(test)]
pub use headless::HeadlessDevice;
pub use pipeline::GpuDevice;
pub use vertex::Vertex;
