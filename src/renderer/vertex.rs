//! Vertex types

use bytemuck::{Pod, Zeroable};

/// Position plus one four-component attribute.
///
/// Colored pipelines read the attribute as RGBA; textured pipelines read its
/// first two components as texture coordinates.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 4],
    pub attribute: [f32; 4],
}

impl Vertex {
    pub const fn colored(x: f32, y: f32, z: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y, z, 1.0],
            attribute: color,
        }
    }

    pub const fn textured(x: f32, y: f32, z: f32, u: f32, v: f32) -> Self {
        Self {
            position: [x, y, z, 1.0],
            attribute: [u, v, 0.0, 0.0],
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const BALL: [f32; 4] = [220.0 / 256.0, 175.0 / 256.0, 55.0 / 256.0, 1.0];
    pub const PAD: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const GRID: [f32; 4] = [0.7, 0.7, 0.7, 1.0];
    pub const AXIS_X: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const AXIS_Y: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const AXIS_Z: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
    pub const LONG_PAD: [f32; 4] = [0.0, 1.0, 1.0, 1.0];
    pub const SPEED_UP: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const SPEED_DOWN: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_matches_struct() {
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
        let desc = Vertex::desc();
        assert_eq!(desc.array_stride, 32);
        assert_eq!(desc.attributes[1].offset, 16);
    }

    #[test]
    fn test_textured_packs_uv() {
        let v = Vertex::textured(1.0, 2.0, 3.0, 0.25, 0.75);
        assert_eq!(v.position, [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(&v.attribute[..2], &[0.25, 0.75]);
    }
}
