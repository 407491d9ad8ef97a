//! Geometry generation
//!
//! All 2D shapes are built around their local origin; components place them
//! with a translation in their transform.

use std::f32::consts::TAU;

use super::vertex::{Vertex, colors};
use crate::consts::CIRCLE_SEGMENTS;

/// Filled disc as a triangle list: one (rim i, rim i+1, center) triangle per segment
pub fn disc(radius: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(CIRCLE_SEGMENTS * 3);
    let wedge = TAU / CIRCLE_SEGMENTS as f32;

    for i in 0..CIRCLE_SEGMENTS {
        let theta0 = i as f32 * wedge;
        let theta1 = (i + 1) as f32 * wedge;
        vertices.push(Vertex::colored(radius * theta0.cos(), -radius * theta0.sin(), 0.0, color));
        vertices.push(Vertex::colored(radius * theta1.cos(), -radius * theta1.sin(), 0.0, color));
        vertices.push(Vertex::colored(0.0, 0.0, 0.0, color));
    }

    vertices
}

/// Rectangle from (0, 0) to (width, height) as two triangles
pub fn rectangle(width: f32, height: f32, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::colored(0.0, 0.0, 0.0, color),
        Vertex::colored(width, height, 0.0, color),
        Vertex::colored(width, 0.0, 0.0, color),
        Vertex::colored(0.0, 0.0, 0.0, color),
        Vertex::colored(0.0, height, 0.0, color),
        Vertex::colored(width, height, 0.0, color),
    ]
}

/// Line grid on the XZ plane plus X, Y and Z axis markers, as a line list
pub fn grid(extent: f32, step: f32, axis_length: f32) -> Vec<Vertex> {
    let lines = (2.0 * extent / step).floor() as usize + 1;
    let mut vertices = Vec::with_capacity(lines * 4 + 6);

    for i in 0..lines {
        let offset = -extent + i as f32 * step;
        vertices.push(Vertex::colored(offset, 0.0, -extent, colors::GRID));
        vertices.push(Vertex::colored(offset, 0.0, extent, colors::GRID));
        vertices.push(Vertex::colored(-extent, 0.0, offset, colors::GRID));
        vertices.push(Vertex::colored(extent, 0.0, offset, colors::GRID));
    }

    vertices.push(Vertex::colored(0.0, 0.0, 0.0, colors::AXIS_X));
    vertices.push(Vertex::colored(axis_length, 0.0, 0.0, colors::AXIS_X));
    vertices.push(Vertex::colored(0.0, 0.0, 0.0, colors::AXIS_Y));
    vertices.push(Vertex::colored(0.0, axis_length, 0.0, colors::AXIS_Y));
    vertices.push(Vertex::colored(0.0, 0.0, 0.0, colors::AXIS_Z));
    vertices.push(Vertex::colored(0.0, 0.0, axis_length, colors::AXIS_Z));

    vertices
}

/// Textured square centered on the origin as a 4-vertex triangle strip.
///
/// Winding is counter-clockwise as seen from -Z, so it survives back-face
/// culling for a camera looking down +Z.
pub fn textured_quad(half_size: f32) -> Vec<Vertex> {
    let s = half_size;
    vec![
        Vertex::textured(-s, s, 0.0, 0.0, 0.0),
        Vertex::textured(-s, -s, 0.0, 0.0, 1.0),
        Vertex::textured(s, s, 0.0, 1.0, 0.0),
        Vertex::textured(s, -s, 0.0, 1.0, 1.0),
    ]
}

/// RGBA8 checkerboard, `cells` squares per side
pub fn checkerboard(size: u32, cells: u32, light: [u8; 4], dark: [u8; 4]) -> Vec<u8> {
    let cell = (size / cells.max(1)).max(1);
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let texel = if (x / cell + y / cell) % 2 == 0 { light } else { dark };
            pixels.extend_from_slice(&texel);
        }
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disc_triangles() {
        let vertices = disc(20.0, colors::BALL);
        assert_eq!(vertices.len(), CIRCLE_SEGMENTS * 3);

        for triangle in vertices.chunks(3) {
            // Third vertex is the center, the others sit on the rim
            assert_eq!(triangle[2].position, [0.0, 0.0, 0.0, 1.0]);
            for rim in &triangle[..2] {
                let r = (rim.position[0].powi(2) + rim.position[1].powi(2)).sqrt();
                assert!((r - 20.0).abs() < 1e-3);
            }
        }

        // Fan closes: last rim vertex meets the first
        let first = vertices[0].position;
        let last = vertices[vertices.len() - 2].position;
        assert!((first[0] - last[0]).abs() < 1e-3);
        assert!((first[1] - last[1]).abs() < 1e-3);
    }

    #[test]
    fn test_rectangle_bounds() {
        let vertices = rectangle(100.0, 30.0, colors::PAD);
        assert_eq!(vertices.len(), 6);
        for v in &vertices {
            assert!((0.0..=100.0).contains(&v.position[0]));
            assert!((0.0..=30.0).contains(&v.position[1]));
        }
    }

    #[test]
    fn test_grid_line_count() {
        let vertices = grid(1000.0, 10.0, 100.0);
        // 201 lines per direction, two directions, plus three axes
        assert_eq!(vertices.len(), 201 * 4 + 6);
        assert_eq!(vertices.len() % 2, 0);
    }

    #[test]
    fn test_textured_quad_is_a_strip() {
        let vertices = textured_quad(50.0);
        assert_eq!(vertices.len(), 4);
        for v in &vertices {
            assert!(v.attribute[0] == 0.0 || v.attribute[0] == 1.0);
        }
    }

    #[test]
    fn test_checkerboard() {
        let white = [255, 255, 255, 255];
        let black = [0, 0, 0, 255];
        let pixels = checkerboard(4, 2, white, black);
        assert_eq!(pixels.len(), 4 * 4 * 4);
        // (0,0) light, (2,0) dark, (2,2) light
        assert_eq!(&pixels[0..4], &white);
        assert_eq!(&pixels[8..12], &black);
        assert_eq!(&pixels[(2 * 4 + 2) * 4..(2 * 4 + 2) * 4 + 4], &white);
    }
}
