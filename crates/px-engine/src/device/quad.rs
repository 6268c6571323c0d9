//! Fixed full-screen quad geometry.

use bytemuck::{Pod, Zeroable};

/// Depth of every quad vertex (mid-range).
pub const QUAD_DEPTH: f32 = 0.5;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub pos: [f32; 3], // clip space
    pub uv: [f32; 2],  // 0..1, top-left origin
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // pos
        1 => Float32x2  // uv
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const fn v(x: f32, y: f32, u: f32, uv_v: f32) -> QuadVertex {
    QuadVertex { pos: [x, y, QUAD_DEPTH], uv: [u, uv_v] }
}

/// Two clockwise triangles covering clip space [-1, 1] x [-1, 1].
pub const QUAD_VERTICES: [QuadVertex; 6] = [
    v(-1.0, 1.0, 0.0, 0.0),
    v(1.0, 1.0, 1.0, 0.0),
    v(1.0, -1.0, 1.0, 1.0),
    v(-1.0, 1.0, 0.0, 0.0),
    v(1.0, -1.0, 1.0, 1.0),
    v(-1.0, -1.0, 0.0, 1.0),
];

pub const QUAD_VERTEX_COUNT: u32 = QUAD_VERTICES.len() as u32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_five_floats() {
        assert_eq!(std::mem::size_of::<QuadVertex>(), 5 * 4);
        assert_eq!(QuadVertex::layout().array_stride, 20);
    }

    #[test]
    fn quad_covers_clip_space() {
        let xs: Vec<f32> = QUAD_VERTICES.iter().map(|v| v.pos[0]).collect();
        let ys: Vec<f32> = QUAD_VERTICES.iter().map(|v| v.pos[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), -1.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 1.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), -1.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 1.0);
        assert!(QUAD_VERTICES.iter().all(|v| v.pos[2] == QUAD_DEPTH));
    }

    #[test]
    fn uv_follows_top_left_origin() {
        // clip (x, y) maps to uv ((x + 1) / 2, (1 - y) / 2)
        for vert in QUAD_VERTICES {
            assert_eq!(vert.uv[0], (vert.pos[0] + 1.0) / 2.0);
            assert_eq!(vert.uv[1], (1.0 - vert.pos[1]) / 2.0);
        }
    }
}
