//! GPU vertex format

use bytemuck::{Pod, Zeroable};
use morphbot_scene::DrawVertex;

/// A world-space vertex with a flat color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x4,
    ];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

impl From<&DrawVertex> for Vertex {
    fn from(v: &DrawVertex) -> Self {
        Self {
            position: v.position,
            color: v.color,
        }
    }
}

/// Convert a recorded vertex stream for upload
pub fn to_gpu_vertices(vertices: &[DrawVertex]) -> Vec<Vertex> {
    vertices.iter().map(Vertex::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout() {
        assert_eq!(std::mem::size_of::<Vertex>(), 28);
        let desc = Vertex::desc();
        assert_eq!(desc.array_stride, 28);
        assert_eq!(desc.attributes.len(), 2);
        assert_eq!(desc.attributes[1].offset, 12);
    }

    #[test]
    fn test_conversion_keeps_data() {
        let recorded = [DrawVertex {
            position: [1.0, 2.0, 3.0],
            color: [0.5, 0.25, 0.0, 1.0],
        }];
        let gpu = to_gpu_vertices(&recorded);
        assert_eq!(gpu[0].position, [1.0, 2.0, 3.0]);
        assert_eq!(gpu[0].color, [0.5, 0.25, 0.0, 1.0]);
        assert_eq!(bytemuck::cast_slice::<Vertex, u8>(&gpu).len(), 28);
    }
}
