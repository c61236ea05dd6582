use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use crate::renderer::resources::vertex::VertexBufferLayout;

/// Data unique to each vertex of an imported mesh passed as elements into a vertex buffer
#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PerVertexData {
    pub position: Vec3,
    pub normal: Vec3,
    pub texcoord: Vec2,
    pub tangent: Vec3,
    pub bitangent: Vec3,
}

impl PerVertexData {
    pub fn buffer_layout() -> VertexBufferLayout {
        VertexBufferLayout::packed_f32(&[(0, 3), (1, 3), (2, 2), (3, 3), (4, 3)])
    }
}

/// Data unique to each vertex of the embedded screen quad
#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PerQuadVertexData {
    pub position: Vec3,
    pub texcoord: Vec2,
}

impl PerQuadVertexData {
    pub fn buffer_layout() -> VertexBufferLayout {
        VertexBufferLayout::packed_f32(&[(0, 3), (1, 2)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_match_struct_sizes() {
        assert_eq!(PerVertexData::buffer_layout().stride as usize, size_of::<PerVertexData>());
        assert_eq!(PerQuadVertexData::buffer_layout().stride as usize, size_of::<PerQuadVertexData>());
    }

    #[test]
    fn mesh_vertex_offsets() {
        let offsets: Vec<u8> = PerVertexData::buffer_layout()
            .attributes
            .iter()
            .map(|a| a.offset)
            .collect();
        assert_eq!(offsets, vec![0, 12, 24, 32, 44]);
    }
}
