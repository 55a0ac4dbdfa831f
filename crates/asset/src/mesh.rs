//! CPU-side mesh representation used by loaders.

use bytemuck::{Pod, Zeroable};

/// Vertex exactly as it is uploaded to the GPU. Position and normal carry a
/// homogeneous w component (1 for points, 0 for directions); tangent and
/// bitangent occupy the stride but are not wired to any attribute yet.
///
/// Byte offsets of the bound fields are fixed by the attribute setup in the
/// renderer: position at 0, normal at 16, uv at 32.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 4],
    pub normal: [f32; 4],
    pub uv: [f32; 2],
    pub tangent: [f32; 4],
    pub bitangent: [f32; 4],
}

impl Vertex {
    pub const STRIDE: i32 = std::mem::size_of::<Vertex>() as i32;
    pub const POSITION_OFFSET: i32 = 0;
    pub const NORMAL_OFFSET: i32 = 16;
    pub const UV_OFFSET: i32 = 32;

    /// Build a vertex from 3-component position/normal plus uv, filling in
    /// the w components.
    pub fn from_pnuv(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position: [position[0], position[1], position[2], 1.0],
            normal: [normal[0], normal[1], normal[2], 0.0],
            uv,
            ..Self::zeroed()
        }
    }
}

/// Flat triangle mesh ready for upload. Loaders expand face-vertex entries
/// one-to-one, so `indices` is always `[0, 1, 2, ..]` for loaded meshes;
/// hand-built meshes may reorder.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Returns `true` if both vertex and index buffers are non-empty.
    pub fn is_valid(&self) -> bool {
        !self.vertices.is_empty() && !self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_layout_matches_attribute_setup() {
        assert_eq!(std::mem::size_of::<Vertex>(), 72);
        assert_eq!(std::mem::offset_of!(Vertex, position), 0);
        assert_eq!(std::mem::offset_of!(Vertex, normal), 16);
        assert_eq!(std::mem::offset_of!(Vertex, uv), 32);
        assert_eq!(std::mem::offset_of!(Vertex, tangent), 40);
        assert_eq!(std::mem::offset_of!(Vertex, bitangent), 56);
    }

    #[test]
    fn from_pnuv_fills_w_components() {
        let v = Vertex::from_pnuv([1.0, 2.0, 3.0], [0.0, 1.0, 0.0], [0.25, 0.75]);
        assert_eq!(v.position, [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(v.normal, [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(v.uv, [0.25, 0.75]);
        assert_eq!(v.tangent, [0.0; 4]);
        assert_eq!(v.bitangent, [0.0; 4]);
    }

    #[test]
    fn mesh_data_validity() {
        let data = MeshData::new(vec![Vertex::default()], vec![0]);
        assert!(data.is_valid());
        assert!(!MeshData::default().is_valid());
    }
}
