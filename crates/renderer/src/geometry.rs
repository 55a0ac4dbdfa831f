//! Geometry records: VAO + vertex/index buffer ownership and upload.

use std::path::Path;

use glow::HasContext;

use asset::mesh::Vertex;
use asset::obj;

use crate::{RenderError, RenderResult};

/// One uploaded mesh: vertex array, the two buffers behind it and how many
/// indices a draw should consume.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Geometry {
    vao: Option<glow::VertexArray>,
    vbo: Option<glow::Buffer>,
    ibo: Option<glow::Buffer>,
    index_count: u32,
}

impl Geometry {
    pub fn is_empty(&self) -> bool {
        self.vao.is_none() && self.vbo.is_none() && self.ibo.is_none()
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub(crate) fn vao(&self) -> Option<glow::VertexArray> {
        self.vao
    }
}

/// Upload caller-owned vertex and index slices into fresh GL buffers. The
/// caller keeps the slices; the record owns only the GL objects.
///
/// Attributes 0/1/2 are wired to position/normal/uv. The tangent and
/// bitangent fields ride along in the stride without an attribute binding.
pub fn make_geometry(
    gl: &glow::Context,
    vertices: &[Vertex],
    indices: &[u32],
) -> RenderResult<Geometry> {
    unsafe {
        let vao = gl.create_vertex_array().map_err(RenderError::Create)?;
        let vbo = gl.create_buffer().map_err(RenderError::Create)?;
        let ibo = gl.create_buffer().map_err(RenderError::Create)?;

        gl.bind_vertex_array(Some(vao));
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ibo));

        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(vertices),
            glow::STATIC_DRAW,
        );
        gl.buffer_data_u8_slice(
            glow::ELEMENT_ARRAY_BUFFER,
            bytemuck::cast_slice(indices),
            glow::STATIC_DRAW,
        );

        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_f32(
            0,
            4,
            glow::FLOAT,
            false,
            Vertex::STRIDE,
            Vertex::POSITION_OFFSET,
        );
        gl.enable_vertex_attrib_array(1);
        gl.vertex_attrib_pointer_f32(
            1,
            4,
            glow::FLOAT,
            false,
            Vertex::STRIDE,
            Vertex::NORMAL_OFFSET,
        );
        gl.enable_vertex_attrib_array(2);
        gl.vertex_attrib_pointer_f32(2, 2, glow::FLOAT, false, Vertex::STRIDE, Vertex::UV_OFFSET);

        // Unbind VAO first so the element buffer stays attached to it.
        gl.bind_vertex_array(None);
        gl.bind_buffer(glow::ARRAY_BUFFER, None);
        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);

        Ok(Geometry {
            vao: Some(vao),
            vbo: Some(vbo),
            ibo: Some(ibo),
            index_count: indices.len() as u32,
        })
    }
}

/// Parse an OBJ file and upload it.
pub fn load_geometry(gl: &glow::Context, path: impl AsRef<Path>) -> RenderResult<Geometry> {
    let mesh = obj::load_obj_from_path(path)?;
    make_geometry(gl, &mesh.vertices, &mesh.indices)
}

/// Delete the GL objects and reset the record to the empty state.
pub fn free_geometry(gl: &glow::Context, geometry: &mut Geometry) {
    unsafe {
        if let Some(vbo) = geometry.vbo.take() {
            gl.delete_buffer(vbo);
        }
        if let Some(ibo) = geometry.ibo.take() {
            gl.delete_buffer(ibo);
        }
        if let Some(vao) = geometry.vao.take() {
            gl.delete_vertex_array(vao);
        }
    }
    *geometry = Geometry::default();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_is_empty() {
        let geo = Geometry::default();
        assert!(geo.is_empty());
        assert_eq!(geo.index_count(), 0);
        assert_eq!(geo.vao(), None);
    }

    #[test]
    fn upload_byte_sizes() {
        // Three 72-byte vertices and three u32 indices, as handed to
        // buffer_data_u8_slice.
        let vertices = vec![Vertex::default(); 3];
        let indices: Vec<u32> = vec![2, 1, 0];
        assert_eq!(bytemuck::cast_slice::<Vertex, u8>(&vertices).len(), 216);
        assert_eq!(bytemuck::cast_slice::<u32, u8>(&indices).len(), 12);
    }
}
