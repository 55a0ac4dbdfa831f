//! Wavefront OBJ loading on top of `tobj`.
//!
//! Parsing runs with `single_index: false` so the position/normal/texcoord
//! streams keep their independent per-face-vertex index arrays, exactly as
//! written in the file. The loader then expands every face-vertex entry
//! into its own output vertex: the result is non-indexed in spirit, with
//! `indices[i] == i`, and duplicates are not merged.

use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::mesh::{MeshData, Vertex};

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        single_index: false,
        ..Default::default()
    }
}

/// Load an OBJ mesh from a file path.
pub fn load_obj_from_path(path: impl AsRef<Path>) -> Result<MeshData> {
    let path = path.as_ref();
    let (models, _materials) = tobj::load_obj(path, &load_options())
        .with_context(|| format!("Failed to parse OBJ file: {}", path.display()))?;
    let mesh = expand_first_model(models)?;
    log::info!(
        "Loaded OBJ {} ({} vertices, {} indices)",
        path.display(),
        mesh.vertices.len(),
        mesh.indices.len()
    );
    Ok(mesh)
}

/// Load an OBJ mesh from an in-memory buffer. Material libraries referenced
/// by the buffer resolve to nothing.
pub fn load_obj_from_buf(reader: &mut impl BufRead) -> Result<MeshData> {
    let (models, _materials) = tobj::load_obj_buf(reader, &load_options(), |_| {
        tobj::load_mtl_buf(&mut std::io::Cursor::new(&b""[..]))
    })
    .context("Failed to parse OBJ buffer")?;
    expand_first_model(models)
}

fn expand_first_model(models: Vec<tobj::Model>) -> Result<MeshData> {
    if models.len() > 1 {
        log::warn!("OBJ contains {} models; using the first one", models.len());
    }
    let model = models
        .into_iter()
        .next()
        .context("OBJ contained no models")?;
    expand_mesh(&model.mesh)
}

/// Expand the separate index streams into one flat vertex per face-vertex
/// entry. Missing normal/texcoord streams fall back to +Z and (0, 0).
fn expand_mesh(mesh: &tobj::Mesh) -> Result<MeshData> {
    let entries = mesh.indices.len();
    if entries == 0 {
        bail!("OBJ contained no triangles");
    }
    u32::try_from(entries).map_err(|_| anyhow::anyhow!("Too many vertices in OBJ (>{})", u32::MAX))?;

    let mut vertices: Vec<Vertex> = Vec::with_capacity(entries);
    let mut indices: Vec<u32> = Vec::with_capacity(entries);

    for i in 0..entries {
        let position = fetch3(&mesh.positions, mesh.indices[i], "position")?;
        let normal = match mesh.normal_indices.get(i) {
            Some(&ni) => fetch3(&mesh.normals, ni, "normal")?,
            None => [0.0, 0.0, 1.0],
        };
        let uv = match mesh.texcoord_indices.get(i) {
            Some(&ti) => fetch2(&mesh.texcoords, ti, "texcoord")?,
            None => [0.0, 0.0],
        };
        vertices.push(Vertex::from_pnuv(position, normal, uv));
        indices.push(i as u32);
    }

    Ok(MeshData::new(vertices, indices))
}

fn fetch3(data: &[f32], index: u32, what: &str) -> Result<[f32; 3]> {
    let base = index as usize * 3;
    let v = data
        .get(base..base + 3)
        .with_context(|| format!("OBJ {} index {} out of bounds (len={})", what, index, data.len()))?;
    Ok([v[0], v[1], v[2]])
}

fn fetch2(data: &[f32], index: u32, what: &str) -> Result<[f32; 2]> {
    let base = index as usize * 2;
    let v = data
        .get(base..base + 2)
        .with_context(|| format!("OBJ {} index {} out of bounds (len={})", what, index, data.len()))?;
    Ok([v[0], v[1]])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> MeshData {
        load_obj_from_buf(&mut src.as_bytes()).expect("parse OBJ")
    }

    const TRIANGLE: &str = r#"
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
vn 0.0 0.0 1.0
vt 0.0 0.0
vt 1.0 0.0
vt 0.0 1.0
f 1/1/1 2/2/1 3/3/1
"#;

    #[test]
    fn one_vertex_per_face_entry() {
        let mesh = parse(TRIANGLE);
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert!(mesh.is_valid());
    }

    #[test]
    fn attribute_streams_dereferenced_independently() {
        let mesh = parse(TRIANGLE);
        // All three corners share normal slot 1 but each has its own uv.
        assert_eq!(mesh.vertices[1].position, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(mesh.vertices[1].uv, [1.0, 0.0]);
        for v in &mesh.vertices {
            assert_eq!(v.normal, [0.0, 0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn shared_corners_are_not_merged() {
        // Two triangles of a quad reuse positions 1 and 3; expansion keeps
        // six vertices anyway.
        let src = r#"
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
v 0.0 1.0 0.0
f 1 2 3
f 1 3 4
"#;
        let mesh = parse(src);
        assert_eq!(mesh.vertices.len(), 6);
        assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(mesh.vertices[0].position, mesh.vertices[3].position);
    }

    #[test]
    fn quad_face_is_triangulated() {
        let src = r#"
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
v 0.0 1.0 0.0
f 1 2 3 4
"#;
        let mesh = parse(src);
        assert_eq!(mesh.indices.len(), 6);
        assert_eq!(mesh.vertices.len(), 6);
    }

    #[test]
    fn missing_streams_fall_back_to_defaults() {
        let src = r#"
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
f 1 2 3
"#;
        let mesh = parse(src);
        for v in &mesh.vertices {
            assert_eq!(v.normal, [0.0, 0.0, 1.0, 0.0]);
            assert_eq!(v.uv, [0.0, 0.0]);
        }
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(load_obj_from_buf(&mut "".as_bytes()).is_err());
    }
}
