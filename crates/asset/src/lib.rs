//! Asset loading/parsers (meshes, textures, shaders).
//! Everything here is CPU-side data; the renderer decides how to upload it.

pub mod mesh;
pub mod obj;
pub mod shader;
pub mod texture;
