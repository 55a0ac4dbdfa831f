//! GL resource records and the operations that manage them.
//!
//! Records ([`Geometry`], [`Shader`], [`Texture`]) are plain data holding GL
//! handles next to a little metadata. `Default` is the empty state and the
//! matching `free_*` call deletes the GL objects and resets the record back
//! to it; freeing an already-empty record is a no-op. Nothing here frees on
//! drop, so records can be copied around and die without touching GL.
//!
//! Every call must run on the thread that owns the GL context.

use glow::HasContext;
use thiserror::Error;

pub mod geometry;
pub mod shader;
pub mod texture;
pub mod uniform;

pub use geometry::{Geometry, free_geometry, load_geometry, make_geometry};
pub use shader::{Shader, free_shader, load_shader, make_shader};
pub use texture::{Texture, free_texture, load_texture, make_texture};
pub use uniform::{UniformValue, set_uniform};

/// Errors from GL object creation and upload validation.
///
/// Shader compile/link failures are deliberately not covered: the shader
/// pipeline logs their diagnostics and hands back the program record anyway
/// (see [`shader::make_shader`]).
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create GL object: {0}")]
    Create(String),
    #[error("unsupported channel count {0} (expected 1..=4)")]
    UnsupportedChannels(u32),
    #[error("pixel buffer holds {actual} bytes, expected {expected} for {width}x{height}x{channels}")]
    PixelDataSize {
        expected: usize,
        actual: usize,
        width: u32,
        height: u32,
        channels: u32,
    },
    #[error(transparent)]
    Asset(#[from] anyhow::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Issue one indexed draw of `geometry` with `shader`'s program bound.
/// Triangles, u32 indices, starting at offset 0.
pub fn draw(gl: &glow::Context, shader: &Shader, geometry: &Geometry) {
    let (Some(program), Some(vao)) = (shader.program(), geometry.vao()) else {
        log::warn!("draw called with an empty shader or geometry; skipping");
        return;
    };
    unsafe {
        gl.use_program(Some(program));
        gl.bind_vertex_array(Some(vao));
        gl.draw_elements(
            glow::TRIANGLES,
            geometry.index_count() as i32,
            glow::UNSIGNED_INT,
            0,
        );
    }
}
