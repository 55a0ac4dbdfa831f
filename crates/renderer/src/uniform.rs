//! Uniform setters addressed by explicit location.
//!
//! Locations are the integers declared with `layout(location = N)` in the
//! GLSL source. Nothing validates that the declared uniform type matches
//! the value written; a mismatch is the usual GL silent misbehavior.

use glam::{Mat4, Vec3};
use glow::HasContext;

use crate::{Shader, Texture};

/// Values that can be written into a program uniform slot.
pub trait UniformValue {
    fn apply(&self, gl: &glow::Context, location: u32);
}

/// Bind `shader`'s program and write `value` at `location`. Writing to an
/// empty shader is logged and skipped.
pub fn set_uniform<V: UniformValue>(gl: &glow::Context, shader: &Shader, location: u32, value: V) {
    let Some(program) = shader.program() else {
        log::warn!("set_uniform on an empty shader (location {location}); skipping");
        return;
    };
    unsafe { gl.use_program(Some(program)) };
    value.apply(gl, location);
}

// Location 0 is valid in GL, hence the plain integer wrapper type.
fn slot(location: u32) -> glow::NativeUniformLocation {
    glow::NativeUniformLocation(location)
}

impl UniformValue for &Mat4 {
    /// Sixteen floats, column-major as glam stores them, no transpose.
    fn apply(&self, gl: &glow::Context, location: u32) {
        unsafe {
            gl.uniform_matrix_4_f32_slice(Some(&slot(location)), false, &self.to_cols_array());
        }
    }
}

impl UniformValue for Vec3 {
    fn apply(&self, gl: &glow::Context, location: u32) {
        unsafe {
            gl.uniform_3_f32_slice(Some(&slot(location)), &self.to_array());
        }
    }
}

/// A texture sampled through a texture unit: binds the texture to
/// `TEXTURE0 + unit` and writes the unit index into the sampler slot.
impl<'a> UniformValue for (&'a Texture, u32) {
    fn apply(&self, gl: &glow::Context, location: u32) {
        let (texture, unit) = *self;
        let Some(handle) = texture.handle() else {
            log::warn!("sampler at location {location} bound to an empty texture; skipping");
            return;
        };
        unsafe {
            gl.active_texture(glow::TEXTURE0 + unit);
            gl.bind_texture(glow::TEXTURE_2D, Some(handle));
            gl.uniform_1_i32(Some(&slot(location)), unit as i32);
        }
    }
}
