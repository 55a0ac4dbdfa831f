//! Shader program records: compile, link, log-and-continue.

use std::path::Path;

use glow::HasContext;

use asset::shader::ShaderSource;

use crate::{RenderError, RenderResult};

/// One linked (or at least attempted) program.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Shader {
    program: Option<glow::Program>,
}

impl Shader {
    pub fn is_empty(&self) -> bool {
        self.program.is_none()
    }

    pub(crate) fn program(&self) -> Option<glow::Program> {
        self.program
    }
}

/// Compile and link a program from vertex/fragment sources.
///
/// Best effort: compile and link diagnostics go to the error log, but the
/// program record is returned even when a stage failed, so the caller can
/// keep running and see the breakage on screen instead of crashing.
/// `Err` means GL object creation itself failed.
pub fn make_shader(gl: &glow::Context, vertex_src: &str, fragment_src: &str) -> RenderResult<Shader> {
    unsafe {
        let program = gl.create_program().map_err(RenderError::Create)?;
        let vertex = compile_stage(gl, glow::VERTEX_SHADER, vertex_src)?;
        let fragment = compile_stage(gl, glow::FRAGMENT_SHADER, fragment_src)?;

        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        gl.link_program(program);
        if !gl.get_program_link_status(program) {
            log::error!("Program link failed: {}", gl.get_program_info_log(program));
        }

        // Stage objects are only needed for the link.
        gl.delete_shader(vertex);
        gl.delete_shader(fragment);

        Ok(Shader {
            program: Some(program),
        })
    }
}

/// Read both stage sources from disk, then compile and link them.
pub fn load_shader(
    gl: &glow::Context,
    vertex_path: impl AsRef<Path>,
    fragment_path: impl AsRef<Path>,
) -> RenderResult<Shader> {
    let source = ShaderSource::load(vertex_path, fragment_path)?;
    make_shader(gl, &source.vertex, &source.fragment)
}

/// Delete the program and reset the record to the empty state.
pub fn free_shader(gl: &glow::Context, shader: &mut Shader) {
    if let Some(program) = shader.program.take() {
        unsafe { gl.delete_program(program) };
    }
    *shader = Shader::default();
}

fn compile_stage(gl: &glow::Context, stage: u32, source: &str) -> RenderResult<glow::Shader> {
    unsafe {
        let shader = gl.create_shader(stage).map_err(RenderError::Create)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
        if !gl.get_shader_compile_status(shader) {
            log::error!(
                "{} compile failed: {}",
                stage_name(stage),
                gl.get_shader_info_log(shader)
            );
        }
        Ok(shader)
    }
}

fn stage_name(stage: u32) -> &'static str {
    match stage {
        glow::VERTEX_SHADER => "Vertex shader",
        glow::FRAGMENT_SHADER => "Fragment shader",
        _ => "Shader",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_is_empty() {
        let shader = Shader::default();
        assert!(shader.is_empty());
        assert_eq!(shader.program(), None);
    }

    #[test]
    fn stage_names() {
        assert_eq!(stage_name(glow::VERTEX_SHADER), "Vertex shader");
        assert_eq!(stage_name(glow::FRAGMENT_SHADER), "Fragment shader");
        assert_eq!(stage_name(glow::GEOMETRY_SHADER), "Shader");
    }
}
