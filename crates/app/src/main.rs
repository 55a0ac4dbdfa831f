//! Entry point for Zarya3D: a rotating textured cube (or the classic
//! first triangle) rendered through the platform/renderer crates.

use std::path::PathBuf;

use anyhow::Result;

use asset::mesh::Vertex;
use corelib::camera::Camera;
use corelib::transform::Transform;
use corelib::{Vec3, vec3};
use platform::{FrameHandler, WindowConfig};
use renderer::{Geometry, Shader, Texture};

/// Uniform locations, kept in sync with the layout(location = N)
/// declarations in the GLSL below.
const U_PROJ: u32 = 0;
const U_VIEW: u32 = 1;
const U_MODEL: u32 = 2;
const U_ALBEDO: u32 = 3;
const U_LIGHT_DIR: u32 = 4;

/// Texture unit the albedo sampler reads through.
const ALBEDO_UNIT: u32 = 0;

/// Model spin per frame around +Y, in degrees.
const SPIN_STEP_DEG: f32 = 5.0;

const MVP_VERT: &str = r#"#version 430 core
layout (location = 0) in vec4 position;
layout (location = 1) in vec4 normal;
layout (location = 2) in vec2 uv;
layout (location = 0) uniform mat4 proj;
layout (location = 1) uniform mat4 view;
layout (location = 2) uniform mat4 model;
out vec2 v_uv;
out vec3 v_normal;
void main() {
    gl_Position = proj * view * model * position;
    v_uv = uv;
    v_normal = normalize(model * normal).xyz;
}
"#;

const FLAT_FRAG: &str = r#"#version 430 core
out vec4 out_color;
void main() {
    out_color = vec4(1.0, 0.0, 0.0, 1.0);
}
"#;

const TEXTURED_FRAG: &str = r#"#version 430 core
in vec2 v_uv;
in vec3 v_normal;
layout (location = 3) uniform sampler2D albedo;
layout (location = 4) uniform vec3 light_dir;
out vec4 out_color;
void main() {
    float diffuse = max(0.0, dot(normalize(v_normal), -light_dir));
    vec3 base = texture(albedo, v_uv).rgb;
    out_color = vec4(base * diffuse, 1.0);
}
"#;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SceneKind {
    Cube,
    Triangle,
}

/// GL resources owned by the scene once `init` has run.
struct SceneResources {
    cube: Geometry,
    triangle: Geometry,
    basic: Shader,
    textured: Shader,
    albedo: Texture,
}

struct DemoScene {
    kind: SceneKind,
    obj_path: PathBuf,
    texture_path: PathBuf,
    camera: Camera,
    model: Transform,
    light_dir: Vec3,
    resources: Option<SceneResources>,
}

impl DemoScene {
    fn new(kind: SceneKind, obj_path: PathBuf, texture_path: PathBuf) -> Self {
        Self {
            kind,
            obj_path,
            texture_path,
            camera: Camera {
                eye: vec3(0.0, 0.0, -2.0),
                target: Vec3::ZERO,
                up: Vec3::Y,
                fov_y_rad: 45f32.to_radians(),
                z_near: 0.1,
                z_far: 1000.0,
                aspect: 800.0 / 600.0,
            },
            model: Transform::identity(),
            light_dir: vec3(-1.0, 0.0, 0.0),
            resources: None,
        }
    }

    /// The classic first triangle, wound the way the old fixed demos had
    /// it: indices {2, 1, 0}.
    fn triangle_mesh() -> (Vec<Vertex>, Vec<u32>) {
        let vertices = vec![
            Vertex::from_pnuv([-0.5, -0.5, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0]),
            Vertex::from_pnuv([0.5, -0.5, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0]),
            Vertex::from_pnuv([0.0, 0.5, 0.0], [0.0, 0.0, 1.0], [0.5, 1.0]),
        ];
        (vertices, vec![2, 1, 0])
    }
}

impl FrameHandler for DemoScene {
    fn init(&mut self, gl: &glow::Context) -> Result<()> {
        let cube = renderer::load_geometry(gl, &self.obj_path)?;
        let (tri_vertices, tri_indices) = Self::triangle_mesh();
        let triangle = renderer::make_geometry(gl, &tri_vertices, &tri_indices)?;
        let basic = renderer::make_shader(gl, MVP_VERT, FLAT_FRAG)?;
        let textured = renderer::make_shader(gl, MVP_VERT, TEXTURED_FRAG)?;
        let albedo = renderer::load_texture(gl, &self.texture_path)?;

        log::info!(
            "Scene ready: cube={} indices, triangle={} indices, albedo={}x{} ({} channel(s))",
            cube.index_count(),
            triangle.index_count(),
            albedo.width(),
            albedo.height(),
            albedo.channels()
        );
        self.resources = Some(SceneResources {
            cube,
            triangle,
            basic,
            textured,
            albedo,
        });
        Ok(())
    }

    fn frame(&mut self, gl: &glow::Context, width: u32, height: u32) -> Result<()> {
        let Some(res) = self.resources.as_ref() else {
            return Ok(());
        };

        self.model.rotate_y(SPIN_STEP_DEG.to_radians());

        let camera = self.camera.with_aspect(width as f32 / height as f32);
        let proj = camera.proj();
        let view = camera.view();
        let model = self.model.matrix();

        match self.kind {
            SceneKind::Cube => {
                renderer::set_uniform(gl, &res.textured, U_PROJ, &proj);
                renderer::set_uniform(gl, &res.textured, U_VIEW, &view);
                renderer::set_uniform(gl, &res.textured, U_MODEL, &model);
                renderer::set_uniform(gl, &res.textured, U_ALBEDO, (&res.albedo, ALBEDO_UNIT));
                renderer::set_uniform(gl, &res.textured, U_LIGHT_DIR, self.light_dir);
                renderer::draw(gl, &res.textured, &res.cube);
            }
            SceneKind::Triangle => {
                renderer::set_uniform(gl, &res.basic, U_PROJ, &proj);
                renderer::set_uniform(gl, &res.basic, U_VIEW, &view);
                renderer::set_uniform(gl, &res.basic, U_MODEL, &model);
                renderer::draw(gl, &res.basic, &res.triangle);
            }
        }
        Ok(())
    }

    fn term(&mut self, gl: &glow::Context) {
        if let Some(mut res) = self.resources.take() {
            renderer::free_geometry(gl, &mut res.cube);
            renderer::free_geometry(gl, &mut res.triangle);
            renderer::free_shader(gl, &mut res.basic);
            renderer::free_shader(gl, &mut res.textured);
            renderer::free_texture(gl, &mut res.albedo);
            log::info!("Scene resources freed.");
        }
    }
}

fn parse_scene_arg() -> SceneKind {
    // Accept: --scene=cube|triangle
    for arg in std::env::args() {
        if let Some(val) = arg.strip_prefix("--scene=") {
            return match val.to_ascii_lowercase().as_str() {
                "cube" => SceneKind::Cube,
                "triangle" | "tri" => SceneKind::Triangle,
                other => {
                    eprintln!("[warn] Unknown scene '{}', falling back to cube.", other);
                    SceneKind::Cube
                }
            };
        }
    }
    SceneKind::Cube
}

fn parse_vsync_arg() -> bool {
    // --vsync[=on|off], по умолчанию on
    for arg in std::env::args() {
        if let Some(val) = arg.strip_prefix("--vsync=") {
            return matches!(
                val.to_ascii_lowercase().as_str(),
                "1" | "true" | "on" | "yes"
            );
        }
    }
    true
}

fn parse_path_arg(prefix: &str, default: &str) -> PathBuf {
    for arg in std::env::args() {
        if let Some(val) = arg.strip_prefix(prefix) {
            return PathBuf::from(val);
        }
    }
    PathBuf::from(default)
}

fn parse_size_args() -> (u32, u32) {
    let mut w: Option<u32> = None;
    let mut h: Option<u32> = None;

    for arg in std::env::args() {
        if let Some(v) = arg.strip_prefix("--size=") {
            if let Some((sw, sh)) = v.split_once('x').or_else(|| v.split_once('X')) {
                if let (Ok(pw), Ok(ph)) = (sw.parse::<u32>(), sh.parse::<u32>()) {
                    w = Some(pw);
                    h = Some(ph);
                }
            }
        } else if let Some(v) = arg.strip_prefix("--width=") {
            if let Ok(pw) = v.parse::<u32>() {
                w = Some(pw);
            }
        } else if let Some(v) = arg.strip_prefix("--height=") {
            if let Ok(ph) = v.parse::<u32>() {
                h = Some(ph);
            }
        }
    }

    let ww = w.unwrap_or(800).max(1);
    let hh = h.unwrap_or(600).max(1);
    (ww, hh)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (width, height) = parse_size_args();
    let scene = parse_scene_arg();
    let obj_path = parse_path_arg("--obj=", "assets/cube.obj");
    let texture_path = parse_path_arg("--texture=", "assets/checker.png");
    let vsync = parse_vsync_arg();

    log::info!(
        "Starting Zarya3D. scene={:?}, window_size={}x{}, obj={}, texture={}, vsync={}",
        scene,
        width,
        height,
        obj_path.display(),
        texture_path.display(),
        vsync
    );

    let config = WindowConfig {
        title: "Zarya3D".to_string(),
        width,
        height,
        vsync,
    };
    platform::run(config, DemoScene::new(scene, obj_path, texture_path))?;

    log::info!("Graceful shutdown. Bye!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_fixture_matches_the_classic() {
        let (vertices, indices) = DemoScene::triangle_mesh();
        assert_eq!(vertices.len(), 3);
        assert_eq!(indices, vec![2, 1, 0]);
        assert_eq!(vertices[0].position, [-0.5, -0.5, 0.0, 1.0]);
        assert_eq!(vertices[1].position, [0.5, -0.5, 0.0, 1.0]);
        assert_eq!(vertices[2].position, [0.0, 0.5, 0.0, 1.0]);
        for v in &vertices {
            assert_eq!(v.normal, [0.0, 0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn uniform_locations_match_the_glsl() {
        for (decl, location) in [
            ("mat4 proj", U_PROJ),
            ("mat4 view", U_VIEW),
            ("mat4 model", U_MODEL),
        ] {
            let needle = format!("layout (location = {location}) uniform {decl}");
            assert!(MVP_VERT.contains(&needle), "missing: {needle}");
        }
        let albedo = format!("layout (location = {U_ALBEDO}) uniform sampler2D albedo");
        let light = format!("layout (location = {U_LIGHT_DIR}) uniform vec3 light_dir");
        assert!(TEXTURED_FRAG.contains(&albedo), "missing: {albedo}");
        assert!(TEXTURED_FRAG.contains(&light), "missing: {light}");
    }

    #[test]
    fn five_degree_spin_wraps_after_72_frames() {
        let mut t = Transform::identity();
        for _ in 0..72 {
            t.rotate_y(SPIN_STEP_DEG.to_radians());
        }
        assert!((t.rotation_euler.y - std::f32::consts::TAU).abs() < 1e-3);
    }
}
