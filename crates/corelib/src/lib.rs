//! Core types: math re-exports, Transform, Camera.

pub use glam::{EulerRot, Mat4, Quat, Vec3, vec3};

pub mod camera;
pub mod transform;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_transform_is_identity_matrix() {
        let t = transform::Transform::identity();
        assert_eq!(t.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn translate_then_scale_matrix() {
        let t = transform::Transform::from_trs(
            vec3(1.0, 2.0, 3.0),
            vec3(0.0, 0.0, 0.0),
            vec3(2.0, 2.0, 2.0),
        );
        // Проверим пару элементов: последний столбец = translation,
        // диагональ = scale (при нулевой ротации).
        let m = t.matrix().to_cols_array();
        assert!((m[12] - 1.0).abs() < 1e-6);
        assert!((m[13] - 2.0).abs() < 1e-6);
        assert!((m[14] - 3.0).abs() < 1e-6);
        assert!((m[0] - 2.0).abs() < 1e-6);
        assert!((m[5] - 2.0).abs() < 1e-6);
        assert!((m[10] - 2.0).abs() < 1e-6);
    }

    #[test]
    fn spin_accumulates_rotation() {
        let mut t = transform::Transform::identity();
        for _ in 0..4 {
            t.rotate_y(5f32.to_radians());
        }
        assert!((t.rotation_euler.y - 20f32.to_radians()).abs() < 1e-6);
        // Y-поворот не трогает translation.
        let m = t.matrix().to_cols_array();
        assert!(m[12].abs() < 1e-6 && m[13].abs() < 1e-6 && m[14].abs() < 1e-6);
    }

    #[test]
    fn camera_pv_is_finite() {
        let cam = camera::Camera {
            eye: vec3(0.0, 0.0, 4.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y_rad: 60f32.to_radians(),
            z_near: 0.1,
            z_far: 100.0,
            aspect: 16.0 / 9.0,
        };
        let pv = cam.proj_view();
        let a = pv.to_cols_array();
        assert!(a.iter().all(|f| f.is_finite()));
    }

    #[test]
    fn camera_proj_spans_gl_clip_range() {
        let cam = camera::Camera {
            eye: Vec3::ZERO,
            target: vec3(0.0, 0.0, -1.0),
            up: Vec3::Y,
            fov_y_rad: 45f32.to_radians(),
            z_near: 0.1,
            z_far: 1000.0,
            aspect: 4.0 / 3.0,
        };
        let proj = cam.proj();
        let near = proj * glam::vec4(0.0, 0.0, -0.1, 1.0);
        let far = proj * glam::vec4(0.0, 0.0, -1000.0, 1.0);
        assert!((near.z / near.w + 1.0).abs() < 1e-4);
        assert!((far.z / far.w - 1.0).abs() < 1e-4);
    }
}
