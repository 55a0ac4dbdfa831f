use crate::{Mat4, Vec3};

/// Simple perspective camera (right-handed).
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_rad: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub aspect: f32,
}

impl Camera {
    #[inline]
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// OpenGL-style projection: clip-space z spans [-1, 1], matching
    /// glClearDepth/glDepthFunc defaults.
    #[inline]
    pub fn proj(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fov_y_rad,
            self.aspect.max(1e-6),
            self.z_near,
            self.z_far,
        )
    }

    #[inline]
    pub fn proj_view(&self) -> Mat4 {
        self.proj() * self.view()
    }

    #[inline]
    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }
}
