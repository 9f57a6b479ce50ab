//! Fixed camera looking at the sphere from above.

use glam::{Mat4, Vec3};

use crate::params::RenderConfig;

/// Stationary camera aimed at the origin
#[derive(Debug, Clone)]
pub struct CameraSystem {
    eye: Vec3,
    up: Vec3,
    fov_radians: f32,
    near: f32,
    far: f32,
}

impl CameraSystem {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            eye: Vec3::from_array(config.camera_position),
            up: Vec3::from_array(config.camera_up),
            fov_radians: config.fov_degrees.to_radians(),
            near: config.near_plane,
            far: config.far_plane,
        }
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Combined view-projection matrix for a viewport aspect ratio.
    ///
    /// A zero-height viewport (minimised window) is treated as square.
    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        let aspect = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            1.0
        };

        let view = Mat4::look_at_rh(self.eye, Vec3::ZERO, self.up);
        let proj = Mat4::perspective_rh(self.fov_radians, aspect, self.near, self.far);
        proj * view
    }
}
