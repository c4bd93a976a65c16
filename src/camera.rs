use glam::{Mat4, Vec2, Vec3};

use crate::core::PointerState;
use crate::math::damp_vec3;
use crate::types::CameraUniform;
use crate::window::Viewport;

pub const CAMERA_FOV_DEGREES: f32 = 60.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_DISTANCE: f32 = 18.0;
/// Camera offset at full pointer deflection along x and y
pub const PARALLAX_RANGE: Vec2 = Vec2::new(2.2, 1.1);

/// Perspective camera that drifts toward a pointer-derived target and always
/// looks at the scene origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxCamera {
    pub position: Vec3,
    pub look_at: Vec3,
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub parallax: Vec2,
}

impl ParallaxCamera {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, CAMERA_DISTANCE),
            look_at: Vec3::ZERO,
            fov_y: CAMERA_FOV_DEGREES.to_radians(),
            aspect: viewport.aspect(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            parallax: PARALLAX_RANGE,
        }
    }

    /// Update the projection for a new viewport; zero sizes are ignored
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport.is_empty() {
            return;
        }
        self.aspect = viewport.aspect();
    }

    /// Where the camera wants to be for the given pointer.
    /// Screen y grows downward, so the camera y is inverted.
    pub fn parallax_target(&self, pointer: PointerState) -> Vec3 {
        Vec3::new(
            pointer.x * self.parallax.x,
            -pointer.y * self.parallax.y,
            self.position.z,
        )
    }

    /// One damped step toward the pointer-derived target
    pub fn ease_toward(&mut self, pointer: PointerState, damping: f32) {
        let target = self.parallax_target(pointer);
        self.position = damp_vec3(self.position, target, damping);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_at, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn to_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_projection().to_cols_array_2d(),
            eye: self.position.to_array(),
            _pad: 0.0,
        }
    }
}
