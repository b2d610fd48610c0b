//! Viewer camera: a panned and tilted view of the model

use morphbot_core::math::{self, Mat4};
use morphbot_core::Vec3;

/// Camera driven by arrow-key panning and mouse-drag rotation.
///
/// The view is `translate(view_x, view_y, view_z) * rotX(pitch) * rotY(yaw)`,
/// so the model spins about its own origin and panning moves it in eye space.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewCamera {
    pub view_x: f32,
    pub view_y: f32,
    pub view_z: f32,
    /// Rotation about X in degrees, clamped to [-90, 90]
    pub pitch: f32,
    /// Rotation about Y in degrees, unclamped
    pub yaw: f32,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ViewCamera {
    fn default() -> Self {
        Self {
            view_x: 0.0,
            view_y: 0.0,
            view_z: -15.0,
            pitch: 0.0,
            yaw: 0.0,
            fov: 45.0,
            near: 0.1,
            far: 50.0,
        }
    }
}

impl ViewCamera {
    pub const PITCH_LIMIT: f32 = 90.0;

    pub fn new() -> Self {
        Self::default()
    }

    /// Rotate by a cursor drag of `(dx, dy)` pixels
    pub fn drag(&mut self, dx: f32, dy: f32, degrees_per_pixel: f32) {
        self.yaw += dx * degrees_per_pixel;
        self.pitch = (self.pitch + dy * degrees_per_pixel).clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
    }

    /// Move the model in eye space
    pub fn pan(&mut self, dx: f32, dz: f32) {
        self.view_x += dx;
        self.view_z += dz;
    }

    pub fn view_matrix(&self) -> Mat4 {
        let translate = math::translation(Vec3::new(self.view_x, self.view_y, self.view_z));
        let pitch = math::axis_angle(self.pitch, Vec3::X);
        let yaw = math::axis_angle(self.yaw, Vec3::Y);
        math::mat4_mul(&math::mat4_mul(&translate, &pitch), &yaw)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        math::perspective(self.fov, aspect, self.near, self.far)
    }

    pub fn view_projection_matrix(&self, aspect: f32) -> Mat4 {
        math::mat4_mul(&self.projection_matrix(aspect), &self.view_matrix())
    }
}
