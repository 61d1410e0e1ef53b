//! First-person camera rig mounted on the player body.

use glam::{Mat4, Quat, Vec3};
use strider_physics::CameraPivot;

/// Camera pivot state plus projection parameters.
///
/// Height is measured from the body base. Pitch is in degrees, positive looks
/// down. Yaw is owned by the body and passed in when building matrices.
#[derive(Debug, Clone)]
pub struct CameraRig {
    /// Eye height above the body base.
    pub height: f32,

    /// Pitch in degrees.
    pub pitch: f32,

    /// Field of view in degrees.
    pub fov: f32,

    /// Near clipping plane.
    pub near: f32,

    /// Far clipping plane.
    pub far: f32,

    /// Aspect ratio (width / height).
    pub aspect: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            height: 1.6,
            pitch: 0.0,
            fov: 90.0,
            near: 0.1,
            far: 1000.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl CameraRig {
    /// Create a rig at the given eye height.
    pub fn new(height: f32) -> Self {
        Self {
            height,
            ..Default::default()
        }
    }

    /// Eye position in world space for a body at `base`.
    pub fn eye_position(&self, base: Vec3) -> Vec3 {
        base + Vec3::Y * self.height
    }

    /// Direction the camera looks for a body facing `yaw_degrees`.
    pub fn look_direction(&self, yaw_degrees: f32) -> Vec3 {
        let rotation = Quat::from_rotation_y(-yaw_degrees.to_radians())
            * Quat::from_rotation_x(-self.pitch.to_radians());
        rotation * Vec3::NEG_Z
    }

    /// View matrix for a body at `base` facing `yaw_degrees`.
    pub fn view_matrix(&self, base: Vec3, yaw_degrees: f32) -> Mat4 {
        let eye = self.eye_position(base);
        Mat4::look_to_rh(eye, self.look_direction(yaw_degrees), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far)
    }
}

impl CameraPivot for CameraRig {
    fn local_height(&self) -> f32 {
        self.height
    }

    fn set_local_height(&mut self, height: f32) {
        self.height = height;
    }

    fn pitch_degrees(&self) -> f32 {
        self.pitch
    }

    fn set_pitch_degrees(&mut self, pitch: f32) {
        self.pitch = pitch;
    }
}
