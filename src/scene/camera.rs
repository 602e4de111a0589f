// Perspective camera orbiting a target point
//
// Screen-plane coordinates used throughout: `x` grows right, `y` grows up,
// the visible area spans y in [-1, 1] and x in [-aspect, aspect].

use super::math::{Ray, Vec3};
use crate::app::config::{
    CAMERA_DISTANCE, CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_MAX_DISTANCE, CAMERA_MIN_DISTANCE,
    CAMERA_NEAR,
};

/// Keep the camera off the poles so the view basis stays well-defined
const MAX_PITCH: f64 = 1.4;

/// A scene point mapped onto the screen plane
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projected {
    pub x: f64,
    pub y: f64,
    /// Distance along the view direction
    pub depth: f64,
    /// Screen-plane units per scene unit at this depth
    pub scale: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub target: Vec3,
    pub distance: f64,
    /// Rotation around the vertical axis (radians)
    pub yaw: f64,
    /// Elevation above the horizontal plane (radians)
    pub pitch: f64,
    pub fov_y: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: CAMERA_DISTANCE,
            yaw: 0.0,
            pitch: 0.0,
            fov_y: CAMERA_FOV_DEG.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        }
    }
}

impl Camera {
    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target
            + Vec3::new(
                self.distance * cos_pitch * sin_yaw,
                self.distance * sin_pitch,
                self.distance * cos_pitch * cos_yaw,
            )
    }

    /// (forward, right, up) unit vectors
    fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = (self.target - self.eye()).normalized();
        let right = forward.cross(Vec3::UP).normalized();
        let up = right.cross(forward);
        (forward, right, up)
    }

    fn tan_half_fov(&self) -> f64 {
        (self.fov_y / 2.0).tan()
    }

    /// Project a scene point. `None` when outside the near/far range,
    /// which includes everything behind the camera.
    pub fn project(&self, point: Vec3) -> Option<Projected> {
        let (forward, right, up) = self.basis();
        let rel = point - self.eye();
        let depth = rel.dot(forward);
        if depth <= self.near || depth >= self.far {
            return None;
        }
        let scale = 1.0 / (depth * self.tan_half_fov());
        Some(Projected {
            x: rel.dot(right) * scale,
            y: rel.dot(up) * scale,
            depth,
            scale,
        })
    }

    /// Ray from the eye through a screen-plane point
    pub fn ray_through(&self, x: f64, y: f64) -> Ray {
        let (forward, right, up) = self.basis();
        let t = self.tan_half_fov();
        Ray::new(self.eye(), forward + right * (x * t) + up * (y * t))
    }

    pub fn orbit(&mut self, d_yaw: f64, d_pitch: f64) {
        self.yaw = (self.yaw + d_yaw) % std::f64::consts::TAU;
        self.pitch = (self.pitch + d_pitch).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Scale the orbit distance; factors above 1 move away
    pub fn zoom(&mut self, factor: f64) {
        self.distance = (self.distance * factor).clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
