//! Camera and camera-controller interfaces.

use glam::{vec3, Vec3};
use serde::{Deserialize, Serialize};

use super::SharedScene;

/// Look-at camera stored by the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub eye: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            eye: vec3(0.0, 0.0, 1.0),
            look_at: Vec3::ZERO,
            up: Vec3::Y,
        }
    }

    pub fn set_eye(&mut self, eye: Vec3) {
        self.eye = eye;
    }

    pub fn set_look_at(&mut self, look_at: Vec3) {
        self.look_at = look_at;
    }

    pub fn set_up(&mut self, up: Vec3) {
        self.up = up;
    }

    /// Unit vector from the eye towards the look-at point.
    pub fn forward(&self) -> Vec3 {
        (self.look_at - self.eye).normalize_or_zero()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives the scene camera from user input or animation.
pub trait CameraController {
    /// Start controlling the camera of `scene`.
    fn bind_camera(&mut self, scene: SharedScene);

    /// Stop touching the camera.
    fn unbind(&mut self);

    fn is_bound(&self) -> bool;

    /// Advance by `delta_ms` milliseconds.
    fn update(&mut self, delta_ms: f64);
}
