use glam::{Quat, Vec3};

use crate::collaborators::{CameraController, CameraControllerFactory, SharedScene};

const ZOOM_BASE: f32 = 1.3;

/// Orbits the scene camera around a pivot, optionally spinning on its own.
pub struct OrbitCameraController {
    pub pivot: Vec3,
    pub pitch: f32,
    pub yaw: f32,
    pub step: f32,
    /// Yaw speed in degrees per second.
    pub spin: f32,
    scene: Option<SharedScene>,
}

impl OrbitCameraController {
    pub fn new() -> Self {
        Self {
            pivot: Vec3::ZERO,
            pitch: 0.0,
            yaw: 0.0,
            step: 10.0,
            spin: 0.0,
            scene: None,
        }
    }

    pub fn with_spin(mut self, degrees_per_second: f32) -> Self {
        self.spin = degrees_per_second;
        self
    }

    pub fn distance(&self) -> f32 {
        ZOOM_BASE.powf(self.step)
    }

    pub fn eye(&self) -> Vec3 {
        let rotation_x = Quat::from_rotation_x(self.pitch.to_radians());
        let rotation_y = Quat::from_rotation_y(-self.yaw.to_radians());

        (rotation_y * rotation_x).mul_vec3(Vec3::NEG_Z * self.distance()) + self.pivot
    }

    pub fn rotate_by(&mut self, delta_pitch: f32, delta_yaw: f32) {
        self.pitch = (self.pitch + delta_pitch).clamp(-89.0, 89.0);
        self.yaw += delta_yaw;
    }

    pub fn move_by(&mut self, delta_step: f32) {
        self.step += delta_step;
    }

    /// Adopt the pose the camera already has.
    fn orbit_from(&mut self, eye: Vec3, look_at: Vec3) {
        let offset = eye - look_at;
        let distance = offset.length();
        self.pivot = look_at;
        if distance <= f32::EPSILON {
            return;
        }

        self.step = distance.ln() / ZOOM_BASE.ln();
        self.pitch = (offset.y / distance).clamp(-1.0, 1.0).asin().to_degrees();
        self.yaw = offset.x.atan2(-offset.z).to_degrees();
    }

    fn apply(&self) {
        if let Some(scene) = &self.scene {
            let eye = self.eye();
            let mut scene = scene.borrow_mut();
            let camera = scene.camera_mut();
            camera.set_eye(eye);
            camera.set_look_at(self.pivot);
        }
    }
}

impl Default for OrbitCameraController {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraController for OrbitCameraController {
    fn bind_camera(&mut self, scene: SharedScene) {
        let (eye, look_at) = {
            let scene = scene.borrow();
            (scene.camera().eye, scene.camera().look_at)
        };
        self.orbit_from(eye, look_at);
        self.scene = Some(scene);
    }

    fn unbind(&mut self) {
        self.scene = None;
    }

    fn is_bound(&self) -> bool {
        self.scene.is_some()
    }

    fn update(&mut self, delta_ms: f64) {
        if self.scene.is_none() {
            return;
        }
        self.yaw += self.spin * (delta_ms / 1000.0) as f32;
        self.apply();
    }
}

/// Factory producing orbit controllers that spin at `degrees_per_second`.
pub fn orbit_controller_factory(degrees_per_second: f32) -> CameraControllerFactory {
    std::rc::Rc::new(move || {
        let controller: Box<dyn CameraController> =
            Box::new(OrbitCameraController::new().with_spin(degrees_per_second));
        controller
    })
}
