//! Interfaces of the external collaborators the lesson states drive.
//!
//! The rendering context owns the scene, the HUD and pointer input; the
//! lesson only sees them through these traits. Observer capabilities
//! ([`LoadObserver`], [`PointerObserver`]) are how asynchronous
//! notifications reach a state. See [`headless`](crate::headless) for
//! in-memory implementations.

mod camera;
mod hud;
mod loader;
mod pointer;
mod scene;

use std::cell::RefCell;
use std::rc::Rc;

pub use camera::{Camera, CameraController};
pub use hud::{DrawRect, Hud, HudRectangle, WidgetId};
pub use loader::{AssetLoader, LoadObserver, LoaderFactory, LoaderId};
pub use pointer::{
    ObjectId, ObserverId, PointerButton, PointerEvent, PointerInput, PointerObserver,
};
pub use scene::{Light, Material, MaterialId, NodeId, Resources, Scene, SceneNode};

pub type SharedScene = Rc<RefCell<dyn Scene>>;
pub type SharedHud = Rc<RefCell<dyn Hud>>;
pub type SharedPointerInput = Rc<RefCell<dyn PointerInput>>;

/// Creates a fresh camera controller.
pub type CameraControllerFactory = Rc<dyn Fn() -> Box<dyn CameraController>>;

/// Skeletal animation player shared across lesson states.
pub trait ArmatureAnimator {
    fn update(&mut self, delta_ms: f64);
}

pub type SharedAnimator = Rc<RefCell<dyn ArmatureAnimator>>;
