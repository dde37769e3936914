//! In-memory collaborators for driving a lesson without a renderer.
//!
//! Used by the tests and the walkthrough demo; also handy as a reference
//! when wiring the lesson into a real engine.

mod camera;
mod hud;
mod loader;
mod pointer;
mod scene;

pub use camera::{orbit_controller_factory, OrbitCameraController};
pub use hud::Overlay;
pub use loader::{timed_loader_factory, MeshPart, TimedLoader};
pub use pointer::PointerHub;
pub use scene::SceneGraph;
