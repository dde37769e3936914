//! Pointer input interface and its observer capability.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObserverId(pub u64);

/// Id of the scene object under the pointer, as reported by picking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Screen position in pixels
    pub position: Vec2,
    pub button: PointerButton,
}

impl PointerEvent {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            button: PointerButton::Primary,
        }
    }
}

/// Receives pointer notifications from [`PointerInput`].
pub trait PointerObserver {
    fn on_pointer_down(&self, event: &PointerEvent, hit: Option<ObjectId>);

    fn on_pointer_up(&self, _event: &PointerEvent) {}

    fn on_pointer_move(&self, _event: &PointerEvent) {}
}

/// Source of pointer notifications.
pub trait PointerInput {
    fn add_observer(&mut self, observer: Rc<dyn PointerObserver>) -> ObserverId;

    /// Returns `false` if `id` was not registered.
    fn remove_observer(&mut self, id: ObserverId) -> bool;

    fn observer_count(&self) -> usize;
}
