//! Clean phase: empties the scene.

use std::rc::Rc;

use tracing::{debug, warn};

use crate::collaborators::Scene;
use crate::core::{SignalEmitter, State};
use crate::lesson::data::OperatingData;
use crate::lesson::CLEAN_COMPLETE;

/// Tears the scene down on entry, then reports `cleanComplete` every tick.
pub struct CleanState {
    data: Rc<OperatingData>,
    signals: SignalEmitter,
}

impl CleanState {
    pub fn new(data: Rc<OperatingData>) -> Self {
        Self {
            data,
            signals: SignalEmitter::detached(),
        }
    }
}

/// Release and detach every child, light and material of `scene`.
///
/// Each removal re-reads the scene, so a scene that reorders itself on
/// removal is still emptied. A scene refusing a removal ends that loop.
pub(crate) fn clear_scene(scene: &mut dyn Scene) -> (usize, usize, usize) {
    let mut children = 0;
    while let Some(&head) = scene.children().first() {
        if let Some(node) = scene.child_mut(head) {
            node.release_resources();
        }
        if scene.remove_child(head).is_none() {
            warn!(node = head.0, "Scene refused to detach child");
            break;
        }
        children += 1;
    }

    let mut lights = 0;
    while scene.remove_light(0).is_some() {
        lights += 1;
    }

    let mut materials = 0;
    while let Some(&head) = scene.materials().first() {
        if let Some(material) = scene.material_mut(head) {
            material.release_resources();
        }
        if scene.remove_material(head).is_none() {
            warn!(material = head.0, "Scene refused to detach material");
            break;
        }
        materials += 1;
    }

    (children, lights, materials)
}

impl State for CleanState {
    fn enter(&mut self, signals: SignalEmitter) {
        self.signals = signals;

        let scene = &self.data.context().scene;
        let (children, lights, materials) = clear_scene(&mut *scene.borrow_mut());
        debug!(
            lesson = %self.data.id(),
            children,
            lights,
            materials,
            "Scene cleared"
        );
    }

    fn exit(&mut self) {
        self.signals = SignalEmitter::detached();
    }

    fn update(&mut self, _delta_ms: f64) {
        self.signals.fire(CLEAN_COMPLETE);
    }

    fn signals(&self) -> Vec<&str> {
        vec![CLEAN_COMPLETE]
    }
}
