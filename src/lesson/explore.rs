//! Explore phase: free camera until the user clicks.

use std::rc::Rc;

use tracing::debug;

use crate::collaborators::{CameraController, ObjectId, ObserverId, PointerEvent, PointerObserver};
use crate::core::{SignalEmitter, State};
use crate::lesson::data::OperatingData;
use crate::lesson::EXIT_REQ;

struct ExitOnPointerDown {
    signals: SignalEmitter,
}

impl PointerObserver for ExitOnPointerDown {
    fn on_pointer_down(&self, _event: &PointerEvent, _hit: Option<ObjectId>) {
        self.signals.fire(EXIT_REQ);
    }
}

/// Lets the user orbit the model; any pointer press requests exit.
pub struct ExploreState {
    data: Rc<OperatingData>,
    controller: Option<Box<dyn CameraController>>,
    observer: Option<ObserverId>,
}

impl ExploreState {
    pub fn new(data: Rc<OperatingData>) -> Self {
        Self {
            data,
            controller: None,
            observer: None,
        }
    }

    pub fn has_controller(&self) -> bool {
        self.controller.is_some()
    }
}

impl State for ExploreState {
    fn enter(&mut self, signals: SignalEmitter) {
        let context = self.data.context();

        let mut controller = (context.cameras)();
        controller.bind_camera(Rc::clone(&context.scene));
        self.controller = Some(controller);

        let observer = Rc::new(ExitOnPointerDown { signals });
        self.observer = Some(context.pointer.borrow_mut().add_observer(observer));
        debug!(lesson = %self.data.id(), "Exploring");
    }

    fn exit(&mut self) {
        if let Some(mut controller) = self.controller.take() {
            controller.unbind();
        }
        if let Some(id) = self.observer.take() {
            self.data.context().pointer.borrow_mut().remove_observer(id);
        }
    }

    fn update(&mut self, delta_ms: f64) {
        if let Some(controller) = self.controller.as_mut() {
            controller.update(delta_ms);
        }
    }

    fn signals(&self) -> Vec<&str> {
        vec![EXIT_REQ]
    }
}
