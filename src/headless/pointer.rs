use std::cell::RefCell;
use std::rc::Rc;

use crate::collaborators::{ObjectId, ObserverId, PointerEvent, PointerInput, PointerObserver};

/// Pointer input fed by the owner, fanning notifications out to observers.
///
/// Notifications go to the observers registered when the dispatch starts.
#[derive(Default)]
pub struct PointerHub {
    observers: Vec<(ObserverId, Rc<dyn PointerObserver>)>,
    next_id: u64,
}

impl PointerHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn press(&self, event: PointerEvent, hit: Option<ObjectId>) {
        for observer in self.snapshot() {
            observer.on_pointer_down(&event, hit);
        }
    }

    pub fn release(&self, event: PointerEvent) {
        for observer in self.snapshot() {
            observer.on_pointer_up(&event);
        }
    }

    pub fn move_to(&self, event: PointerEvent) {
        for observer in self.snapshot() {
            observer.on_pointer_move(&event);
        }
    }

    fn snapshot(&self) -> Vec<Rc<dyn PointerObserver>> {
        self.observers.iter().map(|(_, o)| Rc::clone(o)).collect()
    }
}

impl PointerInput for PointerHub {
    fn add_observer(&mut self, observer: Rc<dyn PointerObserver>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    fn remove_observer(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(registered, _)| *registered != id);
        self.observers.len() != before
    }

    fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct Counter {
        downs: Cell<u32>,
        ups: Cell<u32>,
        moves: Cell<u32>,
    }

    impl PointerObserver for Counter {
        fn on_pointer_down(&self, _event: &PointerEvent, _hit: Option<ObjectId>) {
            self.downs.set(self.downs.get() + 1);
        }

        fn on_pointer_up(&self, _event: &PointerEvent) {
            self.ups.set(self.ups.get() + 1);
        }

        fn on_pointer_move(&self, _event: &PointerEvent) {
            self.moves.set(self.moves.get() + 1);
        }
    }

    #[test]
    fn notifications_reach_registered_observers() {
        let mut hub = PointerHub::new();
        let counter = Rc::new(Counter::default());
        hub.add_observer(counter.clone());

        hub.press(PointerEvent::at(10.0, 20.0), Some(ObjectId(7)));
        hub.release(PointerEvent::at(10.0, 20.0));
        hub.move_to(PointerEvent::at(11.0, 20.0));

        assert_eq!(counter.downs.get(), 1);
        assert_eq!(counter.ups.get(), 1);
        assert_eq!(counter.moves.get(), 1);
    }

    #[test]
    fn removed_observers_stop_receiving() {
        let mut hub = PointerHub::new();
        let counter = Rc::new(Counter::default());
        let id = hub.add_observer(counter.clone());

        assert!(hub.remove_observer(id));
        assert!(!hub.remove_observer(id));
        hub.press(PointerEvent::at(0.0, 0.0), None);

        assert_eq!(counter.downs.get(), 0);
        assert_eq!(hub.observer_count(), 0);
    }
}
