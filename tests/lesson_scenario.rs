//! End-to-end runs of the Pen lesson against the headless collaborators.

use std::cell::RefCell;
use std::rc::Rc;

use lesson_fsm::collaborators::{
    AssetLoader, Hud, LoadObserver, LoaderFactory, LoaderId, NodeId, PointerEvent, PointerInput,
    Scene, SharedScene,
};
use lesson_fsm::core::{SignalEmitter, State};
use lesson_fsm::headless::{
    orbit_controller_factory, timed_loader_factory, MeshPart, Overlay, PointerHub, SceneGraph,
};
use lesson_fsm::lesson::{
    create_lesson, LessonConfig, LessonContext, CLEAN, CLEAN_COMPLETE, EXIT_REQ, EXPLORE, LOAD,
    START_ASM,
};
use lesson_fsm::machine::{MachineError, StateMachine};

type ObserverSlot = Rc<RefCell<Option<Rc<dyn LoadObserver>>>>;

/// Loader that never progresses on its own; the test drives its observer.
struct ManualLoader {
    observer: ObserverSlot,
    request: Rc<RefCell<Option<String>>>,
}

impl AssetLoader for ManualLoader {
    fn id(&self) -> LoaderId {
        LoaderId(42)
    }

    fn set_observer(&mut self, observer: Rc<dyn LoadObserver>) {
        *self.observer.borrow_mut() = Some(observer);
    }

    fn clear_observer(&mut self) {
        *self.observer.borrow_mut() = None;
    }

    fn enable_auto_merge_by_material(&mut self) {}

    fn load_obj(&mut self, directory: &str, file: &str) {
        *self.request.borrow_mut() = Some(format!("{directory}{file}"));
    }

    fn update(&mut self, _delta_ms: f64) {}

    fn total_progress(&self) -> f32 {
        0.0
    }
}

struct Harness {
    scene: Rc<RefCell<SceneGraph>>,
    hud: Rc<RefCell<Overlay>>,
    pointer: Rc<RefCell<PointerHub>>,
    observer: ObserverSlot,
    request: Rc<RefCell<Option<String>>>,
    lesson: StateMachine,
}

impl Harness {
    fn new() -> Self {
        let scene = SceneGraph::shared();
        let hud = Overlay::shared();
        let pointer = PointerHub::shared();
        let observer: ObserverSlot = Rc::default();
        let request = Rc::new(RefCell::new(None));

        let slot = Rc::clone(&observer);
        let requested = Rc::clone(&request);
        let loaders: LoaderFactory = Rc::new(move |_scene: SharedScene, _container: NodeId| {
            let loader: Box<dyn AssetLoader> = Box::new(ManualLoader {
                observer: Rc::clone(&slot),
                request: Rc::clone(&requested),
            });
            loader
        });

        let context = LessonContext::new(
            scene.clone(),
            hud.clone(),
            pointer.clone(),
            loaders,
            orbit_controller_factory(30.0),
        );
        let lesson = create_lesson(context, LessonConfig::default()).unwrap();

        Self {
            scene,
            hud,
            pointer,
            observer,
            request,
            lesson,
        }
    }

    fn load_observer(&self) -> Rc<dyn LoadObserver> {
        self.observer.borrow().clone().unwrap()
    }

    fn finish_loading(&mut self) {
        let observer = self.load_observer();
        observer.on_load_progress(LoaderId(42), 1.0);
        observer.on_load_completed(LoaderId(42));
        self.lesson.process_signals().unwrap();
    }

    fn furnish(&self) {
        let mut scene = self.scene.borrow_mut();
        let wood = scene.add_material(lesson_fsm::collaborators::Material::new("wood"));
        let office = scene.find_child("officeGroup").unwrap();
        scene
            .child_mut(office)
            .unwrap()
            .add_child(lesson_fsm::collaborators::SceneNode::mesh("desk", wood));
    }
}

#[test]
fn full_lesson_walkthrough() {
    let mut h = Harness::new();

    h.lesson.start().unwrap();
    assert_eq!(h.lesson.active_state(), Some(LOAD));
    assert_eq!(h.hud.borrow().len(), 4);
    assert!(!h.scene.borrow().is_visible());
    assert_eq!(
        h.request.borrow().as_deref(),
        Some("assets/3d/apartment/a1/sheldon.obj")
    );

    h.load_observer().on_load_progress(LoaderId(42), 0.5);
    {
        let hud = h.hud.borrow();
        let fill = *hud.widgets().last().unwrap();
        assert!((hud.widget(fill).unwrap().draw_rect().width() - 0.35).abs() < 1e-6);
    }

    h.furnish();
    h.finish_loading();
    assert_eq!(h.lesson.active_state(), Some(EXPLORE));
    assert!(h.observer.borrow().is_none());
    assert!(h.hud.borrow().is_empty());
    assert!(h.scene.borrow().is_visible());
    assert_eq!(h.scene.borrow().light_count(), 6);
    assert_eq!(h.pointer.borrow().observer_count(), 1);

    h.lesson.update(500.0).unwrap();
    let eye = h.scene.borrow().camera().eye;
    assert_ne!(eye, LessonConfig::default().camera.eye);

    h.pointer.borrow().press(PointerEvent::at(320.0, 240.0), None);
    h.lesson.process_signals().unwrap();
    assert_eq!(h.lesson.active_state(), Some(CLEAN));
    assert_eq!(h.pointer.borrow().observer_count(), 0);
    {
        let scene = h.scene.borrow();
        assert!(scene.children().is_empty());
        assert_eq!(scene.light_count(), 0);
        assert!(scene.materials().is_empty());
    }

    h.lesson.update(16.0).unwrap();
    h.lesson.update(16.0).unwrap();
    assert_eq!(h.lesson.active_state(), Some(CLEAN));
    assert!(!h.lesson.is_halted());

    assert_eq!(h.lesson.history().path(), vec![LOAD, EXPLORE, CLEAN]);
}

#[test]
fn completion_between_ticks_is_resolved_on_next_update() {
    let mut h = Harness::new();
    h.lesson.update(16.0).unwrap();

    h.load_observer().on_load_completed(LoaderId(42));
    assert_eq!(h.lesson.active_state(), Some(LOAD));
    assert_eq!(h.lesson.pending_signals(), 1);

    h.lesson.update(16.0).unwrap();
    assert_eq!(h.lesson.active_state(), Some(EXPLORE));
}

#[test]
fn stalled_load_can_be_abandoned() {
    let mut h = Harness::new();
    for _ in 0..100 {
        h.lesson.update(16.0).unwrap();
    }
    assert_eq!(h.lesson.active_state(), Some(LOAD));

    let stale = h.load_observer();
    h.lesson.fire_signal(EXIT_REQ).unwrap();
    assert_eq!(h.lesson.active_state(), Some(CLEAN));

    // A late completion from the abandoned load goes nowhere.
    stale.on_load_completed(LoaderId(42));
    h.lesson.process_signals().unwrap();
    assert_eq!(h.lesson.active_state(), Some(CLEAN));
    assert_eq!(h.lesson.history().len(), 1);
}

#[test]
fn pointer_after_explore_is_ignored() {
    let mut h = Harness::new();
    h.lesson.start().unwrap();
    h.finish_loading();
    h.lesson.fire_signal(EXIT_REQ).unwrap();
    assert_eq!(h.lesson.active_state(), Some(CLEAN));

    h.pointer.borrow().press(PointerEvent::at(0.0, 0.0), None);
    h.lesson.process_signals().unwrap();

    assert_eq!(h.lesson.active_state(), Some(CLEAN));
    assert_eq!(h.lesson.pending_signals(), 0);
}

#[test]
fn starting_assembly_without_a_registered_state_halts() {
    let mut h = Harness::new();
    h.lesson.start().unwrap();
    h.finish_loading();

    let err = h.lesson.fire_signal(START_ASM).unwrap_err();
    assert_eq!(
        err,
        MachineError::UnknownTargetState {
            machine: "Pen".to_string(),
            from: EXPLORE.to_string(),
            signal: START_ASM.to_string(),
            target: "Asm".to_string(),
        }
    );
    assert!(h.lesson.is_halted());
    assert!(matches!(
        h.lesson.update(16.0),
        Err(MachineError::Halted { .. })
    ));
}

#[test]
fn registering_assembly_later_completes_the_route() {
    struct Assembly;

    impl State for Assembly {
        fn enter(&mut self, _signals: SignalEmitter) {}
        fn exit(&mut self) {}
        fn update(&mut self, _delta_ms: f64) {}
    }

    let mut h = Harness::new();
    h.lesson.add_state("Asm", Assembly);
    h.lesson.start().unwrap();
    h.finish_loading();

    h.lesson.fire_signal(START_ASM).unwrap();

    assert_eq!(h.lesson.active_state(), Some("Asm"));
    assert_eq!(h.pointer.borrow().observer_count(), 0);
}

#[test]
fn lesson_nests_inside_an_outer_machine() {
    #[derive(Default)]
    struct Done {
        entered: Rc<RefCell<bool>>,
    }

    impl State for Done {
        fn enter(&mut self, _signals: SignalEmitter) {
            *self.entered.borrow_mut() = true;
        }
        fn exit(&mut self) {}
        fn update(&mut self, _delta_ms: f64) {}
    }

    let scene = SceneGraph::shared();
    let pointer = PointerHub::shared();
    let context = LessonContext::new(
        scene.clone(),
        Overlay::shared(),
        pointer.clone(),
        timed_loader_factory(vec![MeshPart::new("desk", "wood")], 0.0),
        orbit_controller_factory(0.0),
    );
    let lesson = create_lesson(context, LessonConfig::default()).unwrap();

    let done = Done::default();
    let entered = Rc::clone(&done.entered);
    let mut app = StateMachine::new("App");
    app.add_state("Lesson", lesson);
    app.add_state("Done", done);
    app.add_transition("Lesson", CLEAN_COMPLETE, "Done");
    app.set_entry_state("Lesson");

    app.update(16.0).unwrap();
    assert_eq!(app.active_state(), Some("Lesson"));
    assert_eq!(pointer.borrow().observer_count(), 1);

    pointer.borrow().press(PointerEvent::at(1.0, 1.0), None);
    app.update(16.0).unwrap();

    assert_eq!(app.active_state(), Some("Done"));
    assert!(*entered.borrow());
    assert!(scene.borrow().children().is_empty());
    assert_eq!(pointer.borrow().observer_count(), 0);
}

#[test]
fn unreachable_threshold_is_left_through_exit() {
    let scene = SceneGraph::shared();
    let context = LessonContext::new(
        scene.clone(),
        Overlay::shared(),
        PointerHub::shared(),
        timed_loader_factory(vec![MeshPart::new("desk", "wood")], 100.0),
        orbit_controller_factory(0.0),
    );
    let config = LessonConfig {
        completion_threshold: 2,
        ..LessonConfig::default()
    };
    let mut lesson = create_lesson(context, config).unwrap();

    let budget = 60;
    let mut frame = 0;
    while lesson.active_state() != Some(EXPLORE) && frame < budget {
        lesson.update(16.0).unwrap();
        frame += 1;
    }
    assert_eq!(frame, budget);
    assert_eq!(lesson.active_state(), Some(LOAD));

    lesson.fire_signal(EXIT_REQ).unwrap();
    assert_eq!(lesson.active_state(), Some(CLEAN));
    assert!(scene.borrow().children().is_empty());
}
