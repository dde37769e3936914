//! lesson-fsm: signal-driven state machines for interactive 3D lessons
//!
//! A lesson is a sequence of phases (load the assets, let the user explore,
//! tear everything down) layered over a scene and HUD owned by a rendering
//! context. The crate is split into a reusable control core and the lesson
//! built on top of it.
//!
//! # Core Concepts
//!
//! - **State**: an opaque unit with `enter`/`exit`/`update`, see [`State`]
//! - **Signals**: payload-free names a state fires through the
//!   [`SignalEmitter`] it was handed on `enter`
//! - **Transitions**: `(state, signal) -> state` routes in a [`TransitionTable`]
//! - **Machine**: [`StateMachine`] owns the states, resolves signals and is
//!   itself a [`State`], so machines nest
//! - **Collaborators**: the scene, HUD, loaders and pointer input are only
//!   seen through the traits in [`collaborators`]; [`headless`] provides
//!   in-memory versions
//!
//! # Example
//!
//! ```rust
//! use lesson_fsm::headless::{
//!     orbit_controller_factory, timed_loader_factory, MeshPart, Overlay, PointerHub, SceneGraph,
//! };
//! use lesson_fsm::lesson::{create_lesson, LessonConfig, LessonContext};
//!
//! let context = LessonContext::new(
//!     SceneGraph::shared(),
//!     Overlay::shared(),
//!     PointerHub::shared(),
//!     timed_loader_factory(vec![MeshPart::new("desk", "wood")], 100.0),
//!     orbit_controller_factory(15.0),
//! );
//!
//! let mut lesson = create_lesson(context, LessonConfig::default()).unwrap();
//! lesson.update(16.0).unwrap();
//! assert_eq!(lesson.active_state(), Some("Load"));
//!
//! lesson.update(100.0).unwrap();
//! assert_eq!(lesson.active_state(), Some("Explore"));
//! ```

pub mod builder;
pub mod collaborators;
pub mod core;
pub mod headless;
pub mod lesson;
pub mod machine;
pub mod validation;

// Re-export commonly used types
pub use builder::{BuildError, MachineBuilder};
pub use crate::core::{SignalEmitter, State, TransitionLog, TransitionRecord, TransitionTable};
pub use lesson::{create_lesson, LessonConfig, LessonContext, LessonError};
pub use machine::{MachineError, StateMachine};
