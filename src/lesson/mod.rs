//! The "Pen" lesson: load a model, let the user explore it, clean up.
//!
//! [`create_lesson`] wires the three states into a [`StateMachine`]:
//!
//! ```text
//! Load --loadComplete--> Explore --exitReq--> Clean
//!   \---------------exitReq---------------/
//! Explore --startAsm--> Asm
//! ```
//!
//! `Asm` is never registered here. An owner that nests an assembly phase
//! registers it before the transition fires; otherwise firing `startAsm`
//! halts the machine with [`MachineError::UnknownTargetState`].
//!
//! [`MachineError::UnknownTargetState`]: crate::machine::MachineError::UnknownTargetState

mod clean;
mod config;
mod context;
mod data;
mod explore;
mod load;

use std::rc::Rc;

use thiserror::Error;
use tracing::debug;

use crate::builder::{BuildError, MachineBuilder};
use crate::machine::StateMachine;
use crate::transition_table;
use crate::validation::{ConfigViolation, ValidationBuilder, ViolationPolicy};

pub use clean::CleanState;
pub use config::{CameraPose, ConfigError, LessonConfig, ProgressBarConfig, WidgetStyle};
pub use context::LessonContext;
pub use data::OperatingData;
pub use explore::ExploreState;
pub use load::LoadState;

pub const LOAD: &str = "Load";
pub const EXPLORE: &str = "Explore";
pub const CLEAN: &str = "Clean";
pub const ASM: &str = "Asm";

pub const LOAD_COMPLETE: &str = "loadComplete";
pub const EXIT_REQ: &str = "exitReq";
pub const START_ASM: &str = "startAsm";
pub const CLEAN_COMPLETE: &str = "cleanComplete";

#[derive(Debug, Error)]
pub enum LessonError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("lesson configuration rejected with {} violation(s)", .violations.len())]
    Rejected { violations: Vec<ConfigViolation> },
}

/// Build the lesson machine. It is returned unstarted, with `Load` as entry.
///
/// The configuration is validated first. Structural findings about the
/// machine (such as the unregistered `Asm` target) are logged as warnings.
pub fn create_lesson(
    context: LessonContext,
    config: LessonConfig,
) -> Result<StateMachine, LessonError> {
    config.validate()?;

    let name = config.machine_name.clone();
    let limit = config.max_chained_transitions;
    let data = OperatingData::new(context, config);
    debug!(lesson = %data.id(), machine = %name, "Creating lesson");

    let machine = MachineBuilder::new(name)
        .state(LOAD, LoadState::new(Rc::clone(&data)))
        .state(EXPLORE, ExploreState::new(Rc::clone(&data)))
        .state(CLEAN, CleanState::new(Rc::clone(&data)))
        .transitions(transition_table! {
            LOAD => {
                LOAD_COMPLETE => EXPLORE,
                EXIT_REQ => CLEAN,
            },
            EXPLORE => {
                START_ASM => ASM,
                EXIT_REQ => CLEAN,
            },
        })
        .entry(LOAD)
        .max_chained_transitions(limit)
        .build()?;

    ValidationBuilder::new()
        .on_violation(ViolationPolicy::Warn)
        .build()
        .enforce(&machine)
        .map_err(|violations| LessonError::Rejected { violations })?;

    Ok(machine)
}
