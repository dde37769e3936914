//! Signal-driven state machine and its fatal errors.

mod error;
mod machine;

pub use error::MachineError;
pub use machine::{StateMachine, DEFAULT_MAX_CHAINED_TRANSITIONS};
