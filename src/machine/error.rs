//! Fatal machine errors.

use thiserror::Error;

/// Errors that stop a machine.
///
/// Every variant is fatal: once one has been returned the machine halts and
/// all later calls fail with [`MachineError::Halted`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MachineError {
    #[error("machine '{machine}' has no entry state. Call set_entry_state() before start()")]
    EntryStateNotSet { machine: String },

    #[error("machine '{machine}' entry state '{state}' is not registered")]
    UnknownEntryState { machine: String, state: String },

    #[error(
        "machine '{machine}' transition '{from}' --{signal}--> '{target}' targets an unregistered state"
    )]
    UnknownTargetState {
        machine: String,
        from: String,
        signal: String,
        target: String,
    },

    #[error("machine '{machine}' exceeded {limit} chained transitions in a single dispatch")]
    TransitionLimitExceeded { machine: String, limit: usize },

    #[error("machine '{machine}' halted after a fatal error")]
    Halted { machine: String },
}
