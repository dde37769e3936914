//! Build errors for the machine builder.

use thiserror::Error;

/// Errors that can occur when building a state machine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Entry state not specified. Call .entry(name) before .build()")]
    MissingEntryState,

    #[error("No states registered. Add at least one state")]
    NoStates,

    #[error("Chained transition limit must be at least 1")]
    ZeroTransitionLimit,
}
