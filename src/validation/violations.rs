//! Configuration violations and handling policies.

use thiserror::Error;

/// Structural problems found in a machine's configuration
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("no entry state configured")]
    MissingEntryState,

    #[error("entry state '{state}' is not registered")]
    UnknownEntryState { state: String },

    #[error("transition '{from}' --{signal}--> '{target}' starts from an unregistered state")]
    UnknownSourceState {
        from: String,
        signal: String,
        target: String,
    },

    #[error("transition '{from}' --{signal}--> '{target}' targets an unregistered state")]
    UnknownTargetState {
        from: String,
        signal: String,
        target: String,
    },

    #[error("Custom check failed: {message}")]
    CustomCheckFailed { message: String },
}

/// What to do when validation finds violations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationPolicy {
    /// Return every violation as an error
    Reject,

    /// Log every violation as a warning and carry on
    Warn,
}
