//! Core building blocks of the state machine.
//!
//! This module contains the pieces a machine is assembled from:
//! - The `State` trait implemented by every sequenced unit
//! - The transition table that routes signals
//! - The revocable signal emitter injected into active states
//! - The transition log

mod history;
mod router;
pub(crate) mod signal;
mod state;

pub use history::{TransitionLog, TransitionRecord};
pub use router::TransitionTable;
pub use signal::SignalEmitter;
pub use state::State;
