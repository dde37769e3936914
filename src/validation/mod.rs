//! Validation of machine configuration.
//!
//! This module checks a machine's configuration using Stillwater's
//! `Validation` type to accumulate ALL violations instead of stopping at the
//! first one: unset or unregistered entry state, transitions leaving
//! unregistered states, transitions targeting unregistered states, plus any
//! custom checks.
//!
//! Validation is advisory. A machine that fails it can still be started;
//! an unregistered transition target stays a fatal error only when that
//! transition fires.
//!
//! # Example
//!
//! ```rust
//! use lesson_fsm::machine::StateMachine;
//! use lesson_fsm::validation::{ValidationBuilder, ViolationPolicy};
//!
//! let mut machine = StateMachine::new("Pen");
//! machine.set_entry_state("Load");
//!
//! let rules = ValidationBuilder::new()
//!     .on_violation(ViolationPolicy::Reject)
//!     .build();
//!
//! let violations = rules.enforce(&machine).unwrap_err();
//! assert_eq!(violations.len(), 1);
//! ```

pub mod builder;
pub mod rules;
pub mod violations;

// Re-export commonly used types
pub use builder::ValidationBuilder;
pub use rules::{validate, ValidationRules};
pub use violations::{ConfigViolation, ViolationPolicy};
