//! Validation rules for machine configuration using Validation.

use crate::machine::StateMachine;
use crate::validation::violations::{ConfigViolation, ViolationPolicy};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::warn;

/// Type alias for custom validation check functions
pub type ValidationCheck =
    Box<dyn Fn(&StateMachine) -> Validation<(), NonEmptyVec<ConfigViolation>>>;

/// Validation rules for a machine's configuration.
/// Uses Validation to accumulate ALL violations.
///
/// The machine itself only discovers an unregistered transition target when
/// the transition fires. These rules let an owner inspect the whole
/// configuration up front without changing that runtime behavior.
pub struct ValidationRules {
    pub(crate) required_checks: Vec<ValidationCheck>,
    pub(crate) on_violation: ViolationPolicy,
}

impl ValidationRules {
    /// Validate the machine, accumulating ALL violations.
    /// Returns Validation::Success(()) if all checks pass.
    /// Returns Validation::Failure with ALL violations if any fail.
    pub fn validate(&self, machine: &StateMachine) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigViolation>>> = Vec::new();

        // Check entry state
        let entry_check = match machine.entry_state() {
            None => Validation::fail(ConfigViolation::MissingEntryState),
            Some(entry) if !machine.has_state(entry) => {
                Validation::fail(ConfigViolation::UnknownEntryState {
                    state: entry.to_string(),
                })
            }
            Some(_) => Validation::success(()),
        };
        checks.push(entry_check);

        // Check every route, in a stable order
        let mut routes: Vec<_> = machine.transitions().iter().collect();
        routes.sort_unstable();

        for (from, signal, target) in routes {
            if !machine.has_state(from) {
                checks.push(Validation::fail(ConfigViolation::UnknownSourceState {
                    from: from.to_string(),
                    signal: signal.to_string(),
                    target: target.to_string(),
                }));
            }
            if !machine.has_state(target) {
                checks.push(Validation::fail(ConfigViolation::UnknownTargetState {
                    from: from.to_string(),
                    signal: signal.to_string(),
                    target: target.to_string(),
                }));
            }
        }

        // Run custom checks
        for check_fn in &self.required_checks {
            checks.push(check_fn(machine));
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Validate and apply the violation policy.
    ///
    /// With [`ViolationPolicy::Reject`] every violation is returned. With
    /// [`ViolationPolicy::Warn`] each one is logged and the call succeeds.
    pub fn enforce(&self, machine: &StateMachine) -> Result<(), Vec<ConfigViolation>> {
        let violations: Vec<ConfigViolation> = match self.validate(machine) {
            Validation::Success(_) => return Ok(()),
            Validation::Failure(errors) => errors.iter().cloned().collect(),
        };

        match self.on_violation {
            ViolationPolicy::Reject => Err(violations),
            ViolationPolicy::Warn => {
                for violation in &violations {
                    warn!(machine = %machine.name(), violation = %violation, "configuration violation");
                }
                Ok(())
            }
        }
    }

    pub fn violation_policy(&self) -> ViolationPolicy {
        self.on_violation
    }
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            required_checks: Vec::new(),
            on_violation: ViolationPolicy::Reject,
        }
    }
}

/// Validate `machine` with the structural checks only.
///
/// # Example
///
/// ```rust
/// use lesson_fsm::machine::StateMachine;
/// use lesson_fsm::validation::validate;
///
/// let mut machine = StateMachine::new("Empty");
/// machine.set_entry_state("Start");
///
/// assert!(validate(&machine).is_failure());
/// ```
pub fn validate(machine: &StateMachine) -> Validation<(), NonEmptyVec<ConfigViolation>> {
    ValidationRules::default().validate(machine)
}
