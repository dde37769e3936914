//! Builder API for creating validation rules.

use crate::machine::StateMachine;
use crate::validation::rules::{ValidationCheck, ValidationRules};
use crate::validation::violations::{ConfigViolation, ViolationPolicy};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for creating validation rules
pub struct ValidationBuilder {
    required_checks: Vec<ValidationCheck>,
    on_violation: ViolationPolicy,
}

impl ValidationBuilder {
    pub fn new() -> Self {
        Self {
            required_checks: Vec::new(),
            on_violation: ViolationPolicy::Reject,
        }
    }

    /// Add a custom validation check
    pub fn require<F>(mut self, check: F) -> Self
    where
        F: Fn(&StateMachine) -> Validation<(), NonEmptyVec<ConfigViolation>> + 'static,
    {
        self.required_checks.push(Box::new(check));
        self
    }

    /// Add a simple predicate check with error message
    pub fn require_pred<F>(mut self, predicate: F, error_msg: String) -> Self
    where
        F: Fn(&StateMachine) -> bool + 'static,
    {
        let check = move |machine: &StateMachine| {
            if predicate(machine) {
                Validation::success(())
            } else {
                Validation::fail(ConfigViolation::CustomCheckFailed {
                    message: error_msg.clone(),
                })
            }
        };
        self.required_checks.push(Box::new(check));
        self
    }

    /// Set violation handling policy
    pub fn on_violation(mut self, policy: ViolationPolicy) -> Self {
        self.on_violation = policy;
        self
    }

    /// Build the validation rules
    pub fn build(self) -> ValidationRules {
        ValidationRules {
            required_checks: self.required_checks,
            on_violation: self.on_violation,
        }
    }
}

impl Default for ValidationBuilder {
    fn default() -> Self {
        Self::new()
    }
}
