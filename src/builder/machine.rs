//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::core::{State, TransitionTable};
use crate::machine::StateMachine;

/// Builder for constructing state machines with a fluent API.
///
/// Equivalent to calling the registration methods on
/// [`StateMachine`] directly, with the entry state required up front. As
/// with the direct API, last registration wins and the entry state is only
/// checked against the registered states when the machine starts.
///
/// # Example
///
/// ```rust
/// use lesson_fsm::builder::MachineBuilder;
/// use lesson_fsm::core::{SignalEmitter, State};
///
/// struct Idle;
///
/// impl State for Idle {
///     fn enter(&mut self, _signals: SignalEmitter) {}
///     fn exit(&mut self) {}
///     fn update(&mut self, _delta_ms: f64) {}
/// }
///
/// let machine = MachineBuilder::new("Demo")
///     .state("Idle", Idle)
///     .transition("Idle", "wake", "Busy")
///     .entry("Idle")
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.entry_state(), Some("Idle"));
/// ```
pub struct MachineBuilder {
    name: String,
    states: Vec<(String, Box<dyn State>)>,
    transitions: TransitionTable,
    entry: Option<String>,
    max_chained_transitions: Option<usize>,
}

impl MachineBuilder {
    /// Create a new builder for a machine called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            states: Vec::new(),
            transitions: TransitionTable::new(),
            entry: None,
            max_chained_transitions: None,
        }
    }

    /// Register a state.
    pub fn state(mut self, name: impl Into<String>, state: impl State + 'static) -> Self {
        let state: Box<dyn State> = Box::new(state);
        self.states.push((name.into(), state));
        self
    }

    /// Register a single transition.
    pub fn transition(
        mut self,
        source: impl Into<String>,
        signal: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        self.transitions.add(source, signal, target);
        self
    }

    /// Merge a whole table, e.g. one built with [`transition_table!`](crate::transition_table).
    pub fn transitions(mut self, table: TransitionTable) -> Self {
        self.transitions.extend(table);
        self
    }

    /// Set the entry state (required).
    pub fn entry(mut self, name: impl Into<String>) -> Self {
        self.entry = Some(name.into());
        self
    }

    /// Override the chained transition limit.
    pub fn max_chained_transitions(mut self, limit: usize) -> Self {
        self.max_chained_transitions = Some(limit);
        self
    }

    /// Build the state machine.
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<StateMachine, BuildError> {
        let entry = self.entry.ok_or(BuildError::MissingEntryState)?;

        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        let mut machine = StateMachine::new(self.name);
        if let Some(limit) = self.max_chained_transitions {
            if limit == 0 {
                return Err(BuildError::ZeroTransitionLimit);
            }
            machine.set_max_chained_transitions(limit);
        }

        for (name, state) in self.states {
            machine.add_state(name, state);
        }
        machine.add_transitions(self.transitions);
        machine.set_entry_state(entry);

        Ok(machine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SignalEmitter;
    use crate::transition_table;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Counter {
        entered: Rc<Cell<u32>>,
    }

    impl State for Counter {
        fn enter(&mut self, _signals: SignalEmitter) {
            self.entered.set(self.entered.get() + 1);
        }
        fn exit(&mut self) {}
        fn update(&mut self, _delta_ms: f64) {}
    }

    fn counter() -> (Counter, Rc<Cell<u32>>) {
        let entered = Rc::new(Cell::new(0));
        (
            Counter {
                entered: Rc::clone(&entered),
            },
            entered,
        )
    }

    #[test]
    fn builder_requires_entry_state() {
        let (state, _) = counter();
        let result = MachineBuilder::new("Test").state("A", state).build();

        assert!(matches!(result, Err(BuildError::MissingEntryState)));
    }

    #[test]
    fn builder_requires_states() {
        let result = MachineBuilder::new("Test").entry("A").build();

        assert!(matches!(result, Err(BuildError::NoStates)));
    }

    #[test]
    fn builder_rejects_zero_transition_limit() {
        let (state, _) = counter();
        let result = MachineBuilder::new("Test")
            .state("A", state)
            .entry("A")
            .max_chained_transitions(0)
            .build();

        assert!(matches!(result, Err(BuildError::ZeroTransitionLimit)));
    }

    #[test]
    fn fluent_api_builds_machine() {
        let (a, a_entered) = counter();
        let (b, b_entered) = counter();

        let mut machine = MachineBuilder::new("Test")
            .state("A", a)
            .state("B", b)
            .transition("A", "next", "B")
            .entry("A")
            .max_chained_transitions(4)
            .build()
            .unwrap();

        assert_eq!(machine.name(), "Test");
        assert_eq!(machine.max_chained_transitions(), 4);

        machine.start().unwrap();
        machine.fire_signal("next").unwrap();

        assert_eq!(a_entered.get(), 1);
        assert_eq!(b_entered.get(), 1);
        assert_eq!(machine.active_state(), Some("B"));
    }

    #[test]
    fn later_state_registration_wins() {
        let (first, first_entered) = counter();
        let (second, second_entered) = counter();

        let mut machine = MachineBuilder::new("Test")
            .state("A", first)
            .state("A", second)
            .entry("A")
            .build()
            .unwrap();

        machine.start().unwrap();

        assert_eq!(first_entered.get(), 0);
        assert_eq!(second_entered.get(), 1);
    }

    #[test]
    fn table_and_single_transitions_merge() {
        let (a, _) = counter();
        let machine = MachineBuilder::new("Test")
            .state("A", a)
            .transitions(transition_table! {
                "A" => { "next" => "B", "exitReq" => "Clean" },
            })
            .transition("A", "next", "C")
            .entry("A")
            .build()
            .unwrap();

        assert_eq!(machine.transitions().resolve("A", "next"), Some("C"));
        assert_eq!(machine.transitions().resolve("A", "exitReq"), Some("Clean"));
    }
}
