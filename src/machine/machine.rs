//! Signal-driven state machine.

use crate::core::signal::SignalQueue;
use crate::core::{SignalEmitter, State, TransitionLog, TransitionRecord, TransitionTable};
use crate::machine::error::MachineError;
use chrono::Utc;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, error, trace};

/// Default cap on transitions resolved by a single dispatch.
pub const DEFAULT_MAX_CHAINED_TRANSITIONS: usize = 64;

/// Machine that sequences named [`State`]s through signal-driven transitions.
///
/// States and transitions are registered up front; [`start`](Self::start)
/// (or the first [`update`](Self::update)) enters the entry state. From then
/// on the active state fires signals through the [`SignalEmitter`] it was
/// given, and the machine resolves them against its [`TransitionTable`]:
///
/// 1. no route for `(active, signal)`: the signal is dropped
/// 2. route to a registered state: `exit` the active state, reassign,
///    `enter` the target
/// 3. route to an unregistered state: fatal [`MachineError::UnknownTargetState`]
///
/// Signals are queued and processed one after another, so a state firing
/// from inside its own `enter` never recurses into the machine. Signals
/// fired by a state that has since been exited are discarded.
///
/// The machine is itself a [`State`], so it can be registered inside
/// another machine. Signals it cannot resolve are passed up to the parent.
///
/// # Example
///
/// ```rust
/// use lesson_fsm::core::{SignalEmitter, State};
/// use lesson_fsm::machine::StateMachine;
///
/// #[derive(Default)]
/// struct Splash {
///     signals: SignalEmitter,
/// }
///
/// impl State for Splash {
///     fn enter(&mut self, signals: SignalEmitter) {
///         self.signals = signals;
///     }
///     fn exit(&mut self) {}
///     fn update(&mut self, _delta_ms: f64) {
///         self.signals.fire("skip");
///     }
/// }
///
/// struct Menu;
///
/// impl State for Menu {
///     fn enter(&mut self, _signals: SignalEmitter) {}
///     fn exit(&mut self) {}
///     fn update(&mut self, _delta_ms: f64) {}
/// }
///
/// let mut machine = StateMachine::new("Intro");
/// machine.add_state("Splash", Splash::default());
/// machine.add_state("Menu", Menu);
/// machine.add_transition("Splash", "skip", "Menu");
/// machine.set_entry_state("Splash");
///
/// machine.start().unwrap();
/// assert_eq!(machine.active_state(), Some("Splash"));
///
/// machine.update(16.0).unwrap();
/// assert_eq!(machine.active_state(), Some("Menu"));
/// ```
pub struct StateMachine {
    name: String,
    states: HashMap<String, Box<dyn State>>,
    transitions: TransitionTable,
    entry: Option<String>,
    active: Option<String>,
    queue: Rc<SignalQueue>,
    parent: Option<SignalEmitter>,
    history: TransitionLog,
    max_chained_transitions: usize,
    halted: bool,
}

impl StateMachine {
    /// Create an empty machine.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            states: HashMap::new(),
            transitions: TransitionTable::new(),
            entry: None,
            active: None,
            queue: SignalQueue::new(),
            parent: None,
            history: TransitionLog::new(),
            max_chained_transitions: DEFAULT_MAX_CHAINED_TRANSITIONS,
            halted: false,
        }
    }

    /// Register `state` under `name`.
    ///
    /// A state already registered under the same name is replaced and
    /// returned. Replacing the active state exits the old instance and
    /// enters the new one.
    pub fn add_state(
        &mut self,
        name: impl Into<String>,
        state: impl State + 'static,
    ) -> Option<Box<dyn State>> {
        let name = name.into();
        let replacing_active = self.active.as_deref() == Some(name.as_str());

        if replacing_active {
            self.deactivate();
        }

        let previous = self.states.insert(name.clone(), Box::new(state));

        if previous.is_some() {
            debug!(machine = %self.name, state = %name, "state registration replaced");
        }

        if replacing_active {
            self.activate(name);
        }

        previous
    }

    /// Record `source --signal--> target`, replacing any previous target.
    ///
    /// The target is not checked against the registered states until the
    /// transition actually fires.
    pub fn add_transition(
        &mut self,
        source: impl Into<String>,
        signal: impl Into<String>,
        target: impl Into<String>,
    ) -> Option<String> {
        self.transitions.add(source, signal, target)
    }

    /// Merge a whole table into the machine's transitions.
    pub fn add_transitions(&mut self, table: TransitionTable) {
        self.transitions.extend(table);
    }

    /// Name of the state entered by [`start`](Self::start). Not validated here.
    pub fn set_entry_state(&mut self, name: impl Into<String>) {
        self.entry = Some(name.into());
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Cap on transitions resolved by one dispatch before the machine halts.
    pub fn set_max_chained_transitions(&mut self, limit: usize) {
        self.max_chained_transitions = limit;
    }

    /// Enter the entry state.
    ///
    /// If a state is already active it is exited first, so calling `start`
    /// again restarts the machine. Fails if the entry state is unset or
    /// unregistered; both are fatal.
    pub fn start(&mut self) -> Result<(), MachineError> {
        self.ensure_not_halted()?;
        self.activate_entry()?;
        self.dispatch()
    }

    /// Exit the active state, leaving the machine idle.
    pub fn stop(&mut self) {
        self.deactivate();
    }

    /// Advance the active state by `delta_ms` milliseconds.
    ///
    /// Starts the machine if it has not been started. Signals queued since
    /// the last call are resolved before the active state is updated, and
    /// signals fired during the update are resolved before returning.
    pub fn update(&mut self, delta_ms: f64) -> Result<(), MachineError> {
        self.step(delta_ms)
    }

    /// Fire `signal` on behalf of the active state.
    ///
    /// Ignored when the machine has not been started.
    pub fn fire_signal(&mut self, signal: impl Into<String>) -> Result<(), MachineError> {
        self.ensure_not_halted()?;

        let signal = signal.into();
        if self.active.is_none() {
            debug!(machine = %self.name, signal = %signal, "signal fired before start dropped");
            return Ok(());
        }

        self.queue.push(self.queue.epoch(), signal);
        self.dispatch()
    }

    /// Resolve signals that observers queued outside of [`update`](Self::update).
    pub fn process_signals(&mut self) -> Result<(), MachineError> {
        self.ensure_not_halted()?;
        self.dispatch()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn active_state(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn entry_state(&self) -> Option<&str> {
        self.entry.as_deref()
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn has_state(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    /// Registered state names, sorted.
    pub fn state_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.states.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    pub fn history(&self) -> &TransitionLog {
        &self.history
    }

    /// Signals waiting in the queue, including stale ones not yet discarded.
    pub fn pending_signals(&self) -> usize {
        self.queue.len()
    }

    pub fn max_chained_transitions(&self) -> usize {
        self.max_chained_transitions
    }

    fn step(&mut self, delta_ms: f64) -> Result<(), MachineError> {
        self.ensure_not_halted()?;

        if self.active.is_none() {
            self.activate_entry()?;
        }

        self.dispatch()?;

        if let Some(active) = self.active.as_deref() {
            if let Some(state) = self.states.get_mut(active) {
                state.update(delta_ms);
            }
        }

        self.dispatch()
    }

    fn ensure_not_halted(&self) -> Result<(), MachineError> {
        if self.halted {
            return Err(MachineError::Halted {
                machine: self.name.clone(),
            });
        }
        Ok(())
    }

    fn activate_entry(&mut self) -> Result<(), MachineError> {
        let Some(entry) = self.entry.clone() else {
            return Err(self.halt(MachineError::EntryStateNotSet {
                machine: self.name.clone(),
            }));
        };

        if !self.states.contains_key(&entry) {
            return Err(self.halt(MachineError::UnknownEntryState {
                machine: self.name.clone(),
                state: entry,
            }));
        }

        self.deactivate();
        debug!(machine = %self.name, state = %entry, "machine started");
        self.activate(entry);
        Ok(())
    }

    fn activate(&mut self, name: String) {
        self.queue.revoke();
        let emitter = self.queue.emitter();

        self.active = Some(name);
        if let Some(active) = self.active.as_deref() {
            if let Some(state) = self.states.get_mut(active) {
                state.enter(emitter);
            }
        }
    }

    fn deactivate(&mut self) {
        if let Some(active) = self.active.take() {
            if let Some(state) = self.states.get_mut(&active) {
                state.exit();
            }
            self.queue.revoke();
        }
    }

    /// Resolve queued signals in FIFO order until the queue is empty.
    fn dispatch(&mut self) -> Result<(), MachineError> {
        let mut chained = 0;

        while let Some(pending) = self.queue.pop() {
            if pending.epoch != self.queue.epoch() {
                trace!(machine = %self.name, signal = %pending.name, "stale signal discarded");
                continue;
            }

            let Some(active) = self.active.clone() else {
                continue;
            };

            let Some(target) = self
                .transitions
                .resolve(&active, &pending.name)
                .map(str::to_owned)
            else {
                self.forward_unresolved(&active, &pending.name);
                continue;
            };

            if chained == self.max_chained_transitions {
                return Err(self.halt(MachineError::TransitionLimitExceeded {
                    machine: self.name.clone(),
                    limit: self.max_chained_transitions,
                }));
            }

            self.transition(active, pending.name, target)?;
            chained += 1;
        }

        Ok(())
    }

    fn transition(&mut self, from: String, signal: String, to: String) -> Result<(), MachineError> {
        if !self.states.contains_key(&to) {
            return Err(self.halt(MachineError::UnknownTargetState {
                machine: self.name.clone(),
                from,
                signal,
                target: to,
            }));
        }

        debug!(machine = %self.name, from = %from, signal = %signal, to = %to, "transition");

        self.deactivate();
        self.activate(to.clone());

        self.history.record(TransitionRecord {
            from,
            signal,
            to,
            timestamp: Utc::now(),
        });

        Ok(())
    }

    fn forward_unresolved(&self, active: &str, signal: &str) {
        match &self.parent {
            Some(parent) if parent.fire(signal) => {
                trace!(machine = %self.name, state = %active, signal = %signal, "signal forwarded to parent");
            }
            _ => {
                trace!(machine = %self.name, state = %active, signal = %signal, "signal has no transition");
            }
        }
    }

    fn halt(&mut self, err: MachineError) -> MachineError {
        error!(machine = %self.name, error = %err, "machine halted");
        self.halted = true;
        while self.queue.pop().is_some() {}
        err
    }
}

impl State for StateMachine {
    fn enter(&mut self, signals: SignalEmitter) {
        self.parent = Some(signals);
        // Fatal errors are reported by `halt`.
        let _ = self.start();
    }

    fn exit(&mut self) {
        self.stop();
        self.parent = None;
    }

    fn update(&mut self, delta_ms: f64) {
        // Other fatal errors were already reported by `halt`.
        if let Err(MachineError::Halted { .. }) = self.step(delta_ms) {
            trace!(machine = %self.name, "halted nested machine ticked");
        }
    }

    fn signals(&self) -> Vec<&str> {
        let mut signals: Vec<&str> = self.states.values().flat_map(|s| s.signals()).collect();
        signals.sort_unstable();
        signals.dedup();
        signals
    }
}

impl fmt::Debug for StateMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("name", &self.name)
            .field("states", &self.state_names())
            .field("entry", &self.entry)
            .field("active", &self.active)
            .field("transitions", &self.transitions.len())
            .field("halted", &self.halted)
            .finish()
    }
}
