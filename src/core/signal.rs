//! Signal queue and the revocable emitter handed to active states.
//!
//! A machine owns exactly one [`SignalQueue`]. Every time a state is entered
//! the queue's epoch advances and the state receives a [`SignalEmitter`]
//! stamped with that epoch. Signals are tagged with the epoch of the emitter
//! that fired them, so once a state has been exited anything it (or an
//! observer it forgot about) fires is recognised as stale and dropped.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

/// Signal waiting to be resolved by the owning machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PendingSignal {
    pub(crate) epoch: u64,
    pub(crate) name: String,
}

/// FIFO of signals fired by the active state, shared with its emitter.
#[derive(Debug, Default)]
pub(crate) struct SignalQueue {
    pending: RefCell<VecDeque<PendingSignal>>,
    epoch: Cell<u64>,
}

impl SignalQueue {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub(crate) fn epoch(&self) -> u64 {
        self.epoch.get()
    }

    /// Invalidate every emitter handed out so far.
    pub(crate) fn revoke(&self) {
        self.epoch.set(self.epoch.get() + 1);
    }

    /// Emitter bound to the current epoch.
    pub(crate) fn emitter(self: &Rc<Self>) -> SignalEmitter {
        SignalEmitter {
            queue: Some(Rc::clone(self)),
            epoch: self.epoch(),
        }
    }

    pub(crate) fn push(&self, epoch: u64, name: String) {
        self.pending
            .borrow_mut()
            .push_back(PendingSignal { epoch, name });
    }

    pub(crate) fn pop(&self) -> Option<PendingSignal> {
        self.pending.borrow_mut().pop_front()
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.borrow().len()
    }
}

/// Capability to fire signals at the machine that entered a state.
///
/// The machine passes a fresh emitter to [`State::enter`](crate::core::State::enter).
/// States keep it as an owned field and may clone it into observer objects
/// they register with collaborators. When the state is exited the emitter is
/// revoked: firing through it afterwards is a silent no-op.
///
/// # Example
///
/// ```rust
/// use lesson_fsm::core::SignalEmitter;
///
/// // Emitters that were never issued by a machine drop everything.
/// let emitter = SignalEmitter::detached();
/// assert!(!emitter.is_live());
/// assert!(!emitter.fire("loadComplete"));
/// ```
#[derive(Clone)]
pub struct SignalEmitter {
    queue: Option<Rc<SignalQueue>>,
    epoch: u64,
}

impl SignalEmitter {
    /// Emitter that is not connected to any machine.
    pub fn detached() -> Self {
        Self {
            queue: None,
            epoch: 0,
        }
    }

    /// Whether signals fired through this emitter can still reach the machine.
    pub fn is_live(&self) -> bool {
        self.queue
            .as_ref()
            .is_some_and(|queue| queue.epoch() == self.epoch)
    }

    /// Queue `signal` for resolution by the owning machine.
    ///
    /// Returns `false` when the emitter has been revoked and the signal was
    /// dropped. Resolution happens before the machine returns control from
    /// the call (update, start, process_signals) that is currently running,
    /// or on the next such call when fired from outside the machine.
    pub fn fire(&self, signal: impl Into<String>) -> bool {
        let signal = signal.into();
        match &self.queue {
            Some(queue) if queue.epoch() == self.epoch => {
                queue.push(self.epoch, signal);
                true
            }
            _ => {
                tracing::trace!(signal = %signal, "signal fired through revoked emitter dropped");
                false
            }
        }
    }
}

impl Default for SignalEmitter {
    fn default() -> Self {
        Self::detached()
    }
}

impl fmt::Debug for SignalEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalEmitter")
            .field("epoch", &self.epoch)
            .field("live", &self.is_live())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_emitter_queues_signals_in_order() {
        let queue = SignalQueue::new();
        let emitter = queue.emitter();

        assert!(emitter.fire("first"));
        assert!(emitter.fire("second"));

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop().map(|s| s.name), Some("first".to_string()));
        assert_eq!(queue.pop().map(|s| s.name), Some("second".to_string()));
        assert!(queue.pop().is_none());
    }

    #[test]
    fn revoked_emitter_drops_signals() {
        let queue = SignalQueue::new();
        let emitter = queue.emitter();

        queue.revoke();

        assert!(!emitter.is_live());
        assert!(!emitter.fire("exitReq"));
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn clones_share_revocation() {
        let queue = SignalQueue::new();
        let emitter = queue.emitter();
        let observer_copy = emitter.clone();

        queue.revoke();
        let next = queue.emitter();

        assert!(!observer_copy.fire("exitReq"));
        assert!(next.fire("exitReq"));
        assert_eq!(queue.pop().map(|s| s.epoch), Some(queue.epoch()));
    }

    #[test]
    fn detached_emitter_is_never_live() {
        let emitter = SignalEmitter::default();
        assert!(!emitter.is_live());
        assert!(!emitter.fire("anything"));
    }
}
