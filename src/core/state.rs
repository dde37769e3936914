//! Core `State` trait for units sequenced by a machine.

use super::signal::SignalEmitter;

/// A named unit of behavior driven by a [`StateMachine`](crate::machine::StateMachine).
///
/// The machine guarantees that `enter` and `exit` alternate strictly and
/// that `update` is only called between them, while the state is active.
/// A state never sees its machine: the only way back is the
/// [`SignalEmitter`] passed to `enter`, which stops working once `exit`
/// has been called.
///
/// Observer capabilities for collaborators (asset loading, pointer input)
/// are separate traits in [`collaborators`](crate::collaborators); a state
/// registers an object implementing them during `enter` and deregisters it
/// during `exit`.
///
/// # Example
///
/// ```rust
/// use lesson_fsm::core::{SignalEmitter, State};
///
/// struct Countdown {
///     remaining_ms: f64,
///     signals: SignalEmitter,
/// }
///
/// impl State for Countdown {
///     fn enter(&mut self, signals: SignalEmitter) {
///         self.remaining_ms = 500.0;
///         self.signals = signals;
///     }
///
///     fn exit(&mut self) {}
///
///     fn update(&mut self, delta_ms: f64) {
///         self.remaining_ms -= delta_ms;
///         if self.remaining_ms <= 0.0 {
///             self.signals.fire("elapsed");
///         }
///     }
///
///     fn signals(&self) -> Vec<&str> {
///         vec!["elapsed"]
///     }
/// }
/// ```
pub trait State {
    /// Called when the state becomes active.
    fn enter(&mut self, signals: SignalEmitter);

    /// Called when the state stops being active.
    fn exit(&mut self);

    /// Advance the state by `delta_ms` milliseconds.
    fn update(&mut self, delta_ms: f64);

    /// Signals this state may fire.
    ///
    /// Informational only; the machine routes any signal it receives.
    fn signals(&self) -> Vec<&str> {
        Vec::new()
    }
}

impl<S: State + ?Sized> State for Box<S> {
    fn enter(&mut self, signals: SignalEmitter) {
        (**self).enter(signals)
    }

    fn exit(&mut self) {
        (**self).exit()
    }

    fn update(&mut self, delta_ms: f64) {
        (**self).update(delta_ms)
    }

    fn signals(&self) -> Vec<&str> {
        (**self).signals()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::signal::SignalQueue;

    #[derive(Default)]
    struct Ticker {
        ticks: u32,
        signals: SignalEmitter,
    }

    impl State for Ticker {
        fn enter(&mut self, signals: SignalEmitter) {
            self.ticks = 0;
            self.signals = signals;
        }

        fn exit(&mut self) {}

        fn update(&mut self, _delta_ms: f64) {
            self.ticks += 1;
            if self.ticks == 2 {
                self.signals.fire("done");
            }
        }

        fn signals(&self) -> Vec<&str> {
            vec!["done"]
        }
    }

    #[test]
    fn default_signal_declaration_is_empty() {
        struct Silent;
        impl State for Silent {
            fn enter(&mut self, _signals: SignalEmitter) {}
            fn exit(&mut self) {}
            fn update(&mut self, _delta_ms: f64) {}
        }

        assert!(Silent.signals().is_empty());
    }

    #[test]
    fn state_fires_through_injected_emitter() {
        let queue = SignalQueue::new();
        let mut ticker = Ticker::default();

        ticker.enter(queue.emitter());
        ticker.update(16.0);
        assert_eq!(queue.len(), 0);

        ticker.update(16.0);
        assert_eq!(queue.pop().map(|s| s.name), Some("done".to_string()));
    }

    #[test]
    fn boxed_state_delegates() {
        let queue = SignalQueue::new();
        let mut boxed: Box<dyn State> = Box::new(Ticker::default());

        boxed.enter(queue.emitter());
        boxed.update(1.0);
        boxed.update(1.0);

        assert_eq!(boxed.signals(), vec!["done"]);
        assert_eq!(queue.len(), 1);
    }
}
