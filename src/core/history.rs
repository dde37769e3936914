//! Transition log.
//!
//! Every transition a machine resolves is recorded with the signal that
//! caused it and a timestamp, so an owner can inspect or export the path a
//! lesson took.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single resolved transition.
///
/// # Example
///
/// ```rust
/// use lesson_fsm::core::TransitionRecord;
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     from: "Load".to_string(),
///     signal: "loadComplete".to_string(),
///     to: "Explore".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.to, "Explore");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The state that was exited
    pub from: String,
    /// The signal that triggered the transition
    pub signal: String,
    /// The state that was entered
    pub to: String,
    /// When the transition completed
    pub timestamp: DateTime<Utc>,
}

/// Ordered log of resolved transitions.
///
/// # Example
///
/// ```rust
/// use lesson_fsm::core::{TransitionLog, TransitionRecord};
/// use chrono::Utc;
///
/// let mut log = TransitionLog::new();
/// log.record(TransitionRecord {
///     from: "Load".to_string(),
///     signal: "loadComplete".to_string(),
///     to: "Explore".to_string(),
///     timestamp: Utc::now(),
/// });
/// log.record(TransitionRecord {
///     from: "Explore".to_string(),
///     signal: "exitReq".to_string(),
///     to: "Clean".to_string(),
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(log.path(), vec!["Load", "Explore", "Clean"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionLog {
    transitions: Vec<TransitionRecord>,
}

impl TransitionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transition.
    pub fn record(&mut self, transition: TransitionRecord) {
        self.transitions.push(transition);
    }

    /// States traversed: the first source, then every target in order.
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(first.from.as_str());
        }
        path.extend(self.transitions.iter().map(|t| t.to.as_str()));
        path
    }

    /// Time between the first and last recorded transition.
    ///
    /// `None` when nothing was recorded.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn transitions(&self) -> &[TransitionRecord] {
        &self.transitions
    }

    pub fn last(&self) -> Option<&TransitionRecord> {
        self.transitions.last()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn clear(&mut self) {
        self.transitions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(from: &str, signal: &str, to: &str) -> TransitionRecord {
        TransitionRecord {
            from: from.to_string(),
            signal: signal.to_string(),
            to: to.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_log_is_empty() {
        let log = TransitionLog::new();
        assert!(log.is_empty());
        assert!(log.path().is_empty());
        assert!(log.duration().is_none());
        assert!(log.last().is_none());
    }

    #[test]
    fn path_follows_recorded_order() {
        let mut log = TransitionLog::new();
        log.record(record("Load", "loadComplete", "Explore"));
        log.record(record("Explore", "exitReq", "Clean"));

        assert_eq!(log.path(), vec!["Load", "Explore", "Clean"]);
        assert_eq!(log.last().map(|t| t.signal.as_str()), Some("exitReq"));
    }

    #[test]
    fn duration_spans_first_to_last() {
        let mut log = TransitionLog::new();
        let start = Utc::now();

        let mut first = record("Load", "loadComplete", "Explore");
        first.timestamp = start;
        log.record(first);

        let mut second = record("Explore", "exitReq", "Clean");
        second.timestamp = start + chrono::Duration::milliseconds(250);
        log.record(second);

        assert_eq!(log.duration(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn single_transition_has_zero_duration() {
        let mut log = TransitionLog::new();
        log.record(record("Load", "exitReq", "Clean"));

        assert_eq!(log.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn log_serializes_correctly() {
        let mut log = TransitionLog::new();
        log.record(record("Load", "loadComplete", "Explore"));

        let json = serde_json::to_string(&log).unwrap();
        let restored: TransitionLog = serde_json::from_str(&json).unwrap();

        assert_eq!(log, restored);
    }

    #[test]
    fn clear_forgets_everything() {
        let mut log = TransitionLog::new();
        log.record(record("Load", "loadComplete", "Explore"));
        log.clear();

        assert!(log.is_empty());
    }
}
