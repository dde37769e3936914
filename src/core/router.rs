//! Transition table mapping (state, signal) pairs to target states.

use std::collections::HashMap;

/// Routes signals fired by a state to the state that should become active.
///
/// At most one target exists per (source, signal) pair. Registering the
/// same pair again replaces the previous target; this is the contract, not
/// an error. Resolving a pair that was never registered yields `None`,
/// which the machine treats as "ignore the signal".
///
/// # Example
///
/// ```rust
/// use lesson_fsm::core::TransitionTable;
///
/// let mut table = TransitionTable::new();
/// table.add("Load", "loadComplete", "Explore");
/// table.add("Explore", "exitReq", "Clean");
///
/// assert_eq!(table.resolve("Load", "loadComplete"), Some("Explore"));
/// assert_eq!(table.resolve("Load", "pointerDown"), None);
///
/// // Last registration wins
/// let previous = table.add("Load", "loadComplete", "Clean");
/// assert_eq!(previous.as_deref(), Some("Explore"));
/// assert_eq!(table.resolve("Load", "loadComplete"), Some("Clean"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransitionTable {
    routes: HashMap<String, HashMap<String, String>>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `source --signal--> target`.
    ///
    /// Returns the target that was replaced, if the pair was already
    /// registered.
    pub fn add(
        &mut self,
        source: impl Into<String>,
        signal: impl Into<String>,
        target: impl Into<String>,
    ) -> Option<String> {
        self.routes
            .entry(source.into())
            .or_default()
            .insert(signal.into(), target.into())
    }

    /// Look up the target for `signal` fired while `source` is active.
    pub fn resolve(&self, source: &str, signal: &str) -> Option<&str> {
        self.routes
            .get(source)
            .and_then(|signals| signals.get(signal))
            .map(String::as_str)
    }

    /// Iterate over `(source, signal, target)` triples in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.routes.iter().flat_map(|(source, signals)| {
            signals
                .iter()
                .map(move |(signal, target)| (source.as_str(), signal.as_str(), target.as_str()))
        })
    }

    /// Number of registered (source, signal) pairs.
    pub fn len(&self) -> usize {
        self.routes.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Merge `other` into this table. Routes from `other` win on conflict.
    pub fn extend(&mut self, other: TransitionTable) {
        for (source, signals) in other.routes {
            self.routes.entry(source).or_default().extend(signals);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_returns_registered_target() {
        let mut table = TransitionTable::new();
        table.add("Load", "loadComplete", "Explore");

        assert_eq!(table.resolve("Load", "loadComplete"), Some("Explore"));
    }

    #[test]
    fn unknown_pairs_do_not_resolve() {
        let mut table = TransitionTable::new();
        table.add("Load", "loadComplete", "Explore");

        assert_eq!(table.resolve("Load", "exitReq"), None);
        assert_eq!(table.resolve("Explore", "loadComplete"), None);
    }

    #[test]
    fn duplicate_registration_keeps_latest_target() {
        let mut table = TransitionTable::new();
        assert!(table.add("Explore", "exitReq", "Load").is_none());

        let replaced = table.add("Explore", "exitReq", "Clean");

        assert_eq!(replaced.as_deref(), Some("Load"));
        assert_eq!(table.resolve("Explore", "exitReq"), Some("Clean"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn same_signal_routes_independently_per_source() {
        let mut table = TransitionTable::new();
        table.add("Load", "exitReq", "Clean");
        table.add("Explore", "exitReq", "Summary");

        assert_eq!(table.resolve("Load", "exitReq"), Some("Clean"));
        assert_eq!(table.resolve("Explore", "exitReq"), Some("Summary"));
    }

    #[test]
    fn extend_overrides_conflicting_routes() {
        let mut base = TransitionTable::new();
        base.add("Load", "loadComplete", "Explore");
        base.add("Load", "exitReq", "Clean");

        let mut overrides = TransitionTable::new();
        overrides.add("Load", "exitReq", "Abort");

        base.extend(overrides);

        assert_eq!(base.len(), 2);
        assert_eq!(base.resolve("Load", "exitReq"), Some("Abort"));
        assert_eq!(base.resolve("Load", "loadComplete"), Some("Explore"));
    }

    #[test]
    fn iter_visits_every_triple() {
        let mut table = TransitionTable::new();
        table.add("Load", "loadComplete", "Explore");
        table.add("Explore", "exitReq", "Clean");

        let mut triples: Vec<_> = table.iter().collect();
        triples.sort();

        assert_eq!(
            triples,
            vec![
                ("Explore", "exitReq", "Clean"),
                ("Load", "loadComplete", "Explore"),
            ]
        );
    }

    #[test]
    fn empty_table_reports_empty() {
        let table = TransitionTable::new();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
    }
}
