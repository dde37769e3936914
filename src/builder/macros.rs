//! Macros for ergonomic transition table construction.

/// Build a [`TransitionTable`](crate::core::TransitionTable) from nested
/// `source => { signal => target }` groups.
///
/// Later entries override earlier ones for the same (source, signal) pair.
/// Source names are evaluated once per signal, so use literals or `&str`
/// constants.
///
/// # Example
///
/// ```
/// use lesson_fsm::transition_table;
///
/// let table = transition_table! {
///     "Load" => {
///         "loadComplete" => "Explore",
///         "exitReq" => "Clean",
///     },
///     "Explore" => { "exitReq" => "Clean" },
///     "Clean" => {},
/// };
///
/// assert_eq!(table.len(), 3);
/// assert_eq!(table.resolve("Load", "exitReq"), Some("Clean"));
/// ```
#[macro_export]
macro_rules! transition_table {
    (
        $(
            $source:expr => {
                $( $signal:expr => $target:expr ),* $(,)?
            }
        ),* $(,)?
    ) => {{
        #[allow(unused_mut)]
        let mut table = $crate::core::TransitionTable::new();
        $(
            $(
                table.add($source, $signal, $target);
            )*
        )*
        table
    }};
}
