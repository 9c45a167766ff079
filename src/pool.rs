//! Thread-local edit graph pooling.
//!
//! Keeps one [`EditGraph`] per thread so repeated diff computations reuse
//! the same scratch buffers. Creates the graph on first use per thread and
//! reuses it afterwards. Graphs that grew past the retention cap are dropped
//! after use so one huge diff does not pin memory for the thread's lifetime.

use crate::myers::EditGraph;
use std::cell::RefCell;

const MAX_RETAINED_CAPACITY: usize = 1 << 20;

thread_local! {
    static EDIT_GRAPH: RefCell<EditGraph> = RefCell::new(EditGraph::new());
}

/// Execute function with the pooled edit graph.
///
/// If the pooled graph is already in use on this thread (an equivalence
/// predicate that itself computes a diff), a fresh graph is used instead.
///
/// # Example
///
/// ```
/// use ordered_diff::pool::with_edit_graph;
///
/// let (removals, insertions) = with_edit_graph(|graph| {
///     graph.shortest_edit_script(&[1, 2, 3], &[1, 3], |a, b| a == b)
/// });
/// assert_eq!(removals.len(), 1);
/// assert!(insertions.is_empty());
/// ```
pub fn with_edit_graph<F, R>(f: F) -> R
where
    F: FnOnce(&mut EditGraph) -> R,
{
    EDIT_GRAPH.with(|cell| match cell.try_borrow_mut() {
        Ok(mut graph) => {
            let result = f(&mut graph);
            if graph.capacity() > MAX_RETAINED_CAPACITY {
                *graph = EditGraph::new();
            }
            result
        }
        Err(_) => f(&mut EditGraph::new()),
    })
}

/// Scratch space currently retained by this thread's pooled graph.
pub fn retained_capacity() -> usize {
    EDIT_GRAPH.with(|cell| {
        cell.try_borrow()
            .map(|graph| graph.capacity())
            .unwrap_or_default()
    })
}
