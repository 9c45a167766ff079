//! Shortest edit script computation (Myers' greedy forward search).
//!
//! The edit graph for `a` (length n) and `b` (length m) has a node per
//! `(x, y)` with `x <= n`, `y <= m`. A diagonal step `(x, y) -> (x+1, y+1)`
//! is free when `a[x] == b[y]`; a step right removes `a[x]`, a step down
//! inserts `b[y]`. Diagonal `k` holds the nodes with `x - y == k`.
//!
//! For each edit count `d` the search records, per diagonal, the furthest
//! `x` reachable with `d` edits. The first `d` that reaches `(n, m)` is the
//! edit distance. Snapshots of the frontier taken before each step let the
//! path be recovered backwards without re-running the search.

use crate::change::Change;
use crate::difference::Difference;
use crate::pool;

/// Reusable scratch space for the forward search.
///
/// Holds the frontier and an arena of per-step frontier snapshots. Both are
/// cleared, not freed, between runs, so repeated computations on one graph
/// stop allocating once the buffers are large enough.
#[derive(Debug, Default)]
pub struct EditGraph {
    /// Furthest x on each diagonal, diagonal `k` at index `center + k`.
    frontier: Vec<isize>,
    /// Snapshot for step `d` covers diagonals `-d..=d`.
    trace: Vec<isize>,
    /// Start of each step's snapshot in `trace`.
    rows: Vec<usize>,
}

impl EditGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elements of scratch space currently reserved.
    pub fn capacity(&self) -> usize {
        self.frontier.capacity() + self.trace.capacity() + self.rows.capacity()
    }

    /// Compute the shortest edit script from `a` to `b` under `eq`.
    ///
    /// Returns removals by descending offset and insertions by ascending
    /// offset, none of them associated.
    pub fn shortest_edit_script<E, F>(
        &mut self,
        a: &[E],
        b: &[E],
        mut eq: F,
    ) -> (Vec<Change<E>>, Vec<Change<E>>)
    where
        E: Clone,
        F: FnMut(&E, &E) -> bool,
    {
        let distance = self.search(a, b, &mut eq);
        log::trace!(
            "edit distance {distance} between sequences of length {} and {}",
            a.len(),
            b.len()
        );
        self.backtrack(a, b, distance)
    }

    fn search<E, F>(&mut self, a: &[E], b: &[E], eq: &mut F) -> usize
    where
        F: FnMut(&E, &E) -> bool,
    {
        let (n, m) = (a.len() as isize, b.len() as isize);
        let max = n + m;
        // One spare slot on each side so diagonals -max-1 and max+1 can be read.
        let center = max + 1;

        self.frontier.clear();
        self.frontier.resize((2 * max + 3) as usize, 0);
        self.trace.clear();
        self.rows.clear();

        for d in 0..=max {
            self.rows.push(self.trace.len());
            let window = ((center - d) as usize)..=((center + d) as usize);
            self.trace.extend_from_slice(&self.frontier[window]);

            for k in (-d..=d).step_by(2) {
                let idx = (center + k) as usize;
                let v = &mut self.frontier;

                let mut x = if k == -d || (k != d && v[idx - 1] < v[idx + 1]) {
                    // down from diagonal k+1: an insertion
                    v[idx + 1]
                } else {
                    // right from diagonal k-1: a removal
                    v[idx - 1] + 1
                };

                let mut y = x - k;
                while x < n && y < m && eq(&a[x as usize], &b[y as usize]) {
                    // snake
                    x += 1;
                    y += 1;
                }

                v[idx] = x;

                if x >= n && y >= m {
                    return d as usize;
                }
            }
        }

        max as usize
    }

    fn backtrack<E: Clone>(
        &self,
        a: &[E],
        b: &[E],
        distance: usize,
    ) -> (Vec<Change<E>>, Vec<Change<E>>) {
        let (mut x, mut y) = (a.len() as isize, b.len() as isize);
        let mut removals = Vec::new();
        let mut insertions = Vec::new();

        for d in (1..=distance).rev() {
            let row = &self.trace[self.rows[d]..];
            let d = d as isize;
            let at = |k: isize| row[(d + k) as usize];

            let k = x - y;
            let prev_k = if k == -d || (k != d && at(k - 1) < at(k + 1)) {
                k + 1
            } else {
                k - 1
            };

            let prev_x = at(prev_k);
            let prev_y = prev_x - prev_k;

            if prev_k == k + 1 {
                let offset = prev_y as usize;
                insertions.push(Change::insert(offset, b[offset].clone()));
            } else {
                let offset = prev_x as usize;
                removals.push(Change::remove(offset, a[offset].clone()));
            }

            (x, y) = (prev_x, prev_y);
        }

        // The walk runs from the end of both sequences back to the start.
        insertions.reverse();
        (removals, insertions)
    }
}

/// The difference with the fewest changes that turns `source` into `target`.
///
/// Equal sequences produce the empty difference. When several minimal
/// scripts exist the same one is always chosen: ties in the search prefer
/// the removal.
pub fn compute_difference<E>(source: &[E], target: &[E]) -> Difference<E>
where
    E: Clone + PartialEq,
{
    compute_difference_by(source, target, |a, b| a == b)
}

/// [`compute_difference`] under a caller-supplied equivalence.
pub fn compute_difference_by<E, F>(source: &[E], target: &[E], eq: F) -> Difference<E>
where
    E: Clone,
    F: FnMut(&E, &E) -> bool,
{
    let (removals, insertions) =
        pool::with_edit_graph(|graph| graph.shortest_edit_script(source, target, eq));
    Difference::from_sorted(removals, insertions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_empty_sequences() {
        let diff = compute_difference::<i32>(&[], &[]);
        assert!(diff.is_empty());
    }

    #[test]
    fn test_equal_sequences() {
        let a = chars("abcabba");
        assert!(compute_difference(&a, &a).is_empty());
    }

    #[test]
    fn test_only_insertions_and_only_removals() {
        let diff = compute_difference(&[], &chars("ab"));
        assert_eq!(
            diff.iter().cloned().collect::<Vec<_>>(),
            vec![Change::insert(0, 'a'), Change::insert(1, 'b')]
        );

        let diff = compute_difference(&chars("ab"), &[]);
        assert_eq!(
            diff.iter().cloned().collect::<Vec<_>>(),
            vec![Change::remove(1, 'b'), Change::remove(0, 'a')]
        );
    }

    #[test]
    fn test_diff_strings() {
        let diff = compute_difference(&chars("abcabba"), &chars("cbabac"));
        let expected = vec![
            Change::remove(5, 'b'),
            Change::remove(1, 'b'),
            Change::remove(0, 'a'),
            Change::insert(1, 'b'),
            Change::insert(5, 'c'),
        ];

        assert_eq!(diff.iter().cloned().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_diff_lines() {
        let a = vec!["line1", "line2", "line3", "line4"];
        let b = vec!["line2", "line3_modified", "line4", "line5"];
        let diff = compute_difference(&a, &b);
        let expected = vec![
            Change::remove(2, "line3"),
            Change::remove(0, "line1"),
            Change::insert(1, "line3_modified"),
            Change::insert(3, "line5"),
        ];

        assert_eq!(diff.iter().cloned().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_custom_equivalence() {
        let a = vec!["Alpha", "beta"];
        let b = vec!["alpha", "BETA", "gamma"];
        let diff = compute_difference_by(&a, &b, |x, y| x.eq_ignore_ascii_case(y));

        assert_eq!(
            diff.iter().cloned().collect::<Vec<_>>(),
            vec![Change::insert(2, "gamma")]
        );
    }

    #[test]
    fn test_graph_reuse_gives_same_result() {
        let mut graph = EditGraph::new();
        let a = chars("the quick brown fox");
        let b = chars("the quack brawn fix");

        let first = graph.shortest_edit_script(&a, &b, |x, y| x == y);
        let capacity = graph.capacity();
        let second = graph.shortest_edit_script(&a, &b, |x, y| x == y);

        assert_eq!(first, second);
        assert_eq!(graph.capacity(), capacity);
    }
}
