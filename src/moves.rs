//! Move inference: pairing equal removed and inserted elements.

use crate::difference::Difference;
use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

impl<E: Clone + Eq + Hash> Difference<E> {
    /// Pair removals and insertions of equal elements into moves.
    ///
    /// Only changes without an association take part. For each value, the
    /// unassociated removals in canonical order (descending offset) are
    /// paired one-to-one with the unassociated insertions in canonical order
    /// (ascending offset) until either side runs out. Existing associations
    /// are kept, so running this on its own output changes nothing.
    pub fn inferring_moves(&self) -> Difference<E> {
        let mut open_insertions: HashMap<&E, VecDeque<usize>> = HashMap::new();
        for change in self.insertions() {
            if change.association().is_none() {
                open_insertions
                    .entry(change.element())
                    .or_default()
                    .push_back(change.offset());
            }
        }

        // removal offset -> insertion offset, and the reverse
        let mut by_removal = HashMap::new();
        let mut by_insertion = HashMap::new();
        for change in self.removals() {
            if change.association().is_some() {
                continue;
            }
            let partner = open_insertions
                .get_mut(change.element())
                .and_then(VecDeque::pop_front);
            if let Some(insertion) = partner {
                by_removal.insert(change.offset(), insertion);
                by_insertion.insert(insertion, change.offset());
            }
        }

        log::trace!("inferred {} moves", by_removal.len());
        if by_removal.is_empty() {
            return self.clone();
        }

        self.clone().map_changes(|change| {
            let partner = if change.is_removal() {
                by_removal.get(&change.offset())
            } else {
                by_insertion.get(&change.offset())
            };
            match partner {
                Some(&offset) => change.paired_with(offset),
                None => change,
            }
        })
    }
}
