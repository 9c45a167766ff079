//! The validated, immutable difference between two ordered sequences.

use crate::apply::{self, ApplicationConflict, ApplyStrategy};
use crate::change::Change;
use crate::myers;
use crate::validate::{self, MalformedPatch, RawChange};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A consistent set of [`Change`]s describing how to turn one sequence into
/// another.
///
/// Changes are held in canonical order: removals by descending offset, then
/// insertions by ascending offset. Applying them one by one in that order
/// never invalidates an offset that has not been applied yet.
///
/// Equality and hashing follow the set of changes, so two differences built
/// from the same changes in any input order compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[must_use = "a Difference does nothing until it is applied"]
pub struct Difference<E> {
    changes: Vec<Change<E>>,
    removal_count: usize,
}

impl<E> Default for Difference<E> {
    fn default() -> Self {
        Self {
            changes: Vec::new(),
            removal_count: 0,
        }
    }
}

impl<E> Difference<E> {
    /// The difference that changes nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validate `changes` and build a difference from them.
    ///
    /// Fails with [`MalformedPatch`] if offsets collide or associations do
    /// not pair up symmetrically.
    pub fn from_changes(
        changes: impl IntoIterator<Item = Change<E>>,
    ) -> Result<Self, MalformedPatch> {
        validate::validate_changes(changes)
    }

    /// Like [`Difference::from_changes`], for signed caller-authored changes.
    pub fn from_raw_changes(
        changes: impl IntoIterator<Item = RawChange<E>>,
    ) -> Result<Self, MalformedPatch> {
        validate::validate_raw_changes(changes)
    }

    /// Assemble a difference from halves that are already valid and sorted.
    pub(crate) fn from_sorted(removals: Vec<Change<E>>, insertions: Vec<Change<E>>) -> Self {
        debug_assert!(removals.windows(2).all(|w| w[0].offset() > w[1].offset()));
        debug_assert!(insertions.windows(2).all(|w| w[0].offset() < w[1].offset()));

        let removal_count = removals.len();
        let mut changes = removals;
        changes.extend(insertions);
        Self {
            changes,
            removal_count,
        }
    }

    /// Replace changes without touching offsets, so canonical order holds.
    pub(crate) fn map_changes(self, f: impl FnMut(Change<E>) -> Change<E>) -> Self {
        Self {
            changes: self.changes.into_iter().map(f).collect(),
            removal_count: self.removal_count,
        }
    }

    /// Removals, by descending source offset.
    pub fn removals(&self) -> &[Change<E>] {
        &self.changes[..self.removal_count]
    }

    /// Insertions, by ascending target offset.
    pub fn insertions(&self) -> &[Change<E>] {
        &self.changes[self.removal_count..]
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Iterate in canonical order.
    pub fn iter(&self) -> std::slice::Iter<'_, Change<E>> {
        self.changes.iter()
    }

    /// The difference that undoes this one: every removal becomes an
    /// insertion and vice versa, offsets and associations unchanged.
    pub fn inverse(&self) -> Self
    where
        E: Clone,
    {
        let removals = self
            .insertions()
            .iter()
            .rev()
            .map(|change| change.clone().inverted())
            .collect();
        let insertions = self
            .removals()
            .iter()
            .rev()
            .map(|change| change.clone().inverted())
            .collect();
        Self::from_sorted(removals, insertions)
    }

    /// Apply to `base` with the single-pass strategy.
    pub fn apply(&self, base: &[E]) -> Result<Vec<E>, ApplicationConflict>
    where
        E: Clone,
    {
        apply::apply_fast(base, self)
    }

    pub fn apply_with(
        &self,
        base: &[E],
        strategy: ApplyStrategy,
    ) -> Result<Vec<E>, ApplicationConflict>
    where
        E: Clone,
    {
        apply::apply_difference(base, self, strategy)
    }
}

impl<E: Clone + PartialEq> Difference<E> {
    /// The shortest edit script turning `source` into `target`.
    pub fn between(source: &[E], target: &[E]) -> Self {
        myers::compute_difference(source, target)
    }
}

impl<E> IntoIterator for Difference<E> {
    type Item = Change<E>;
    type IntoIter = std::vec::IntoIter<Change<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}

impl<'a, E> IntoIterator for &'a Difference<E> {
    type Item = &'a Change<E>;
    type IntoIter = std::slice::Iter<'a, Change<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

impl<E> TryFrom<Vec<Change<E>>> for Difference<E> {
    type Error = MalformedPatch;

    fn try_from(changes: Vec<Change<E>>) -> Result<Self, Self::Error> {
        Self::from_changes(changes)
    }
}

impl<E: Serialize> Serialize for Difference<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.changes)
    }
}

impl<'de, E: Deserialize<'de>> Deserialize<'de> for Difference<E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<RawChange<E>>::deserialize(deserializer)?;
        Self::from_raw_changes(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_empty_difference() {
        let diff = Difference::<String>::from_changes([]).unwrap();
        assert!(diff.is_empty());
        assert_eq!(diff.len(), 0);
        assert_eq!(diff.removals().len(), 0);
        assert_eq!(diff.insertions().len(), 0);
        assert_eq!(diff.iter().count(), 0);
        assert_eq!(diff, Difference::empty());
    }

    #[test]
    fn test_enumeration_order_is_canonical() {
        let canonical = vec![
            Change::remove(2, 0),
            Change::remove(1, 0).paired_with(0),
            Change::remove(0, 0).paired_with(1),
            Change::insert(0, 0).paired_with(1),
            Change::insert(1, 0).paired_with(0),
            Change::insert(2, 0),
        ];
        let shuffled = vec![
            canonical[4].clone(),
            canonical[1].clone(),
            canonical[5].clone(),
            canonical[0].clone(),
            canonical[3].clone(),
            canonical[2].clone(),
        ];

        let diff = Difference::from_changes(shuffled).unwrap();
        let enumerated: Vec<_> = diff.iter().cloned().collect();
        assert_eq!(enumerated, canonical);
        assert_eq!(diff, Difference::from_changes(canonical).unwrap());
    }

    #[test]
    fn test_inverse_swaps_kinds_and_stays_canonical() {
        let diff = Difference::from_changes([
            Change::remove(6, "Presents").paired_with(4),
            Change::remove(2, "Dreidel"),
            Change::insert(4, "Presents").paired_with(6),
            Change::insert(7, "Gelt"),
        ])
        .unwrap();

        let inverse = diff.inverse();
        let expected = Difference::from_changes([
            Change::remove(7, "Gelt"),
            Change::remove(4, "Presents").paired_with(6),
            Change::insert(2, "Dreidel"),
            Change::insert(6, "Presents").paired_with(4),
        ])
        .unwrap();

        assert_eq!(inverse, expected);
        assert_eq!(inverse.inverse(), diff);
    }

    #[test]
    fn test_differences_are_hashable() {
        let a = Difference::from_changes([Change::remove(1, "B")]).unwrap();
        let b = Difference::from_changes([Change::remove(1, "B")]).unwrap();
        let mut set = HashSet::new();
        set.insert(a);
        set.insert(b);
        set.insert(Difference::empty());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_try_from_vec() {
        let diff: Result<Difference<i32>, _> =
            vec![Change::insert(0, 1), Change::insert(0, 2)].try_into();
        assert!(diff.is_err());
    }
}
