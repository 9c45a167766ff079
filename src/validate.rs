//! Validation of caller-supplied change lists.
//!
//! A change list is accepted only if it describes one consistent difference:
//!
//! 1. No two removals share an offset; no two insertions share an offset.
//! 2. No offset or association is negative.
//! 3. Every association names an existing change of the opposite kind, and
//!    that change names this one back. No two changes claim the same partner.
//!
//! Validation is all-or-nothing. A rejected list yields a [`MalformedPatch`]
//! and no difference at all; it is never truncated to its valid prefix.

use crate::change::{Change, ChangeKind};
use crate::difference::Difference;
use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// A change as authored by a caller or read from a serialized document.
///
/// Offsets are signed here so that negative values can be represented and
/// rejected instead of silently wrapping.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawChange<E> {
    Remove {
        offset: i64,
        element: E,
        #[serde(default)]
        associated_with: Option<i64>,
    },
    Insert {
        offset: i64,
        element: E,
        #[serde(default)]
        associated_with: Option<i64>,
    },
}

/// Reasons a change list is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedPatch {
    #[error("{kind} has negative offset {offset}")]
    NegativeOffset { kind: ChangeKind, offset: i64 },

    #[error("{kind} at offset {offset} has negative association {associated_with}")]
    NegativeAssociation {
        kind: ChangeKind,
        offset: usize,
        associated_with: i64,
    },

    #[error("more than one {kind} at offset {offset}")]
    DuplicateOffset { kind: ChangeKind, offset: usize },

    #[error("more than one {kind} associated with offset {associated_with}")]
    SharedAssociation {
        kind: ChangeKind,
        associated_with: usize,
    },

    #[error("{kind} at offset {offset} is associated with missing offset {associated_with}")]
    DanglingAssociation {
        kind: ChangeKind,
        offset: usize,
        associated_with: usize,
    },

    #[error("{kind} at offset {offset} is associated with {associated_with}, which does not point back")]
    AsymmetricAssociation {
        kind: ChangeKind,
        offset: usize,
        associated_with: usize,
    },
}

impl<E> TryFrom<RawChange<E>> for Change<E> {
    type Error = MalformedPatch;

    fn try_from(raw: RawChange<E>) -> Result<Self, Self::Error> {
        let (kind, offset, element, associated_with) = match raw {
            RawChange::Remove {
                offset,
                element,
                associated_with,
            } => (ChangeKind::Remove, offset, element, associated_with),
            RawChange::Insert {
                offset,
                element,
                associated_with,
            } => (ChangeKind::Insert, offset, element, associated_with),
        };

        let offset =
            usize::try_from(offset).map_err(|_| MalformedPatch::NegativeOffset { kind, offset })?;
        let association = associated_with
            .map(|target| {
                usize::try_from(target).map_err(|_| MalformedPatch::NegativeAssociation {
                    kind,
                    offset,
                    associated_with: target,
                })
            })
            .transpose()?;

        let change = match kind {
            ChangeKind::Remove => Change::remove(offset, element),
            ChangeKind::Insert => Change::insert(offset, element),
        };
        Ok(change.with_association(association))
    }
}

/// One side of the scan: changes keyed by offset plus the association
/// targets already claimed.
struct Side<E> {
    kind: ChangeKind,
    changes: BTreeMap<usize, Change<E>>,
    claimed: BTreeMap<usize, usize>,
}

impl<E> Side<E> {
    fn new(kind: ChangeKind) -> Self {
        Self {
            kind,
            changes: BTreeMap::new(),
            claimed: BTreeMap::new(),
        }
    }

    fn record(&mut self, change: Change<E>) -> Result<(), MalformedPatch> {
        let offset = change.offset();
        if self.changes.contains_key(&offset) {
            return Err(MalformedPatch::DuplicateOffset {
                kind: self.kind,
                offset,
            });
        }

        if let Some(target) = change.association() {
            if self.claimed.insert(target, offset).is_some() {
                return Err(MalformedPatch::SharedAssociation {
                    kind: self.kind,
                    associated_with: target,
                });
            }
        }

        self.changes.insert(offset, change);
        Ok(())
    }

    /// Every association on this side must resolve to a change on `other`
    /// that points back.
    fn check_associations(&self, other: &Side<E>) -> Result<(), MalformedPatch> {
        for (&target, &offset) in &self.claimed {
            let partner = other
                .changes
                .get(&target)
                .ok_or(MalformedPatch::DanglingAssociation {
                    kind: self.kind,
                    offset,
                    associated_with: target,
                })?;

            if partner.association() != Some(offset) {
                return Err(MalformedPatch::AsymmetricAssociation {
                    kind: self.kind,
                    offset,
                    associated_with: target,
                });
            }
        }
        Ok(())
    }
}

/// Validate `changes` and build the canonically ordered difference.
pub fn validate_changes<E>(
    changes: impl IntoIterator<Item = Change<E>>,
) -> Result<Difference<E>, MalformedPatch> {
    let mut removals = Side::new(ChangeKind::Remove);
    let mut insertions = Side::new(ChangeKind::Insert);

    for change in changes {
        let side = match change.kind() {
            ChangeKind::Remove => &mut removals,
            ChangeKind::Insert => &mut insertions,
        };
        side.record(change).inspect_err(reject)?;
    }

    removals.check_associations(&insertions).inspect_err(reject)?;
    insertions.check_associations(&removals).inspect_err(reject)?;

    Ok(Difference::from_sorted(
        removals.changes.into_values().rev().collect(),
        insertions.changes.into_values().collect(),
    ))
}

/// Validate signed, caller-authored changes.
///
/// Negative offsets and associations are rejected before the structural
/// checks of [`validate_changes`] run.
pub fn validate_raw_changes<E>(
    changes: impl IntoIterator<Item = RawChange<E>>,
) -> Result<Difference<E>, MalformedPatch> {
    let changes = changes
        .into_iter()
        .map(Change::try_from)
        .collect::<Result<Vec<_>, _>>()
        .inspect_err(reject)?;
    validate_changes(changes)
}

fn reject(error: &MalformedPatch) {
    log::debug!("rejecting change list: {error}");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_insert(offset: i64, associated_with: Option<i64>) -> RawChange<i32> {
        RawChange::Insert {
            offset,
            element: 0,
            associated_with,
        }
    }

    fn raw_remove(offset: i64, associated_with: Option<i64>) -> RawChange<i32> {
        RawChange::Remove {
            offset,
            element: 0,
            associated_with,
        }
    }

    #[test]
    fn test_accepts_one_insert_and_one_remove_at_same_offset() {
        let diff = validate_changes([Change::insert(0, 0), Change::remove(0, 0)]).unwrap();
        assert_eq!(diff.removals().len(), 1);
        assert_eq!(diff.insertions().len(), 1);
    }

    #[test]
    fn test_accepts_crossed_associations() {
        let result = validate_changes([
            Change::remove(1, 0).paired_with(0),
            Change::remove(0, 0).paired_with(1),
            Change::insert(0, 0).paired_with(1),
            Change::insert(1, 0).paired_with(0),
        ]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_rejects_duplicate_offsets() {
        assert_eq!(
            validate_changes([Change::insert(0, 0), Change::insert(0, 0)]),
            Err(MalformedPatch::DuplicateOffset {
                kind: ChangeKind::Insert,
                offset: 0
            })
        );
        assert_eq!(
            validate_changes([Change::remove(0, 0), Change::remove(0, 0)]),
            Err(MalformedPatch::DuplicateOffset {
                kind: ChangeKind::Remove,
                offset: 0
            })
        );
    }

    #[test]
    fn test_rejects_negative_offsets() {
        assert_eq!(
            validate_raw_changes([raw_insert(-1, None)]),
            Err(MalformedPatch::NegativeOffset {
                kind: ChangeKind::Insert,
                offset: -1
            })
        );
        assert!(validate_raw_changes([raw_remove(-1, None)]).is_err());
        assert!(validate_raw_changes([raw_remove(0, None), raw_insert(-1, None)]).is_err());
    }

    #[test]
    fn test_rejects_negative_associations() {
        assert_eq!(
            validate_raw_changes([raw_remove(1, Some(-1))]),
            Err(MalformedPatch::NegativeAssociation {
                kind: ChangeKind::Remove,
                offset: 1,
                associated_with: -1
            })
        );
        assert!(validate_raw_changes([raw_insert(0, Some(-1))]).is_err());
        assert!(validate_raw_changes([raw_remove(0, None), raw_insert(0, Some(-1))]).is_err());
    }

    #[test]
    fn test_rejects_shared_association_targets() {
        assert_eq!(
            validate_changes([
                Change::insert(0, 0).paired_with(0),
                Change::insert(1, 0).paired_with(0),
            ]),
            Err(MalformedPatch::SharedAssociation {
                kind: ChangeKind::Insert,
                associated_with: 0
            })
        );
        assert!(validate_changes([
            Change::remove(0, 0).paired_with(0),
            Change::remove(1, 0).paired_with(0),
        ])
        .is_err());
    }

    #[test]
    fn test_rejects_dangling_association() {
        assert_eq!(
            validate_changes([Change::insert(0, 0).paired_with(3)]),
            Err(MalformedPatch::DanglingAssociation {
                kind: ChangeKind::Insert,
                offset: 0,
                associated_with: 3
            })
        );
    }

    #[test]
    fn test_rejects_association_cycle() {
        // remove(1) -> insert(1) -> remove(0) -> insert(0) -> remove(1)
        let result = validate_changes([
            Change::remove(1, 0).paired_with(1),
            Change::remove(0, 0).paired_with(0),
            Change::insert(0, 0).paired_with(1),
            Change::insert(1, 0).paired_with(0),
        ]);
        assert!(matches!(
            result,
            Err(MalformedPatch::AsymmetricAssociation { .. })
        ));
    }

    #[test]
    fn test_rejects_one_sided_association() {
        let result = validate_changes([Change::remove(2, 0).paired_with(0), Change::insert(0, 0)]);
        assert_eq!(
            result,
            Err(MalformedPatch::AsymmetricAssociation {
                kind: ChangeKind::Remove,
                offset: 2,
                associated_with: 0
            })
        );
    }

    #[test]
    fn test_duplicate_removals_with_associations_rejected() {
        assert!(validate_changes([
            Change::remove(0, 0).paired_with(1),
            Change::remove(0, 0).paired_with(0),
        ])
        .is_err());
    }
}
