use serde::Serialize;
use std::fmt;

/// The atomic edit primitive: one element removed from the source or
/// inserted into the target.
///
/// A removal's `offset` indexes the source as it was before any removal is
/// applied. An insertion's `offset` indexes the target as it is after every
/// removal and every earlier insertion. `associated_with` names the offset of
/// the change of the opposite kind this one is paired with, which expresses a
/// move.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Change<E> {
    Remove {
        offset: usize,
        element: E,
        associated_with: Option<usize>,
    },
    Insert {
        offset: usize,
        element: E,
        associated_with: Option<usize>,
    },
}

/// Which side of a difference a change belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChangeKind {
    Remove,
    Insert,
}

impl ChangeKind {
    pub fn opposite(self) -> Self {
        match self {
            ChangeKind::Remove => ChangeKind::Insert,
            ChangeKind::Insert => ChangeKind::Remove,
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeKind::Remove => write!(f, "removal"),
            ChangeKind::Insert => write!(f, "insertion"),
        }
    }
}

impl<E> Change<E> {
    /// An unassociated removal of `element` at source `offset`.
    pub fn remove(offset: usize, element: E) -> Self {
        Change::Remove {
            offset,
            element,
            associated_with: None,
        }
    }

    /// An unassociated insertion of `element` at target `offset`.
    pub fn insert(offset: usize, element: E) -> Self {
        Change::Insert {
            offset,
            element,
            associated_with: None,
        }
    }

    /// Pair this change with the opposite-kind change at `offset`.
    pub fn paired_with(self, offset: usize) -> Self {
        self.with_association(Some(offset))
    }

    pub(crate) fn with_association(self, association: Option<usize>) -> Self {
        match self {
            Change::Remove {
                offset, element, ..
            } => Change::Remove {
                offset,
                element,
                associated_with: association,
            },
            Change::Insert {
                offset, element, ..
            } => Change::Insert {
                offset,
                element,
                associated_with: association,
            },
        }
    }

    pub fn kind(&self) -> ChangeKind {
        match self {
            Change::Remove { .. } => ChangeKind::Remove,
            Change::Insert { .. } => ChangeKind::Insert,
        }
    }

    pub fn is_removal(&self) -> bool {
        matches!(self, Change::Remove { .. })
    }

    pub fn is_insertion(&self) -> bool {
        matches!(self, Change::Insert { .. })
    }

    pub fn offset(&self) -> usize {
        match self {
            Change::Remove { offset, .. } | Change::Insert { offset, .. } => *offset,
        }
    }

    pub fn element(&self) -> &E {
        match self {
            Change::Remove { element, .. } | Change::Insert { element, .. } => element,
        }
    }

    pub fn into_element(self) -> E {
        match self {
            Change::Remove { element, .. } | Change::Insert { element, .. } => element,
        }
    }

    /// Offset of the paired change, if this change is half of a move.
    pub fn association(&self) -> Option<usize> {
        match self {
            Change::Remove {
                associated_with, ..
            }
            | Change::Insert {
                associated_with, ..
            } => *associated_with,
        }
    }

    /// The same edit seen from the other direction: a removal becomes an
    /// insertion at the same offset and vice versa.
    pub fn inverted(self) -> Self {
        match self {
            Change::Remove {
                offset,
                element,
                associated_with,
            } => Change::Insert {
                offset,
                element,
                associated_with,
            },
            Change::Insert {
                offset,
                element,
                associated_with,
            } => Change::Remove {
                offset,
                element,
                associated_with,
            },
        }
    }

    pub fn map<U>(self, f: impl FnOnce(E) -> U) -> Change<U> {
        match self {
            Change::Remove {
                offset,
                element,
                associated_with,
            } => Change::Remove {
                offset,
                element: f(element),
                associated_with,
            },
            Change::Insert {
                offset,
                element,
                associated_with,
            } => Change::Insert {
                offset,
                element: f(element),
                associated_with,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_equality_differs_by_kind() {
        assert_ne!(
            Change::insert(0, 0).paired_with(0),
            Change::remove(0, 0).paired_with(0)
        );
        assert_ne!(
            Change::remove(0, 0).paired_with(0),
            Change::insert(0, 0).paired_with(0)
        );
    }

    #[test]
    fn test_change_equality_differs_by_offset_element_and_association() {
        let makers: [fn(usize, i32) -> Change<i32>; 2] = [Change::insert, Change::remove];
        for make in makers {
            assert_ne!(make(0, 0).paired_with(0), make(1, 0).paired_with(0));
            assert_ne!(make(0, 0).paired_with(0), make(0, 1).paired_with(0));
            assert_ne!(make(0, 0).paired_with(0), make(0, 0).paired_with(1));
            assert_ne!(make(0, 0), make(0, 0).paired_with(0));
            assert_eq!(make(3, 7).paired_with(2), make(3, 7).paired_with(2));
        }
    }

    #[test]
    fn test_inverted_keeps_payload() {
        let change = Change::remove(4, "Tree").paired_with(6);
        let inverted = change.clone().inverted();

        assert_eq!(inverted, Change::insert(4, "Tree").paired_with(6));
        assert_eq!(inverted.inverted(), change);
    }

    #[test]
    fn test_accessors() {
        let change = Change::insert(3, "Gelt");
        assert_eq!(change.kind(), ChangeKind::Insert);
        assert!(change.is_insertion());
        assert!(!change.is_removal());
        assert_eq!(change.offset(), 3);
        assert_eq!(*change.element(), "Gelt");
        assert_eq!(change.association(), None);
        assert_eq!(change.map(str::len), Change::insert(3, 4));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ChangeKind::Remove.to_string(), "removal");
        assert_eq!(ChangeKind::Insert.opposite().to_string(), "removal");
    }
}
