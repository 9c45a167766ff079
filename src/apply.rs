//! Applying a difference to a base sequence.
//!
//! Two strategies produce the same output and fail on the same inputs:
//!
//! - [`apply_naive`] walks the difference in canonical order, removing and
//!   inserting in place on a copy of the base.
//! - [`apply_fast`] builds the result in a single pass over the base,
//!   skipping removed positions and interleaving insertions.
//!
//! A difference only carries offsets, so compatibility with a base is
//! structural: every removal must land inside the base and every insertion
//! inside the result. Element values at removed positions are not checked.

use crate::change::Change;
use crate::difference::Difference;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Strategy used to apply a difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyStrategy {
    /// Remove and insert in place, one change at a time.
    Naive,
    /// Build the result in one pass.
    #[default]
    Fast,
}

/// The difference does not fit the sequence it was applied to.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApplicationConflict {
    #[error("removal at offset {offset} is out of bounds for a sequence of length {len}")]
    RemovalOutOfBounds { offset: usize, len: usize },

    #[error("insertion at offset {offset} is out of bounds for a sequence of length {len}")]
    InsertionOutOfBounds { offset: usize, len: usize },

    #[error("patched sequence should have length {expected}, but only {actual} elements were produced")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Apply `difference` to `base` with the chosen strategy.
pub fn apply_difference<E: Clone>(
    base: &[E],
    difference: &Difference<E>,
    strategy: ApplyStrategy,
) -> Result<Vec<E>, ApplicationConflict> {
    match strategy {
        ApplyStrategy::Naive => apply_naive(base, difference),
        ApplyStrategy::Fast => apply_fast(base, difference),
    }
}

/// Apply changes one at a time in canonical order.
pub fn apply_naive<E: Clone>(
    base: &[E],
    difference: &Difference<E>,
) -> Result<Vec<E>, ApplicationConflict> {
    let mut result = base.to_vec();

    for change in difference {
        match change {
            Change::Remove { offset, .. } => {
                if *offset >= result.len() {
                    return Err(conflict(ApplicationConflict::RemovalOutOfBounds {
                        offset: *offset,
                        len: result.len(),
                    }));
                }
                result.remove(*offset);
            }
            Change::Insert {
                offset, element, ..
            } => {
                if *offset > result.len() {
                    return Err(conflict(ApplicationConflict::InsertionOutOfBounds {
                        offset: *offset,
                        len: result.len(),
                    }));
                }
                result.insert(*offset, element.clone());
            }
        }
    }

    Ok(result)
}

/// Apply all changes in a single pass over `base`.
pub fn apply_fast<E: Clone>(
    base: &[E],
    difference: &Difference<E>,
) -> Result<Vec<E>, ApplicationConflict> {
    check_bounds(base.len(), difference)?;

    let len = base.len() - difference.removals().len() + difference.insertions().len();
    let mut result = Vec::with_capacity(len);

    // Removals are stored descending; walk them ascending alongside the base.
    let mut removed = difference
        .removals()
        .iter()
        .rev()
        .map(Change::offset)
        .peekable();
    let mut originals = base.iter().enumerate().filter_map(|(index, element)| {
        if removed.next_if_eq(&index).is_some() {
            None
        } else {
            Some(element)
        }
    });
    let mut insertions = difference.insertions().iter().peekable();

    for offset in 0..len {
        let element = match insertions.next_if(|change| change.offset() == offset) {
            Some(change) => change.element(),
            None => originals.next().ok_or_else(|| {
                conflict(ApplicationConflict::LengthMismatch {
                    expected: len,
                    actual: offset,
                })
            })?,
        };
        result.push(element.clone());
    }

    Ok(result)
}

/// Reject the same differences [`apply_naive`] would, with the same error.
fn check_bounds<E>(base_len: usize, difference: &Difference<E>) -> Result<(), ApplicationConflict> {
    // The first removal has the highest offset.
    if let Some(first) = difference.removals().first() {
        if first.offset() >= base_len {
            return Err(conflict(ApplicationConflict::RemovalOutOfBounds {
                offset: first.offset(),
                len: base_len,
            }));
        }
    }

    // Insertion i sees a sequence of base_len - removals + i elements.
    let remaining = base_len - difference.removals().len();
    for (applied, change) in difference.insertions().iter().enumerate() {
        let len = remaining + applied;
        if change.offset() > len {
            return Err(conflict(ApplicationConflict::InsertionOutOfBounds {
                offset: change.offset(),
                len,
            }));
        }
    }

    Ok(())
}

fn conflict(error: ApplicationConflict) -> ApplicationConflict {
    log::debug!("patch does not apply: {error}");
    error
}
