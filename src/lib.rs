//! Ordered Diff: minimal edit scripts between ordered sequences
//!
//! Computes, validates, transforms and applies the difference between two
//! ordered sequences of any element type with equality.
//!
//! # Architecture
//!
//! Every operation works on a single representation: [`Difference`], an
//! immutable set of [`Change`]s (removals at source offsets, insertions at
//! target offsets) held in canonical order.
//!
//! - [`compute_difference`] finds the shortest edit script (Myers' search).
//! - [`Difference::from_changes`] validates caller-supplied changes.
//! - [`Difference::inferring_moves`] pairs equal removals and insertions.
//! - [`apply_difference`] applies a difference to a base sequence, with a
//!   naive in-place strategy or a single-pass one.
//!
//! # Guarantees
//!
//! - Identical inputs always produce identical differences
//! - Malformed change lists are rejected whole, never partially accepted
//! - A difference that does not fit its base is reported as a conflict
//! - No shared mutable state; a `Difference` may be shared across threads
//!
//! # Example
//!
//! ```
//! use ordered_diff::{compute_difference, Change};
//!
//! let source = ["A", "B", "C"];
//! let target = ["A", "C"];
//!
//! let diff = compute_difference(&source, &target);
//! assert_eq!(diff.iter().collect::<Vec<_>>(), [&Change::remove(1, "B")]);
//!
//! match diff.apply(&source) {
//!     Ok(patched) => assert_eq!(patched, target),
//!     Err(conflict) => eprintln!("Patch failed: {}", conflict),
//! }
//! ```

pub mod apply;
pub mod change;
pub mod config;
pub mod difference;
pub mod engine;
mod moves;
pub mod myers;
pub mod pool;
pub mod validate;

// Re-exports
pub use apply::{apply_difference, apply_fast, apply_naive, ApplicationConflict, ApplyStrategy};
pub use change::{Change, ChangeKind};
pub use config::{load_from_path, load_from_str, load_or_default, ConfigError, EngineConfig};
pub use difference::Difference;
pub use engine::Engine;
pub use myers::{compute_difference, compute_difference_by, EditGraph};
pub use validate::{MalformedPatch, RawChange};
