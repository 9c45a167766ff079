//! Configured entry point tying diffing, move inference and application
//! together.

use crate::apply::{self, ApplicationConflict};
use crate::config::EngineConfig;
use crate::difference::Difference;
use crate::myers;
use std::hash::Hash;

/// Computes and applies differences according to an [`EngineConfig`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The shortest difference from `source` to `target`, with moves
    /// inferred when `diff.infer_moves` is set.
    pub fn diff<E>(&self, source: &[E], target: &[E]) -> Difference<E>
    where
        E: Clone + Eq + Hash,
    {
        let difference = myers::compute_difference(source, target);
        if self.config.diff.infer_moves {
            difference.inferring_moves()
        } else {
            difference
        }
    }

    /// Apply `difference` to `base` with the configured strategy.
    pub fn apply<E: Clone>(
        &self,
        base: &[E],
        difference: &Difference<E>,
    ) -> Result<Vec<E>, ApplicationConflict> {
        apply::apply_difference(base, difference, self.config.apply.strategy)
    }
}
