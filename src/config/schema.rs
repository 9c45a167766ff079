use crate::apply::ApplyStrategy;
use serde::Deserialize;

/// Engine settings, read from a TOML document such as:
///
/// ```toml
/// [diff]
/// infer_moves = true
///
/// [apply]
/// strategy = "naive"
/// ```
///
/// Every field has a default, so an empty document is valid.
#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    #[serde(default)]
    pub diff: DiffSettings,
    #[serde(default)]
    pub apply: ApplySettings,
}

#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DiffSettings {
    /// Pair equal removals and insertions into moves after diffing.
    #[serde(default)]
    pub infer_moves: bool,
}

#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ApplySettings {
    #[serde(default)]
    pub strategy: ApplyStrategy,
}
