//! Reading [`EngineConfig`] from TOML.
//!
//! A missing file is an error for [`load_from_path`] but means "use the
//! defaults" for [`load_or_default`]. Parse errors carry the file they came
//! from whenever there is one.

use crate::config::schema::EngineConfig;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read engine config {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("invalid engine config{}: {source}", origin(.path))]
    Toml {
        path: Option<PathBuf>,
        source: toml_edit::de::Error,
    },
}

fn origin(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|path| format!(" in {}", path.display()))
        .unwrap_or_default()
}

/// Parse an engine config document. Every section and key is optional.
pub fn load_from_str(input: &str) -> Result<EngineConfig, ConfigError> {
    parse(input, None)
}

/// Read and parse the engine config at `path`.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<EngineConfig, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&contents, Some(path))
}

/// Like [`load_from_path`], but a file that does not exist yields the
/// default config. Other I/O failures are still reported.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<EngineConfig, ConfigError> {
    let path = path.as_ref();
    match load_from_path(path) {
        Err(ConfigError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            log::debug!("no engine config at {}, using defaults", path.display());
            Ok(EngineConfig::default())
        }
        other => other,
    }
}

fn parse(input: &str, path: Option<&Path>) -> Result<EngineConfig, ConfigError> {
    let config: EngineConfig = toml_edit::de::from_str(input).map_err(|source| {
        ConfigError::Toml {
            path: path.map(Path::to_path_buf),
            source,
        }
    })?;
    log::debug!("loaded engine config: {config:?}");
    Ok(config)
}
