//! Actor configuration.
//!
//! Every field has a default, so an empty document (or no document at all)
//! yields a usable [`ActorConfig`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use toml::de::Error as TomlError;

pub const DEFAULT_ACTOR_NAME: &str = "ordered-actor";

// Default value functions for serde (bool::default() is false, so only true needs a fn)
const fn default_true() -> bool {
    true
}

fn default_name() -> String {
    DEFAULT_ACTOR_NAME.to_string()
}

/// Tuning for a single ordered actor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActorConfig {
    /// Label attached to the worker's tracing span.
    #[serde(default = "default_name")]
    pub name: String,
    /// Yield to the runtime between items so a busy actor shares its worker
    /// thread with other tasks. Default: true.
    #[serde(default = "default_true")]
    pub fair_yield: bool,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            fair_yield: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read actor config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("failed to parse actor config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: TomlError,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

impl ActorConfig {
    /// Config with the given name and defaults elsewhere.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, TomlError> {
        toml::from_str(raw)
    }

    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), name = %config.name, "Loaded actor config");
        Ok(config)
    }

    /// Like [`ActorConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Read { source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                tracing::debug!(path = %path.display(), "No actor config found; using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }
}
