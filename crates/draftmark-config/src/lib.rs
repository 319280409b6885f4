//! Converter settings stored as TOML.
//!
//! ```toml
//! [options]
//! italic_marker = "underscore"
//! hard_line_breaks = false
//! max_matches_per_block = 200
//! ```

use anyhow::Context;
use draftmark_engine::{Converter, Options};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "DRAFTMARK_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "~/.config/draftmark/config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read draftmark config {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid TOML in draftmark config {path}: {source}")]
    InvalidToml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Draftmark config {path} sets max_matches_per_block = 0, which disables inline parsing")]
    ZeroMatchLimit { path: PathBuf },
}

/// Settings file contents. Missing fields take their defaults, so an empty
/// file is a valid config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub options: Options,
}

impl Config {
    /// Parses config text; `path` only labels errors.
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|source| ConfigError::InvalidToml {
            path: path.to_path_buf(),
            source,
        })?;

        if config.options.max_matches_per_block == Some(0) {
            return Err(ConfigError::ZeroMatchLimit {
                path: path.to_path_buf(),
            });
        }
        Ok(config)
    }

    /// Reads the config at `path`. A missing file is `Ok(None)`.
    pub fn read_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no config at {}", path.display());
                return Ok(None);
            }
            Err(source) => {
                return Err(ConfigError::Unreadable {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config = Self::from_toml(&content, path)?;
        log::debug!("loaded config from {}", path.display());
        Ok(Some(config))
    }

    /// Reads the config from [`Config::path`], falling back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self::read_from(&Self::path())?.unwrap_or_default())
    }

    pub fn write_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating config directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("writing config to {}", path.display()))?;
        Ok(())
    }

    /// The config file location: `$DRAFTMARK_CONFIG` when set, otherwise
    /// `~/.config/draftmark/config.toml`.
    pub fn path() -> PathBuf {
        resolve_path(std::env::var(CONFIG_PATH_ENV).ok().as_deref())
    }

    /// A converter using these options.
    pub fn converter(&self) -> Converter {
        Converter::new(self.options.clone())
    }
}

/// Expands `~` and environment variables in an override, or in the default
/// location when there is none. Unexpandable input is used as written.
fn resolve_path(override_path: Option<&str>) -> PathBuf {
    let raw = override_path
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .unwrap_or(DEFAULT_CONFIG_PATH);
    match shellexpand::full(raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => PathBuf::from(raw),
    }
}
