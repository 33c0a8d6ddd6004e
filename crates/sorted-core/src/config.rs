use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::SortedError;

/// Top-level configuration, stored at `~/.config/sorted/config.toml`.
/// Constructed once at process start and passed by reference into the
/// store and cache; there is no global settings state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortedConfig {
    /// Default directory scanned for collection files.
    #[serde(default = "default_collections_dir")]
    pub collections_dir: PathBuf,

    /// Root of the per-service metadata cache.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Where trashed collections are moved (recoverable deletion).
    #[serde(default = "default_trash_dir")]
    pub trash_dir: PathBuf,

    /// Whether dedup also requires matching media kinds, not just
    /// matching locators.
    #[serde(default = "default_type_strict")]
    pub type_strict_dedup: bool,
}

fn default_collections_dir() -> PathBuf {
    data_root().join("collections")
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sorted")
}

fn default_trash_dir() -> PathBuf {
    data_root().join("trash")
}

fn default_type_strict() -> bool {
    true
}

fn data_root() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sorted")
}

impl Default for SortedConfig {
    fn default() -> Self {
        Self {
            collections_dir: default_collections_dir(),
            cache_dir: default_cache_dir(),
            trash_dir: default_trash_dir(),
            type_strict_dedup: true,
        }
    }
}

impl SortedConfig {
    /// Returns the config directory (`~/.config/sorted/`).
    pub fn config_dir() -> Result<PathBuf, SortedError> {
        let base = dirs::config_dir().ok_or_else(|| SortedError::Config {
            message: "could not determine config directory".into(),
        })?;
        Ok(base.join("sorted"))
    }

    /// Returns the path to the config file.
    pub fn config_path() -> Result<PathBuf, SortedError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from the default location, or return defaults if not found.
    pub fn load() -> Result<Self, SortedError> {
        let path = Self::config_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, SortedError> {
        tracing::debug!("loading config from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| SortedError::Serialization(e.to_string()))
    }

    /// Save config to the default location.
    pub fn save(&self) -> Result<(), SortedError> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Save config to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), SortedError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| SortedError::Serialization(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Initialize the config directory with default config.
    pub fn init() -> Result<PathBuf, SortedError> {
        let dir = Self::config_dir()?;
        std::fs::create_dir_all(&dir)?;

        let config_path = Self::config_path()?;
        if !config_path.exists() {
            Self::default().save_to(&config_path)?;
        }

        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_roundtrip() {
        let config = SortedConfig::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: SortedConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(config.collections_dir, deserialized.collections_dir);
        assert_eq!(config.type_strict_dedup, deserialized.type_strict_dedup);
    }

    #[test]
    fn test_defaults_apply_to_partial_file() {
        let config: SortedConfig = toml::from_str("type_strict_dedup = false\n").unwrap();
        assert!(!config.type_strict_dedup);
        assert_eq!(config.cache_dir, default_cache_dir());
    }

    #[test]
    fn test_save_and_load_from() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = SortedConfig::default();
        config.type_strict_dedup = false;
        config.save_to(&path).unwrap();

        let loaded = SortedConfig::load_from(&path).unwrap();
        assert!(!loaded.type_strict_dedup);
    }
}
