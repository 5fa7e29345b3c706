use crate::model::PackageManager;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Terminal width below which the modal becomes a bottom drawer
pub const DEFAULT_NARROW_BREAKPOINT: u16 = 100;

const DEFAULT_TICK_RATE_MS: u64 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog file to open when none is given on the command line
    pub catalog_path: Option<PathBuf>,
    /// Package manager install commands are shown for
    pub package_manager: PackageManager,
    pub narrow_breakpoint: u16,
    pub tick_rate_ms: u64,
    /// Write usage events to the log
    pub analytics: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            package_manager: PackageManager::default(),
            narrow_breakpoint: DEFAULT_NARROW_BREAKPOINT,
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            analytics: true,
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".shelf"))
    }

    /// Location of `config.json`
    pub fn path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Load the user config, falling back to defaults
    pub fn load() -> Config {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Config::default(),
        }
    }

    fn load_from(path: &Path) -> Config {
        if !path.exists() {
            return Config::default();
        }

        let parsed = fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|contents| serde_json::from_str(&contents).map_err(|e| e.to_string()));

        match parsed {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring invalid config {}: {}", path.display(), e);
                Config::default()
            }
        }
    }

    /// Save the config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.json"));
        assert_eq!(config, Config::default());
        assert_eq!(config.narrow_breakpoint, 100);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"package_manager": "pnpm"}"#).unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.package_manager, PackageManager::Pnpm);
        assert_eq!(config.tick_rate_ms, 100);
        assert_eq!(config.catalog_path, None);
    }

    #[test]
    fn test_invalid_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            catalog_path: Some(PathBuf::from("/tmp/catalog.yaml")),
            package_manager: PackageManager::Bun,
            narrow_breakpoint: 80,
            tick_rate_ms: 50,
            analytics: false,
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path), config);
    }
}
