use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::forecast::SamplingPolicy;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_UNITS: &str = "metric";
pub const DEFAULT_CITY: &str = "London";

/// Dashboard settings stored on disk.
///
/// Example TOML:
/// ```toml
/// default_city = "Berlin"
///
/// [forecast]
/// stride = 8
/// max_entries = 5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Upstream API root; `/weather` and `/forecast` are appended.
    pub base_url: String,

    /// Sent as the `units` query parameter.
    pub units: String,

    /// City loaded on startup and after a new API key is saved.
    pub default_city: String,

    /// Overrides the location of the local storage file holding the API key.
    pub storage_path: Option<PathBuf>,

    pub forecast: SamplingPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            units: DEFAULT_UNITS.to_string(),
            default_city: DEFAULT_CITY.to_string(),
            storage_path: None,
            forecast: SamplingPolicy::default(),
        }
    }
}

impl Config {
    /// Load config from `path`, or defaults if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    /// Where the API key is persisted.
    pub fn storage_file_path(&self) -> Result<PathBuf> {
        match &self.storage_path {
            Some(path) => Ok(path.clone()),
            None => Ok(project_dirs()?.data_dir().join("local_storage.toml")),
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "weather-dashboard", "weather-dashboard")
        .ok_or_else(|| anyhow!("Could not determine platform config directory"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_upstream_conventions() {
        let cfg = Config::default();

        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.units, "metric");
        assert_eq!(cfg.default_city, "London");
        assert_eq!(cfg.forecast, SamplingPolicy { stride: 8, max_entries: 5 });
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_city = \"Oslo\"\n[forecast]\nmax_entries = 3\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();

        assert_eq!(cfg.default_city, "Oslo");
        assert_eq!(cfg.forecast.max_entries, 3);
        assert_eq!(cfg.forecast.stride, 8);
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        let cfg = Config {
            units: "imperial".into(),
            storage_path: Some(dir.path().join("keys.toml")),
            ..Config::default()
        };
        cfg.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn storage_path_override_wins() {
        let cfg = Config {
            storage_path: Some(PathBuf::from("/tmp/custom.toml")),
            ..Config::default()
        };

        assert_eq!(cfg.storage_file_path().unwrap(), PathBuf::from("/tmp/custom.toml"));
    }

    #[test]
    fn invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "forecast = 12").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
