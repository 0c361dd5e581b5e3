use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

/// Default API endpoint used when no configuration is present.
pub const DEFAULT_API_URL: &str = "https://sm-api-962561856383.europe-west1.run.app/api";

const CONFIG_FILE: &str = "config.toml";

/// Application configuration, loaded from `config.toml` in the config
/// directory and overridable from the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the student-management API.
    pub api_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Theme name ("dark" or "light").
    pub theme: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: 10,
            theme: "dark".to_string(),
        }
    }
}

impl Config {
    /// Resolve the configuration directory, creating it if needed.
    pub fn config_dir(override_dir: Option<PathBuf>) -> Result<PathBuf> {
        let dir = match override_dir {
            Some(dir) => dir,
            None => dirs::config_dir()
                .ok_or_else(|| anyhow!("cannot determine config directory"))?
                .join("cohort"),
        };

        if !dir.exists() {
            fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create config directory {}", dir.display()))?;
        }

        Ok(dir)
    }

    /// Load the configuration from `dir`, falling back to defaults when
    /// the file does not exist yet.
    pub fn load(override_dir: Option<PathBuf>) -> Result<Self> {
        let dir = Self::config_dir(override_dir)?;
        let path = dir.join(CONFIG_FILE);

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from_file(&path)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("invalid configuration in {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    /// Write a default configuration file if none exists; returns its path.
    pub fn init(override_dir: Option<PathBuf>) -> Result<PathBuf> {
        let dir = Self::config_dir(override_dir)?;
        let path = dir.join(CONFIG_FILE);

        if !path.exists() {
            Self::default().save_to_file(&path)?;
        }

        Ok(path)
    }

    /// Apply command-line overrides on top of the loaded file.
    pub fn apply_overrides(&mut self, api_url: Option<&str>) {
        if let Some(api_url) = api_url {
            self.api_url = api_url.to_string();
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(Some(temp_dir.path().to_path_buf())).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn test_partial_file_keeps_defaults_for_the_rest() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, "api_url = \"http://localhost:3000/api\"\n").unwrap();

        let config = Config::load(Some(temp_dir.path().to_path_buf())).unwrap();
        assert_eq!(config.api_url, "http://localhost:3000/api");
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE);

        let mut config = Config::default();
        config.api_url = "http://localhost:8080/api".to_string();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.api_url, "http://localhost:8080/api");
    }

    #[test]
    fn test_overrides_win_over_file_values() {
        let mut config = Config::default();
        config.apply_overrides(Some("http://localhost:9999/api"));
        assert_eq!(config.api_url, "http://localhost:9999/api");

        config.apply_overrides(None);
        assert_eq!(config.api_url, "http://localhost:9999/api");
    }
}
