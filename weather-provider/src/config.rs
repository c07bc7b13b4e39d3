use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "RAPID_API_KEY";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// rapid_api_key = "..."
/// request_timeout_secs = 30
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Key sent as `x-rapidapi-key` on every request.
    pub rapid_api_key: Option<String>,

    /// Per-request timeout; unset or 0 falls back to 30 seconds.
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply `RAPID_API_KEY` from the process environment, if set and non-empty.
    pub fn with_env_overrides(self) -> Self {
        self.with_api_key_override(std::env::var(API_KEY_ENV).ok())
    }

    fn with_api_key_override(mut self, value: Option<String>) -> Self {
        if let Some(key) = value.filter(|k| !k.trim().is_empty()) {
            self.rapid_api_key = Some(key);
        }
        self
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "rapid-weather", "rapid-weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.rapid_api_key = Some(api_key);
    }

    pub fn api_key(&self) -> Option<&str> {
        self.rapid_api_key.as_deref().filter(|k| !k.is_empty())
    }

    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }

    pub fn request_timeout(&self) -> Duration {
        let secs = self.request_timeout_secs.filter(|s| *s > 0).unwrap_or(DEFAULT_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_key() {
        let cfg = Config::default();

        assert!(!cfg.is_configured());
        assert_eq!(cfg.api_key(), None);
        assert_eq!(cfg.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn set_api_key_marks_configured() {
        let mut cfg = Config::default();
        cfg.set_api_key("RAPID_KEY".into());

        assert!(cfg.is_configured());
        assert_eq!(cfg.api_key(), Some("RAPID_KEY"));
    }

    #[test]
    fn empty_key_is_treated_as_missing() {
        let mut cfg = Config::default();
        cfg.set_api_key(String::new());

        assert!(!cfg.is_configured());
    }

    #[test]
    fn parses_toml() {
        let cfg = Config::from_toml("rapid_api_key = \"abc\"\nrequest_timeout_secs = 5\n")
            .expect("valid toml");

        assert_eq!(cfg.api_key(), Some("abc"));
        assert_eq!(cfg.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn zero_timeout_falls_back_to_default() {
        let cfg = Config::from_toml("rapid_api_key = \"k\"\nrequest_timeout_secs = 0\n")
            .expect("valid toml");

        assert_eq!(cfg.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn env_override_replaces_stored_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".into());

        let cfg = cfg.with_api_key_override(Some("ENV_KEY".into()));
        assert_eq!(cfg.api_key(), Some("ENV_KEY"));
    }

    #[test]
    fn blank_env_override_is_ignored() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".into());

        let cfg = cfg.with_api_key_override(Some("  ".into())).with_api_key_override(None);
        assert_eq!(cfg.api_key(), Some("FILE_KEY"));
    }

    #[test]
    fn toml_roundtrip_through_save_format() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());

        let text = toml::to_string_pretty(&cfg).unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), cfg);
    }
}
