//! Configuration Management
//!
//! Connection settings for snipeit, read from a JSON or YAML file.
//! Command-line flags and environment variables take precedence.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::snipeit::client::DEFAULT_TIMEOUT;

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the Snipe-IT instance
    #[serde(default)]
    pub snipe_url: Option<String>,
    /// API key (personal access token)
    #[serde(default)]
    pub api_key: Option<String>,
    /// Request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Default config file that existed but failed to load
    #[serde(skip)]
    pub ignored_file: Option<PathBuf>,
}

impl Config {
    /// Get the default config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("snipeit").join("config.json"))
    }

    /// Load configuration from the default location.
    /// A missing or unreadable default file yields an empty config.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_or_default(&path),
            None => Self::default(),
        }
    }

    /// Load `path` if it exists; a broken file is remembered in `ignored_file`
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring config file {:?}: {:#}", path, e);
                Self {
                    ignored_file: Some(path.to_path_buf()),
                    ..Self::default()
                }
            }
        }
    }

    /// Load configuration from an explicit path; `.yaml`/`.yml` parse as YAML
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );

        if is_yaml {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config {}", path.display()))
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config {}", path.display()))
        }
    }

    /// Get effective base URL (CLI/env > config)
    pub fn effective_url(&self, flag: Option<&str>) -> Result<String> {
        non_empty(flag)
            .or_else(|| non_empty(self.snipe_url.as_deref()))
            .with_context(|| {
                self.missing_message("No Snipe-IT URL configured. Set SNIPEIT_URL or use --snipe-url")
            })
    }

    /// Get effective API key (CLI/env > config)
    pub fn effective_api_key(&self, flag: Option<&str>) -> Result<String> {
        non_empty(flag)
            .or_else(|| non_empty(self.api_key.as_deref()))
            .with_context(|| {
                self.missing_message(
                    "No Snipe-IT API key configured. Set SNIPEIT_API_KEY or use --api-key",
                )
            })
    }

    fn missing_message(&self, base: &str) -> String {
        match &self.ignored_file {
            Some(path) => format!("{} (config file {} could not be loaded)", base, path.display()),
            None => base.to_string(),
        }
    }

    pub fn effective_timeout(&self) -> Duration {
        self.timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_json_config() {
        let file = write_config(
            ".json",
            r#"{"snipe_url": "https://snipeit.example.com", "api_key": "abc", "timeout_secs": 5}"#,
        );
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.snipe_url.as_deref(), Some("https://snipeit.example.com"));
        assert_eq!(config.api_key.as_deref(), Some("abc"));
        assert_eq!(config.effective_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_load_yaml_config() {
        let file = write_config(".yml", "snipe_url: http://localhost:8080\napi_key: xyz\n");
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.snipe_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(config.timeout_secs, None);
        assert_eq!(config.effective_timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_load_invalid_config_fails() {
        let file = write_config(".json", "{not json");
        assert!(Config::load_from(file.path()).is_err());
    }

    #[test]
    fn test_flag_overrides_config() {
        let config = Config {
            snipe_url: Some("https://from-config".into()),
            api_key: Some("config-key".into()),
            timeout_secs: None,
            ignored_file: None,
        };
        assert_eq!(config.effective_url(Some("https://from-flag")).unwrap(), "https://from-flag");
        assert_eq!(config.effective_url(None).unwrap(), "https://from-config");
        assert_eq!(config.effective_api_key(None).unwrap(), "config-key");
    }

    #[test]
    fn test_missing_values_error() {
        let config = Config::default();
        assert!(config.effective_url(None).is_err());
        assert!(config.effective_api_key(Some("  ")).is_err());
    }

    #[test]
    fn test_broken_default_config_is_named_in_error() {
        let file = write_config(".json", "{not json");
        let config = Config::load_or_default(file.path());
        assert_eq!(config.ignored_file.as_deref(), Some(file.path()));

        let err = config.effective_url(None).unwrap_err();
        assert!(err.to_string().contains(&file.path().display().to_string()));
        assert!(config.effective_api_key(None).unwrap_err().to_string().contains("could not be loaded"));
    }

    #[test]
    fn test_missing_default_config_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.json"));
        assert_eq!(config, Config::default());
        assert_eq!(
            config.effective_url(None).unwrap_err().to_string(),
            "No Snipe-IT URL configured. Set SNIPEIT_URL or use --snipe-url"
        );
    }

    #[test]
    fn test_blank_flag_falls_back_to_config() {
        let config = Config {
            snipe_url: None,
            api_key: Some("config-key".into()),
            timeout_secs: None,
            ignored_file: None,
        };
        assert_eq!(config.effective_api_key(Some("")).unwrap(), "config-key");
    }
}
