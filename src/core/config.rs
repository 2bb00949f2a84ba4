use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::core::providers::Provider;

pub const BASE_URL_ENV: &str = "CPA_BASE_URL";
pub const MANAGEMENT_KEY_ENV: &str = "CPA_MANAGEMENT_KEY";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Accounts with a known remaining fraction below this classify as
    /// Warning
    #[serde(default = "default_warning_threshold")]
    pub warning_threshold: f64,
}

fn default_timeout_secs() -> u64 {
    15
}
fn default_warning_threshold() -> f64 {
    0.2
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_timeout_secs(),
            warning_threshold: default_warning_threshold(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub id: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub base_url: Option<String>,
    pub management_key: Option<String>,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            management_key: None,
            settings: Settings::default(),
            providers: vec![
                ProviderConfig {
                    id: "codex".into(),
                    enabled: true,
                },
                ProviderConfig {
                    id: "antigravity".into(),
                    enabled: true,
                },
            ],
        }
    }
}

impl AppConfig {
    /// Get the config file path, respecting XDG_CONFIG_HOME
    pub fn config_path() -> PathBuf {
        let config_dir = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("~"))
                    .join(".config")
            });
        config_dir.join("quotabar").join("config.toml")
    }

    /// Load config from the default path, falling back to defaults if not found
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Serialize and write this config to the config file path.
    pub fn save(&self) -> Result<PathBuf, std::io::Error> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).expect("Failed to serialize config");
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Environment variables override file values so the host shell can
    /// inject connection settings without a config file.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.is_empty() {
                self.base_url = Some(url);
            }
        }
        if let Ok(key) = std::env::var(MANAGEMENT_KEY_ENV) {
            if !key.is_empty() {
                self.management_key = Some(key);
            }
        }
    }

    /// Tracked providers in config order. An empty provider list tracks
    /// everything known.
    pub fn tracked_providers(&self) -> Vec<Provider> {
        if self.providers.is_empty() {
            return Provider::all().to_vec();
        }
        self.providers
            .iter()
            .filter(|p| p.enabled)
            .filter_map(|p| Provider::from_id(&p.id))
            .collect()
    }

    /// Validate the config
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if let Some(url) = &self.base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                issues.push(format!(
                    "Invalid base_url: '{}' (must start with http:// or https://)",
                    url
                ));
            }
        }
        if self.settings.request_timeout_secs == 0 {
            issues.push("Invalid request_timeout_secs: must be greater than 0".to_string());
        }
        let threshold = self.settings.warning_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            issues.push(format!(
                "Invalid warning_threshold: {} (must be between 0.0 and 1.0)",
                threshold
            ));
        }
        for p in &self.providers {
            if Provider::from_id(&p.id).is_none() {
                issues.push(format!("Unknown provider ID: '{}'", p.id));
            }
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_valid() {
        let config = AppConfig::default();
        let issues = config.validate();
        assert!(
            issues.is_empty(),
            "Default config should be valid, got: {:?}",
            issues
        );
    }

    #[test]
    fn default_tracks_codex_and_antigravity() {
        let config = AppConfig::default();
        assert_eq!(
            config.tracked_providers(),
            vec![Provider::Codex, Provider::Antigravity]
        );
    }

    #[test]
    fn disabled_provider_is_not_tracked() {
        let mut config = AppConfig::default();
        config.providers[1].enabled = false;
        assert_eq!(config.tracked_providers(), vec![Provider::Codex]);
    }

    #[test]
    fn empty_provider_list_tracks_everything() {
        let config = AppConfig {
            providers: vec![],
            ..AppConfig::default()
        };
        assert_eq!(config.tracked_providers(), Provider::all().to_vec());
    }

    #[test]
    fn parse_minimal_toml() {
        let toml = r#"
base_url = "https://proxy.example.com"
management_key = "sk-test"
"#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.base_url.as_deref(), Some("https://proxy.example.com"));
        assert_eq!(config.management_key.as_deref(), Some("sk-test"));
        assert_eq!(config.settings.request_timeout_secs, 15);
        assert!((config.settings.warning_threshold - 0.2).abs() < 1e-10);
    }

    #[test]
    fn parse_provider_toml() {
        let toml = r#"
[[providers]]
id = "codex"

[[providers]]
id = "antigravity"
enabled = false
"#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.providers.len(), 2);
        assert!(config.providers[0].enabled);
        assert!(!config.providers[1].enabled);
        assert_eq!(config.tracked_providers(), vec![Provider::Codex]);
    }

    #[test]
    fn parse_empty_toml_gives_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.settings.request_timeout_secs, 15);
        assert!(config.base_url.is_none());
        assert!(config.management_key.is_none());
    }

    #[test]
    fn validate_catches_bad_scheme() {
        let config = AppConfig {
            base_url: Some("ftp://proxy.example.com".to_string()),
            ..AppConfig::default()
        };
        let issues = config.validate();
        assert!(issues.iter().any(|i| i.contains("base_url")));
    }

    #[test]
    fn validate_catches_bad_threshold() {
        let mut config = AppConfig::default();
        config.settings.warning_threshold = 1.5;
        let issues = config.validate();
        assert!(issues.iter().any(|i| i.contains("warning_threshold")));
    }

    #[test]
    fn validate_catches_zero_timeout() {
        let mut config = AppConfig::default();
        config.settings.request_timeout_secs = 0;
        let issues = config.validate();
        assert!(issues.iter().any(|i| i.contains("request_timeout_secs")));
    }

    #[test]
    fn validate_catches_unknown_provider_id() {
        let mut config = AppConfig::default();
        config.providers.push(ProviderConfig {
            id: "notareal".to_string(),
            enabled: true,
        });
        let issues = config.validate();
        assert!(issues.iter().any(|i| i.contains("Unknown provider")));
    }

    #[test]
    fn apply_env_overrides_file_values() {
        std::env::set_var(BASE_URL_ENV, "https://env.example.com");
        std::env::set_var(MANAGEMENT_KEY_ENV, "env-key");
        let mut config = AppConfig {
            base_url: Some("https://file.example.com".to_string()),
            management_key: Some("file-key".to_string()),
            ..AppConfig::default()
        };
        config.apply_env();
        std::env::remove_var(BASE_URL_ENV);
        std::env::remove_var(MANAGEMENT_KEY_ENV);

        assert_eq!(config.base_url.as_deref(), Some("https://env.example.com"));
        assert_eq!(config.management_key.as_deref(), Some("env-key"));
    }

    #[test]
    fn config_path_uses_xdg_when_set() {
        std::env::set_var("XDG_CONFIG_HOME", "/tmp/test_xdg_config");
        let path = AppConfig::config_path();
        std::env::remove_var("XDG_CONFIG_HOME");
        assert_eq!(
            path,
            PathBuf::from("/tmp/test_xdg_config/quotabar/config.toml")
        );
    }
}
