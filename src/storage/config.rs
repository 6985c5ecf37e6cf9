use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub events: EventsConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub offline_mode: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EventsConfig {
    pub municipality: Option<String>,
    pub idle_timeout_ms: u64,
    pub offline_dataset: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub language: String,
    pub theme: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout_seconds: 10,
            offline_mode: false,
        }
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            municipality: None,
            idle_timeout_ms: 200,
            offline_dataset: None,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            language: "es-MX".to_string(),
            theme: "default".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    pub fn load_or_create() -> Result<Self, ConfigError> {
        Self::load_or_create_at(&Self::config_path())
    }

    pub fn load_or_create_at(config_path: &Path) -> Result<Self, ConfigError> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            Self::from_toml(&content)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            tracing::info!("Wrote default config to {}", config_path.display());
            Ok(config)
        }
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("civic-pulse")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;

        Ok(())
    }

    pub fn idle_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.events.idle_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_targets_local_api() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert_eq!(config.api.timeout_seconds, 10);
        assert!(!config.api.offline_mode);
    }

    #[test]
    fn default_config_uses_mexican_spanish() {
        let config = Config::default();
        assert_eq!(config.ui.language, "es-MX");
    }

    #[test]
    fn default_idle_timeout_is_bounded() {
        let config = Config::default();
        assert_eq!(config.idle_timeout(), std::time::Duration::from_millis(200));
    }

    #[test]
    fn parse_valid_toml_config() {
        let toml_content = r#"
            [api]
            base_url = "https://civic.example.org/api"
            timeout_seconds = 5
            offline_mode = true

            [events]
            municipality = "Guadalajara"
            idle_timeout_ms = 500

            [ui]
            language = "en-US"
            theme = "nord"
        "#;

        let config = Config::from_toml(toml_content).unwrap();

        assert_eq!(config.api.base_url, "https://civic.example.org/api");
        assert!(config.api.offline_mode);
        assert_eq!(config.events.municipality.as_deref(), Some("Guadalajara"));
        assert_eq!(config.events.idle_timeout_ms, 500);
        assert_eq!(config.ui.language, "en-US");
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config = Config::from_toml("[events]\nmunicipality = \"CDMX\"\n").unwrap();

        assert_eq!(config.events.municipality.as_deref(), Some("CDMX"));
        assert_eq!(config.events.idle_timeout_ms, 200);
        assert_eq!(config.api, ApiConfig::default());
        assert_eq!(config.ui, UiConfig::default());
    }

    #[test]
    fn parse_invalid_toml_returns_error() {
        let invalid_toml = "this is not valid toml";
        let result = Config::from_toml(invalid_toml);
        assert!(result.is_err());
    }

    #[test]
    fn creates_default_file_when_missing_and_reads_it_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let created = Config::load_or_create_at(&path).unwrap();
        assert!(path.exists());

        let mut edited = created.clone();
        edited.events.municipality = Some("Monterrey".to_string());
        edited.save_to(&path).unwrap();

        let reloaded = Config::load_or_create_at(&path).unwrap();
        assert_eq!(reloaded, edited);
    }
}
