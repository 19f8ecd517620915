use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::SenseiError;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct SenseiConfig {
    pub log: LogConfig,
    pub storage: StorageConfig,
    pub sensei: ChatConfig,
    pub access: AccessConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// `sqlite` or `json`.
    pub backend: String,
    pub db_path: String,
    /// Directory holding `vocab.json`, `chat_history.json` and `flashcards.json`.
    pub data_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ChatConfig {
    pub api_base: String,
    pub model: String,
    pub max_tokens: u32,
    /// Never read from the TOML file; only from `OPENAI_API_KEY`.
    #[serde(skip)]
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AccessConfig {
    pub secret: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let dir = default_sensei_dir();
        Self {
            backend: "sqlite".into(),
            db_path: dir.join("sensei.db").to_string_lossy().into_owned(),
            data_dir: dir.to_string_lossy().into_owned(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".into(),
            model: "gpt-3.5-turbo".into(),
            max_tokens: 150,
            api_key: None,
        }
    }
}

/// Returns `~/.chatsensei/`
pub fn default_sensei_dir() -> PathBuf {
    dirs::home_dir()
        .expect("home directory must exist")
        .join(".chatsensei")
}

/// Returns the default config file path: `~/.chatsensei/config.toml`
pub fn default_config_path() -> PathBuf {
    default_sensei_dir().join("config.toml")
}

impl SenseiConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            SenseiConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("OPENAI_API_KEY") {
            if !val.trim().is_empty() {
                self.sensei.api_key = Some(val);
            }
        }
        if let Ok(val) = std::env::var("CHATSENSEI_ACCESS_SECRET") {
            self.access.secret = Some(val);
        }
        if let Ok(val) = std::env::var("CHATSENSEI_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("CHATSENSEI_DATA_DIR") {
            self.storage.data_dir = val;
        }
        if let Ok(val) = std::env::var("CHATSENSEI_BACKEND") {
            self.storage.backend = val;
        }
        if let Ok(val) = std::env::var("CHATSENSEI_LOG_LEVEL") {
            self.log.level = val;
        }
        if let Ok(val) = std::env::var("CHATSENSEI_MODEL") {
            self.sensei.model = val;
        }
        if let Ok(val) = std::env::var("CHATSENSEI_API_BASE") {
            self.sensei.api_base = val;
        }
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }

    pub fn resolved_data_dir(&self) -> PathBuf {
        expand_tilde(&self.storage.data_dir)
    }

    /// The API credential, or [`SenseiError::MissingApiKey`] when unset.
    pub fn require_api_key(&self) -> Result<&str, SenseiError> {
        self.sensei
            .api_key
            .as_deref()
            .ok_or(SenseiError::MissingApiKey)
    }

    /// Check an answer against the configured access secret.
    /// Always passes when no secret is configured.
    pub fn check_access(&self, answer: &str) -> Result<(), SenseiError> {
        match self.access.secret.as_deref() {
            Some(secret) if !secret.is_empty() && secret != answer.trim() => {
                Err(SenseiError::AccessDenied)
            }
            _ => Ok(()),
        }
    }

    pub fn gate_enabled(&self) -> bool {
        self.access
            .secret
            .as_deref()
            .is_some_and(|s| !s.is_empty())
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        dirs::home_dir()
            .expect("home directory must exist")
            .join(rest)
    } else {
        PathBuf::from(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SenseiConfig::default();
        assert_eq!(config.log.level, "info");
        assert_eq!(config.storage.backend, "sqlite");
        assert_eq!(config.sensei.model, "gpt-3.5-turbo");
        assert_eq!(config.sensei.max_tokens, 150);
        assert!(config.storage.db_path.ends_with("sensei.db"));
        assert!(config.access.secret.is_none());
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[log]
level = "debug"

[storage]
backend = "json"
data_dir = "/tmp/sensei-data"

[sensei]
max_tokens = 300
"#;
        let config: SenseiConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.storage.backend, "json");
        assert_eq!(config.storage.data_dir, "/tmp/sensei-data");
        assert_eq!(config.sensei.max_tokens, 300);
        // defaults still apply for unset fields
        assert_eq!(config.sensei.model, "gpt-3.5-turbo");
        assert!(config.storage.db_path.ends_with("sensei.db"));
    }

    #[test]
    fn api_key_is_not_read_from_toml() {
        let config: SenseiConfig = toml::from_str("[sensei]\napi_key = \"sk-file\"\n").unwrap();
        assert!(config.sensei.api_key.is_none());
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = SenseiConfig::default();
        std::env::set_var("OPENAI_API_KEY", "sk-test");
        std::env::set_var("CHATSENSEI_DB", "/tmp/override.db");
        std::env::set_var("CHATSENSEI_BACKEND", "json");
        std::env::set_var("CHATSENSEI_LOG_LEVEL", "trace");

        config.apply_env_overrides();

        assert_eq!(config.require_api_key().unwrap(), "sk-test");
        assert_eq!(config.storage.db_path, "/tmp/override.db");
        assert_eq!(config.storage.backend, "json");
        assert_eq!(config.log.level, "trace");

        // Clean up
        std::env::remove_var("OPENAI_API_KEY");
        std::env::remove_var("CHATSENSEI_DB");
        std::env::remove_var("CHATSENSEI_BACKEND");
        std::env::remove_var("CHATSENSEI_LOG_LEVEL");
    }

    #[test]
    fn missing_api_key_is_reported() {
        let config = SenseiConfig::default();
        assert!(matches!(
            config.require_api_key(),
            Err(SenseiError::MissingApiKey)
        ));
    }

    #[test]
    fn access_gate() {
        let mut config = SenseiConfig::default();
        assert!(!config.gate_enabled());
        assert!(config.check_access("anything").is_ok());

        config.access.secret = Some("ikimasu".into());
        assert!(config.gate_enabled());
        assert!(config.check_access("ikimasu\n").is_ok());
        assert!(matches!(
            config.check_access("wrong"),
            Err(SenseiError::AccessDenied)
        ));
    }
}
