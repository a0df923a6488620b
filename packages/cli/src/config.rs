use anyhow::Context;
use drafter_assistant::{GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use drafter_editor::DEFAULT_HISTORY_DEPTH;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "drafter.config.json";

/// Drafter configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Model used for drafts and section actions
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_history_depth")]
    pub history_depth: usize,

    /// Column width used to lay out sections
    #[serde(default = "default_wrap_width")]
    pub wrap_width: usize,

    /// Filter used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_history_depth() -> usize {
    DEFAULT_HISTORY_DEPTH
}

fn default_wrap_width() -> usize {
    80
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("invalid {}", config_path.display()))?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Gemini client settings, reading the key from `api_key_env`
    pub fn gemini(&self, model_override: Option<&str>) -> anyhow::Result<GeminiConfig> {
        let mut gemini = GeminiConfig::from_env(&self.api_key_env)?;
        gemini.base_url = self.api_base_url.clone();
        gemini.model = model_override.unwrap_or(&self.model).to_string();
        Ok(gemini)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base_url: default_api_base_url(),
            api_key_env: default_api_key_env(),
            history_depth: default_history_depth(),
            wrap_width: default_wrap_width(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "model": "gemini-2.5-pro",
            "apiKeyEnv": "MY_KEY",
            "historyDepth": 20,
            "logLevel": "drafter_assistant=debug"
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.api_key_env, "MY_KEY");
        assert_eq!(config.history_depth, 20);
        assert_eq!(config.wrap_width, 80);
        assert_eq!(config.api_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.log_level, "drafter_assistant=debug");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.model, "gemini-2.5-flash-latest");
        assert_eq!(config.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.history_depth, 100);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_empty_object_is_default() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = std::env::temp_dir().join("drafter-config-missing");
        let config = Config::load(&dir.display().to_string()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_missing_api_key() {
        let config = Config {
            api_key_env: "DRAFTER_TEST_KEY_THAT_IS_NEVER_SET".into(),
            ..Config::default()
        };
        assert!(config.gemini(None).is_err());
    }
}
