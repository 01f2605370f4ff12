use memochat_core::util::DEFAULT_SYSTEM_PROMPT;
use memochat_core::{ImageQuality, ImageSize};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable that takes precedence over `providers.openai.api_key`.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

const PLACEHOLDER_KEY: &str = "your-openai-api-key-here";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    pub agents: AgentsConfig,
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub image: ImageConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AgentsConfig {
    pub defaults: AgentDefaults,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AgentDefaults {
    pub model: String,
    pub max_tokens: usize,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_limit: Option<usize>,
    #[serde(default)]
    pub rollback_facts_on_error: bool,
}

impl Default for AgentDefaults {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 1024,
            temperature: 0.7,
            system_prompt: Some(DEFAULT_SYSTEM_PROMPT.to_string()),
            history_limit: None,
            rollback_facts_on_error: false,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ProvidersConfig {
    pub openai: ProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct AudioConfig {
    #[serde(default = "AudioConfig::default_transcription_model")]
    pub transcription_model: String,
    #[serde(default = "AudioConfig::default_translation_model")]
    pub translation_model: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            transcription_model: Self::default_transcription_model(),
            translation_model: Self::default_translation_model(),
        }
    }
}

impl AudioConfig {
    fn default_transcription_model() -> String {
        "whisper-1".to_string()
    }

    fn default_translation_model() -> String {
        "gpt-4o-mini".to_string()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ImageConfig {
    #[serde(default = "ImageConfig::default_model")]
    pub model: String,
    #[serde(default)]
    pub size: ImageSize,
    #[serde(default)]
    pub quality: ImageQuality,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            model: Self::default_model(),
            size: ImageSize::default(),
            quality: ImageQuality::default(),
        }
    }
}

impl ImageConfig {
    fn default_model() -> String {
        "dall-e-3".to_string()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            agents: AgentsConfig {
                defaults: AgentDefaults::default(),
            },
            providers: ProvidersConfig {
                openai: ProviderConfig {
                    api_key: PLACEHOLDER_KEY.to_string(),
                    base_url: None,
                    timeout_secs: None,
                },
            },
            audio: AudioConfig::default(),
            image: ImageConfig::default(),
        }
    }
}

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("memochat"))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load `~/memochat/config.json`, then apply the `OPENAI_API_KEY` override.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'memochat init' to create config.",
                config_path.display()
            );
        }

        let config = Self::load_from(&config_path)?
            .with_api_key_override(std::env::var(API_KEY_ENV).ok());
        Ok(config)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config at {}: {e}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Replace the configured key with `key` when it is present and non-blank.
    #[must_use]
    pub fn with_api_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            debug!("Using API key from {API_KEY_ENV}");
            self.providers.openai.api_key = key;
        }
        self
    }

    /// The API key, rejecting the untouched template placeholder.
    pub fn api_key(&self) -> anyhow::Result<&str> {
        let key = self.providers.openai.api_key.trim();
        if key.is_empty() || key == PLACEHOLDER_KEY {
            anyhow::bail!(
                "No OpenAI API key configured. Set {API_KEY_ENV} or edit the config file."
            );
        }
        Ok(key)
    }

    pub fn system_prompt(&self) -> &str {
        self.agents
            .defaults
            .system_prompt
            .as_deref()
            .unwrap_or(DEFAULT_SYSTEM_PROMPT)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<PathBuf> {
        let config_path = Self::ensure_config_dir()?.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        Self::write_template(&config_path)?;
        Ok(config_path)
    }

    fn write_template(path: &Path) -> anyhow::Result<()> {
        let template = serde_json::to_string_pretty(&Self::default())?;
        std::fs::write(path, template)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_minimal_config_fills_defaults() {
        let json = r#"{
            "agents": {"defaults": {"model": "gpt-4o", "max_tokens": 512, "temperature": 0.2}},
            "providers": {"openai": {"api_key": "sk-abc"}}
        }"#;
        let config = Config::from_json(json).expect("minimal config should parse");

        assert_eq!(config.agents.defaults.model, "gpt-4o");
        assert!(!config.agents.defaults.rollback_facts_on_error);
        assert_eq!(config.agents.defaults.history_limit, None);
        assert_eq!(config.system_prompt(), DEFAULT_SYSTEM_PROMPT);
        assert_eq!(config.audio, AudioConfig::default());
        assert_eq!(config.image.model, "dall-e-3");
        assert_eq!(config.image.size, ImageSize::Square);
        assert_eq!(config.providers.openai.timeout_secs, None);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_full_config() {
        let json = r#"{
            "agents": {"defaults": {
                "model": "gpt-4o", "max_tokens": 512, "temperature": 0.2,
                "system_prompt": "Be brief.", "history_limit": 10,
                "rollback_facts_on_error": true
            }},
            "providers": {"openai": {"api_key": "sk-abc", "base_url": "http://localhost:1234/v1", "timeout_secs": 30}},
            "audio": {"transcription_model": "whisper-1", "translation_model": "gpt-4"},
            "image": {"model": "dall-e-3", "size": "1792x1024", "quality": "hd"}
        }"#;
        let config = Config::from_json(json).expect("full config should parse");

        assert_eq!(config.system_prompt(), "Be brief.");
        assert_eq!(config.agents.defaults.history_limit, Some(10));
        assert!(config.agents.defaults.rollback_facts_on_error);
        assert_eq!(config.providers.openai.timeout_secs, Some(30));
        assert_eq!(config.audio.translation_model, "gpt-4");
        assert_eq!(config.image.size, ImageSize::Landscape);
        assert_eq!(config.image.quality, ImageQuality::Hd);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_template_round_trips() {
        let template = serde_json::to_string_pretty(&Config::default()).expect("serialize");
        let parsed = Config::from_json(&template).expect("template should parse");
        assert_eq!(parsed, Config::default());
        assert!(parsed.api_key().is_err());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_env_key_overrides_config() {
        let config = Config::default().with_api_key_override(Some("sk-env".to_string()));
        assert_eq!(config.api_key().expect("key set"), "sk-env");

        let config = config.with_api_key_override(Some("  ".to_string()));
        assert_eq!(config.api_key().expect("blank override ignored"), "sk-env");

        let config = config.with_api_key_override(None);
        assert_eq!(config.api_key().expect("missing override ignored"), "sk-env");
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("memochat-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join("config.json");

        Config::write_template(&path).expect("write template");
        let loaded = Config::load_from(&path).expect("load template");
        assert_eq!(loaded, Config::default());

        std::fs::write(&path, "{ not json").expect("overwrite");
        assert!(Config::load_from(&path).is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
