//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::feeds::{ApiGeneration, FeedDescriptor};

use super::ConfigError;

/// Language model provider kind.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI-compatible chat completions served by OpenRouter.
    #[default]
    OpenRouter,
    /// Anthropic Messages API.
    Claude,
}

/// Configuration for the language model client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Provider to use (openrouter or claude).
    #[serde(default)]
    pub provider: ProviderKind,
    /// Model identifier sent to the provider.
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum tokens in a reply.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Base URL for the API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Environment variable name for the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_model() -> String {
    "openai/gpt-4o".to_string()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_temperature() -> f32 {
    0.8
}

fn default_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_api_key_env() -> String {
    "OPENROUTER_API_KEY".to_string()
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
        }
    }
}

/// Upstream feed endpoints and fetch limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedsConfig {
    /// Base URL for `/v1/...` feeds.
    pub v1_base_url: String,
    /// Base URL for `/v2/...` feeds.
    pub v2_base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Number of traffic cameras sampled from the full list.
    pub traffic_sample_size: usize,
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            v1_base_url: "https://api.data.gov.sg".to_string(),
            v2_base_url: "https://api-open.data.gov.sg".to_string(),
            timeout_secs: 5,
            traffic_sample_size: 8,
        }
    }
}

impl FeedsConfig {
    /// Point both API generations at one base URL.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            v1_base_url: base_url.clone(),
            v2_base_url: base_url,
            ..Self::default()
        }
    }

    /// Full URL of a feed.
    #[must_use]
    pub fn url_for(&self, descriptor: &FeedDescriptor) -> String {
        let base = match descriptor.api {
            ApiGeneration::V1 => &self.v1_base_url,
            ApiGeneration::V2 => &self.v2_base_url,
        };
        format!("{}{}", base.trim_end_matches('/'), descriptor.path)
    }

    /// Per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check that both base URLs parse.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` naming the first bad URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for base in [&self.v1_base_url, &self.v2_base_url] {
            url::Url::parse(base).map_err(|e| ConfigError::InvalidUrl {
                url: base.clone(),
                source: e,
            })?;
        }
        Ok(())
    }
}

/// Telegram Bot API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Environment variable holding the bot token.
    pub token_env: String,
    /// Bot API base URL.
    pub api_base_url: String,
    /// Long-poll timeout passed to `getUpdates`, in seconds.
    pub poll_timeout_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token_env: "TELEGRAM_BOT_TOKEN".to_string(),
            api_base_url: "https://api.telegram.org".to_string(),
            poll_timeout_secs: 30,
        }
    }
}

/// Top-level configuration for the bot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub feeds: FeedsConfig,
    pub ai: AiConfig,
    pub telegram: TelegramConfig,
    /// Persona prompt file.
    pub persona_path: PathBuf,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            feeds: FeedsConfig::default(),
            ai: AiConfig::default(),
            telegram: TelegramConfig::default(),
            persona_path: PathBuf::from("prompt.md"),
        }
    }
}
