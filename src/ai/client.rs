//! Text-completion client for the conversational replies.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::config::{AiConfig, ProviderKind};

/// Connection timeout for HTTP requests.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Overall request timeout for HTTP requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Title reported to OpenRouter for usage attribution.
const APP_TITLE: &str = "Weather Uncle";

/// Build an HTTP client with proper timeout configuration.
fn build_http_client() -> Result<Client, AiError> {
    Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| AiError::RequestFailed(e.to_string()))
}

/// Errors from language model calls.
#[derive(Error, Debug)]
pub enum AiError {
    #[error("API key not configured (env: {0})")]
    MissingApiKey(String),
    #[error("API quota exhausted: {0}")]
    QuotaExceeded(String),
    #[error("API key rejected: {0}")]
    InvalidApiKey(String),
    #[error("API request failed: {0}")]
    RequestFailed(String),
    #[error("Failed to parse response: {0}")]
    ParseError(String),
    #[error("Language model request timed out")]
    Timeout,
}

impl From<reqwest::Error> for AiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::RequestFailed(e.to_string())
        }
    }
}

/// Coarse classification of a failed model call, used to pick a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    Quota,
    Credential,
    Other,
}

impl AiError {
    #[must_use]
    pub fn class(&self) -> FailureClass {
        match self {
            Self::QuotaExceeded(_) => FailureClass::Quota,
            Self::InvalidApiKey(_) | Self::MissingApiKey(_) => FailureClass::Credential,
            _ => FailureClass::Other,
        }
    }
}

/// Map an unsuccessful HTTP response to an error.
#[must_use]
pub fn classify_http_failure(status: u16, body: &str) -> AiError {
    if status == 401 || status == 403 || body.contains("invalid_api_key") {
        AiError::InvalidApiKey(format!("HTTP {status}"))
    } else if status == 402 || status == 429 || body.contains("insufficient_quota") {
        AiError::QuotaExceeded(format!("HTTP {status}"))
    } else {
        AiError::RequestFailed(format!("HTTP {status}: {body}"))
    }
}

/// Opaque text-completion service.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Complete a system + user message pair into one reply.
    async fn generate(&self, system: &str, user: &str) -> Result<String, AiError>;
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// OpenAI-compatible chat completions, as served by OpenRouter.
#[derive(Debug, Clone)]
pub struct OpenRouterProvider {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenRouterProvider {
    /// Create a new OpenRouter provider.
    ///
    /// # Errors
    ///
    /// Returns `AiError::RequestFailed` if the HTTP client cannot be built.
    pub fn new(config: &AiConfig, api_key: String) -> Result<Self, AiError> {
        Ok(Self {
            client: build_http_client()?,
            base_url: config.base_url.clone(),
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl AiProvider for OpenRouterProvider {
    async fn generate(&self, system: &str, user: &str) -> Result<String, AiError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user }
            ],
            "max_tokens": self.max_tokens,
            "temperature": self.temperature
        });

        tracing::debug!(model = %self.model, "OpenRouter chat request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("X-Title", APP_TITLE)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(classify_http_failure(status.as_u16(), &text));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| AiError::ParseError(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AiError::ParseError("No content in chat response".to_string()))
    }
}

/// Anthropic Messages API provider.
#[derive(Debug, Clone)]
pub struct ClaudeProvider {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl ClaudeProvider {
    /// Create a new Claude provider.
    ///
    /// # Errors
    ///
    /// Returns `AiError::RequestFailed` if the HTTP client cannot be built.
    pub fn new(config: &AiConfig, api_key: String) -> Result<Self, AiError> {
        Ok(Self {
            client: build_http_client()?,
            base_url: config.base_url.clone(),
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl AiProvider for ClaudeProvider {
    async fn generate(&self, system: &str, user: &str) -> Result<String, AiError> {
        let url = format!("{}/v1/messages", self.base_url.trim_end_matches('/'));

        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
            "system": system,
            "messages": [{ "role": "user", "content": user }]
        });

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(classify_http_failure(status.as_u16(), &text));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AiError::ParseError(e.to_string()))?;

        json["content"][0]["text"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| AiError::ParseError("No text in Claude response".to_string()))
    }
}

/// Provider enum for dispatch.
#[derive(Debug, Clone)]
pub enum Provider {
    OpenRouter(OpenRouterProvider),
    Claude(ClaudeProvider),
}

#[async_trait]
impl AiProvider for Provider {
    async fn generate(&self, system: &str, user: &str) -> Result<String, AiError> {
        match self {
            Self::OpenRouter(p) => p.generate(system, user).await,
            Self::Claude(p) => p.generate(system, user).await,
        }
    }
}

/// Configured language model client.
#[derive(Debug, Clone)]
pub struct AiClient {
    provider: Provider,
    config: AiConfig,
}

impl AiClient {
    /// Create client from configuration, reading the key from the environment.
    ///
    /// # Errors
    ///
    /// Returns `AiError::MissingApiKey` if the configured API key environment
    /// variable is not set or empty.
    pub fn from_config(config: AiConfig) -> Result<Self, AiError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AiError::MissingApiKey(config.api_key_env.clone()))?;

        let provider = match config.provider {
            ProviderKind::OpenRouter => {
                Provider::OpenRouter(OpenRouterProvider::new(&config, api_key)?)
            }
            ProviderKind::Claude => Provider::Claude(ClaudeProvider::new(&config, api_key)?),
        };

        Ok(Self { provider, config })
    }

    /// Get the configured model.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Get the provider kind.
    #[must_use]
    pub fn provider_kind(&self) -> &ProviderKind {
        &self.config.provider
    }
}

#[async_trait]
impl AiProvider for AiClient {
    async fn generate(&self, system: &str, user: &str) -> Result<String, AiError> {
        self.provider.generate(system, user).await
    }
}
