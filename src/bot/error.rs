//! Bot error types.

use crate::config::ConfigError;
use crate::feeds::FeedError;

/// Errors from the chat transport.
#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    /// Bot token not configured.
    #[error("Bot token not configured (env: {0})")]
    MissingToken(String),

    /// Request could not be sent or the connection dropped.
    #[error("Transport request failed: {0}")]
    Request(String),

    /// The chat API answered with an error.
    #[error("Chat API error: {description}")]
    Api { description: String },

    /// Response body did not match the expected shape.
    #[error("Failed to parse chat API response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Parse(e.to_string())
        } else {
            Self::Request(e.to_string())
        }
    }
}

/// Errors that stop the bot from starting.
#[derive(thiserror::Error, Debug)]
pub enum BotError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
