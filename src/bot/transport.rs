//! Chat transport seam.

use async_trait::async_trait;

use crate::present::{DisplayCard, Keyboard};

use super::TransportError;

/// Something a user sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// A text message.
    Message {
        chat_id: i64,
        message_id: i64,
        username: String,
        text: String,
    },
    /// A button press.
    Callback {
        chat_id: i64,
        callback_id: String,
        username: String,
        data: String,
    },
}

/// A reply to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub text: String,
    pub keyboard: Option<Keyboard>,
    /// Message to quote.
    pub reply_to: Option<i64>,
    /// Render `*bold*` / `_italic_` markup.
    pub markdown: bool,
}

impl Outbound {
    /// Plain-text message without markup or buttons.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
            reply_to: None,
            markdown: false,
        }
    }

    /// Markdown message built from a card.
    #[must_use]
    pub fn from_card(card: DisplayCard) -> Self {
        Self {
            text: card.text,
            keyboard: card.keyboard,
            reply_to: None,
            markdown: true,
        }
    }

    /// Quote the given message (builder pattern).
    #[must_use]
    pub fn replying_to(mut self, message_id: i64) -> Self {
        self.reply_to = Some(message_id);
        self
    }
}

/// Receives user input and delivers replies.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Wait for the next batch of inbound events. May return an empty batch.
    async fn receive(&self) -> Result<Vec<Inbound>, TransportError>;

    /// Send a message to a chat.
    async fn send(&self, chat_id: i64, message: &Outbound) -> Result<(), TransportError>;

    /// Show a typing indicator.
    async fn typing(&self, chat_id: i64) -> Result<(), TransportError>;

    /// Acknowledge a button press so the client stops its spinner.
    async fn acknowledge(&self, callback_id: &str) -> Result<(), TransportError>;
}
