//! Telegram Bot API transport over long polling.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::TelegramConfig;
use crate::present::Keyboard;

use super::{ChatTransport, Inbound, Outbound, TransportError};

/// Extra slack on top of the long-poll window before the HTTP client gives up.
const POLL_GRACE: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Update {
    update_id: i64,
    message: Option<Message>,
    callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Deserialize)]
struct Message {
    message_id: i64,
    chat: Chat,
    from: Option<User>,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CallbackQuery {
    id: String,
    from: User,
    message: Option<Message>,
    data: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Chat {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct User {
    username: Option<String>,
    first_name: Option<String>,
}

impl User {
    fn display_name(&self) -> String {
        self.username
            .clone()
            .or_else(|| self.first_name.clone())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

#[derive(Debug, Serialize)]
struct InlineButton<'a> {
    text: &'a str,
    callback_data: &'static str,
}

fn inline_keyboard(keyboard: &Keyboard) -> serde_json::Value {
    let rows: Vec<Vec<InlineButton<'_>>> = keyboard
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|b| InlineButton {
                    text: &b.label,
                    callback_data: b.action.id(),
                })
                .collect()
        })
        .collect();
    json!({ "inline_keyboard": rows })
}

/// Request body for `sendMessage`.
fn send_message_body(chat_id: i64, message: &Outbound) -> serde_json::Value {
    let mut body = json!({
        "chat_id": chat_id,
        "text": message.text,
    });
    if message.markdown {
        body["parse_mode"] = json!("Markdown");
    }
    if let Some(id) = message.reply_to {
        body["reply_to_message_id"] = json!(id);
    }
    if let Some(keyboard) = &message.keyboard {
        body["reply_markup"] = inline_keyboard(keyboard);
    }
    body
}

impl Update {
    fn into_inbound(self) -> Option<Inbound> {
        if let Some(query) = self.callback_query {
            let message = query.message?;
            return Some(Inbound::Callback {
                chat_id: message.chat.id,
                callback_id: query.id,
                username: query.from.display_name(),
                data: query.data.unwrap_or_default(),
            });
        }
        let message = self.message?;
        let text = message.text?;
        Some(Inbound::Message {
            chat_id: message.chat.id,
            message_id: message.message_id,
            username: message
                .from
                .as_ref()
                .map_or_else(|| "unknown".to_string(), User::display_name),
            text,
        })
    }
}

/// Long-polling Telegram client.
#[derive(Debug)]
pub struct TelegramTransport {
    client: reqwest::Client,
    endpoint: String,
    poll_timeout_secs: u64,
    offset: AtomicI64,
}

impl TelegramTransport {
    /// Create a transport for the given token.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Request` if the HTTP client cannot be built.
    pub fn new(config: &TelegramConfig, token: &str) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.poll_timeout_secs) + POLL_GRACE)
            .build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/bot{token}", config.api_base_url.trim_end_matches('/')),
            poll_timeout_secs: config.poll_timeout_secs,
            offset: AtomicI64::new(0),
        })
    }

    /// Create a transport, reading the token from the configured variable.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::MissingToken` if the variable is unset or empty.
    pub fn from_env(config: &TelegramConfig) -> Result<Self, TransportError> {
        let token = std::env::var(&config.token_env)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| TransportError::MissingToken(config.token_env.clone()))?;
        Self::new(config, &token)
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        body: &serde_json::Value,
    ) -> Result<T, TransportError> {
        let response: ApiResponse<T> = self
            .client
            .post(format!("{}/{method}", self.endpoint))
            .json(body)
            .send()
            .await?
            .json()
            .await?;

        if !response.ok {
            return Err(TransportError::Api {
                description: response
                    .description
                    .unwrap_or_else(|| format!("{method} failed")),
            });
        }
        response
            .result
            .ok_or_else(|| TransportError::Parse(format!("{method} returned no result")))
    }
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn receive(&self) -> Result<Vec<Inbound>, TransportError> {
        let body = json!({
            "offset": self.offset.load(Ordering::Relaxed),
            "timeout": self.poll_timeout_secs,
            "allowed_updates": ["message", "callback_query"],
        });
        let updates: Vec<Update> = self.call("getUpdates", &body).await?;

        if let Some(last) = updates.iter().map(|u| u.update_id).max() {
            self.offset.store(last + 1, Ordering::Relaxed);
        }
        Ok(updates.into_iter().filter_map(Update::into_inbound).collect())
    }

    async fn send(&self, chat_id: i64, message: &Outbound) -> Result<(), TransportError> {
        let _: serde_json::Value = self
            .call("sendMessage", &send_message_body(chat_id, message))
            .await?;
        Ok(())
    }

    async fn typing(&self, chat_id: i64) -> Result<(), TransportError> {
        let _: bool = self
            .call(
                "sendChatAction",
                &json!({ "chat_id": chat_id, "action": "typing" }),
            )
            .await?;
        Ok(())
    }

    async fn acknowledge(&self, callback_id: &str) -> Result<(), TransportError> {
        let _: bool = self
            .call(
                "answerCallbackQuery",
                &json!({ "callback_query_id": callback_id }),
            )
            .await?;
        Ok(())
    }
}
