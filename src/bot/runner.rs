//! Event loop connecting a transport to the responder.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tokio_util::sync::CancellationToken;

use crate::display::truncate;

use super::responder::UNEXPECTED_MESSAGE;
use super::{ChatTransport, Command, Inbound, Outbound, Responder};

/// Pause after a failed receive before polling again.
const RECEIVE_BACKOFF: Duration = Duration::from_secs(5);

/// Longest message excerpt written to the interaction log.
const LOG_EXCERPT_CHARS: usize = 100;

/// Runs until cancelled, answering every inbound event.
pub struct BotRunner {
    transport: Arc<dyn ChatTransport>,
    responder: Arc<Responder>,
    cancel: CancellationToken,
}

impl BotRunner {
    #[must_use]
    pub fn new(transport: Arc<dyn ChatTransport>, responder: Arc<Responder>) -> Self {
        Self {
            transport,
            responder,
            cancel: CancellationToken::new(),
        }
    }

    /// Set a cancellation token for graceful shutdown.
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Poll and answer until the token is cancelled.
    ///
    /// Events in one batch are handled concurrently; the next poll waits for
    /// the whole batch.
    pub async fn run(&self) {
        tracing::info!("Weather Uncle is listening");
        loop {
            let batch = tokio::select! {
                biased;
                () = self.cancel.cancelled() => break,
                batch = self.transport.receive() => batch,
            };

            match batch {
                Ok(events) => {
                    join_all(events.into_iter().map(|event| self.handle(event))).await;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to receive updates");
                    tokio::select! {
                        () = self.cancel.cancelled() => break,
                        () = tokio::time::sleep(RECEIVE_BACKOFF) => {}
                    }
                }
            }
        }
        tracing::info!("Weather Uncle stopped");
    }

    /// Answer one inbound event. Never fails; transport errors are logged.
    pub async fn handle(&self, event: Inbound) {
        match event {
            Inbound::Message {
                chat_id,
                message_id,
                username,
                text,
            } => {
                if let Err(e) = self.transport.typing(chat_id).await {
                    tracing::debug!(chat_id, error = %e, "Typing indicator failed");
                }
                let card = self.responder.respond(&Command::from_text(&text)).await;
                let response_len = card.text.chars().count();
                self.deliver(chat_id, Outbound::from_card(card).replying_to(message_id))
                    .await;
                tracing::info!(
                    chat_id,
                    username = %username,
                    message = %truncate(&text, LOG_EXCERPT_CHARS),
                    response_len,
                    "Handled message"
                );
            }
            Inbound::Callback {
                chat_id,
                callback_id,
                username,
                data,
            } => {
                if let Err(e) = self.transport.acknowledge(&callback_id).await {
                    tracing::debug!(chat_id, error = %e, "Callback acknowledgement failed");
                }
                let card = self.responder.respond(&Command::from_callback(&data)).await;
                let response_len = card.text.chars().count();
                self.deliver(chat_id, Outbound::from_card(card)).await;
                tracing::info!(
                    chat_id,
                    username = %username,
                    action = %data,
                    response_len,
                    "Handled button"
                );
            }
        }
    }

    /// Send a reply; on failure, try a plain-text apology once.
    async fn deliver(&self, chat_id: i64, message: Outbound) {
        let Err(e) = self.transport.send(chat_id, &message).await else {
            return;
        };
        tracing::error!(chat_id, error = %e, "Failed to send reply");

        let mut apology = Outbound::plain(UNEXPECTED_MESSAGE);
        apology.reply_to = message.reply_to;
        if let Err(e) = self.transport.send(chat_id, &apology).await {
            tracing::error!(chat_id, error = %e, "Failed to send apology");
        }
    }
}
