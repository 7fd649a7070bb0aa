//! Event loop tests with an in-memory transport.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use weather_uncle::ai::Persona;
use weather_uncle::bot::{
    BotRunner, ChatTransport, Inbound, Outbound, Responder, TransportError, UNEXPECTED_MESSAGE,
};
use weather_uncle::present::PromptBuilder;

use super::{Scripted, ScriptedModel};
use crate::fixtures::aggregator;

/// Replays queued batches, then cancels the runner.
struct MemoryTransport {
    batches: Mutex<VecDeque<Vec<Inbound>>>,
    sent: Mutex<Vec<(i64, Outbound)>>,
    typing: Mutex<Vec<i64>>,
    acknowledged: Mutex<Vec<String>>,
    reject_markdown: bool,
    cancel: CancellationToken,
}

impl MemoryTransport {
    fn new(batches: Vec<Vec<Inbound>>, cancel: CancellationToken) -> Self {
        Self {
            batches: Mutex::new(batches.into()),
            sent: Mutex::new(Vec::new()),
            typing: Mutex::new(Vec::new()),
            acknowledged: Mutex::new(Vec::new()),
            reject_markdown: false,
            cancel,
        }
    }

    fn sent(&self) -> Vec<(i64, Outbound)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatTransport for MemoryTransport {
    async fn receive(&self) -> Result<Vec<Inbound>, TransportError> {
        let next = self.batches.lock().unwrap().pop_front();
        match next {
            Some(batch) => Ok(batch),
            None => {
                self.cancel.cancel();
                Ok(Vec::new())
            }
        }
    }

    async fn send(&self, chat_id: i64, message: &Outbound) -> Result<(), TransportError> {
        if self.reject_markdown && message.markdown {
            return Err(TransportError::Api {
                description: "Bad Request: can't parse entities".to_string(),
            });
        }
        self.sent.lock().unwrap().push((chat_id, message.clone()));
        Ok(())
    }

    async fn typing(&self, chat_id: i64) -> Result<(), TransportError> {
        self.typing.lock().unwrap().push(chat_id);
        Ok(())
    }

    async fn acknowledge(&self, callback_id: &str) -> Result<(), TransportError> {
        self.acknowledged
            .lock()
            .unwrap()
            .push(callback_id.to_string());
        Ok(())
    }
}

fn message(chat_id: i64, message_id: i64, text: &str) -> Inbound {
    Inbound::Message {
        chat_id,
        message_id,
        username: "ahmad".to_string(),
        text: text.to_string(),
    }
}

async fn responder() -> Arc<Responder> {
    Arc::new(
        Responder::new(
            aggregator(&[]).await,
            PromptBuilder::new(Persona::new("You are Uncle.")),
        )
        .with_model(Arc::new(ScriptedModel::new(Scripted::Reply("Steady lah.")))),
    )
}

#[tokio::test]
async fn test_runner_answers_every_event_then_stops() {
    let cancel = CancellationToken::new();
    let transport = Arc::new(MemoryTransport::new(
        vec![
            vec![message(1, 10, "/start"), message(2, 20, "Hello uncle")],
            vec![Inbound::Callback {
                chat_id: 1,
                callback_id: "cb-1".to_string(),
                username: "ahmad".to_string(),
                data: "check_laundry".to_string(),
            }],
        ],
        cancel.clone(),
    ));
    let runner = BotRunner::new(transport.clone(), responder().await).with_cancellation(cancel);

    tokio::time::timeout(Duration::from_secs(10), runner.run())
        .await
        .expect("runner did not stop after cancellation");

    let sent = transport.sent();
    assert_eq!(sent.len(), 3);

    let dashboard = sent.iter().find(|(chat, m)| *chat == 1 && m.keyboard.is_some());
    assert_eq!(dashboard.unwrap().1.reply_to, Some(10));

    let chat = sent.iter().find(|(chat, _)| *chat == 2).unwrap();
    assert_eq!(chat.1.text, "Steady lah.");
    assert!(chat.1.markdown);
    assert_eq!(chat.1.reply_to, Some(20));

    assert!(sent
        .iter()
        .any(|(_, m)| m.text.contains("Laundry") && m.reply_to.is_none()));

    let mut typing = transport.typing.lock().unwrap().clone();
    typing.sort_unstable();
    assert_eq!(typing, vec![1, 2]);
    assert_eq!(*transport.acknowledged.lock().unwrap(), vec!["cb-1"]);
}

#[tokio::test]
async fn test_rejected_reply_falls_back_to_plain_apology() {
    let cancel = CancellationToken::new();
    let transport = Arc::new(MemoryTransport {
        reject_markdown: true,
        ..MemoryTransport::new(Vec::new(), cancel.clone())
    });
    let runner = BotRunner::new(transport.clone(), responder().await).with_cancellation(cancel);

    runner.handle(message(5, 50, "Is it sunny?")).await;

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].1.text, UNEXPECTED_MESSAGE);
    assert!(!sent[0].1.markdown);
    assert_eq!(sent[0].1.reply_to, Some(50));
}

#[tokio::test]
async fn test_cancelled_before_start_returns_immediately() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let transport = Arc::new(MemoryTransport::new(
        vec![vec![message(1, 1, "/start")]],
        cancel.clone(),
    ));
    let runner = BotRunner::new(transport.clone(), responder().await).with_cancellation(cancel);

    runner.run().await;

    assert!(transport.sent().is_empty());
}
