//! Telegram transport against a fake Bot API.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use weather_uncle::bot::{ChatTransport, Inbound, Outbound, TelegramTransport, TransportError};
use weather_uncle::config::TelegramConfig;
use weather_uncle::present::{dashboard_card, DisplayCard};

use crate::fixtures::serve;

type Calls = Arc<Mutex<Vec<(String, Value)>>>;

async fn bot_api(
    State(calls): State<Calls>,
    Path(method): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    calls.lock().unwrap().push((method.clone(), body.clone()));
    let reply = match method.as_str() {
        "getUpdates" => json!({"ok": true, "result": [
            {"update_id": 100, "message": {
                "message_id": 7,
                "chat": {"id": 42},
                "from": {"username": "mei"},
                "text": "/dashboard"
            }},
            {"update_id": 101, "message": {"message_id": 8, "chat": {"id": 42}}}
        ]}),
        "sendMessage" if body["text"] == "bad" => {
            json!({"ok": false, "description": "Bad Request: can't parse entities"})
        }
        "sendMessage" => json!({"ok": true, "result": {"message_id": 9}}),
        _ => json!({"ok": true, "result": true}),
    };
    Json(reply)
}

async fn transport() -> (TelegramTransport, Calls) {
    let calls: Calls = Arc::default();
    let router = Router::new()
        .route("/botTEST/:method", post(bot_api))
        .with_state(calls.clone());
    let base = serve(router).await;
    let config = TelegramConfig {
        api_base_url: base,
        poll_timeout_secs: 1,
        ..TelegramConfig::default()
    };
    (TelegramTransport::new(&config, "TEST").unwrap(), calls)
}

#[tokio::test]
async fn test_receive_parses_and_advances_offset() {
    let (transport, calls) = transport().await;

    let first = transport.receive().await.unwrap();
    assert_eq!(
        first,
        vec![Inbound::Message {
            chat_id: 42,
            message_id: 7,
            username: "mei".to_string(),
            text: "/dashboard".to_string(),
        }]
    );

    transport.receive().await.unwrap();
    let calls = calls.lock().unwrap();
    assert_eq!(calls[0].1["offset"], 0);
    assert_eq!(calls[1].1["offset"], 102);
    assert_eq!(calls[1].1["timeout"], 1);
}

#[tokio::test]
async fn test_send_card_with_keyboard() {
    let (transport, calls) = transport().await;
    let card = dashboard_card(&Default::default());

    transport
        .send(42, &Outbound::from_card(card).replying_to(7))
        .await
        .unwrap();

    let calls = calls.lock().unwrap();
    let (method, body) = &calls[0];
    assert_eq!(method, "sendMessage");
    assert_eq!(body["parse_mode"], "Markdown");
    assert_eq!(body["reply_to_message_id"], 7);
    assert_eq!(
        body["reply_markup"]["inline_keyboard"][2][1]["callback_data"],
        "check_haze"
    );
}

#[tokio::test]
async fn test_send_api_error() {
    let (transport, _) = transport().await;
    let card = DisplayCard {
        text: "bad".to_string(),
        keyboard: None,
    };
    let err = transport
        .send(42, &Outbound::from_card(card))
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Api { .. }));
    assert!(err.to_string().contains("can't parse entities"));
}

#[tokio::test]
async fn test_typing_and_acknowledge() {
    let (transport, calls) = transport().await;
    transport.typing(42).await.unwrap();
    transport.acknowledge("cb-9").await.unwrap();

    let calls = calls.lock().unwrap();
    assert_eq!(calls[0].0, "sendChatAction");
    assert_eq!(calls[0].1["action"], "typing");
    assert_eq!(calls[1].0, "answerCallbackQuery");
    assert_eq!(calls[1].1["callback_query_id"], "cb-9");
}
