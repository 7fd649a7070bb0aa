//! OpenRouter provider against a fake chat-completions endpoint.

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use weather_uncle::ai::{AiError, AiProvider, OpenRouterProvider};
use weather_uncle::config::AiConfig;

use crate::fixtures::serve;

#[derive(Clone, Default)]
struct Seen {
    headers: Arc<Mutex<Vec<HeaderMap>>>,
    bodies: Arc<Mutex<Vec<Value>>>,
}

async fn completions(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    seen.headers.lock().unwrap().push(headers);
    seen.bodies.lock().unwrap().push(body.clone());
    match body["messages"][1]["content"].as_str() {
        Some("quota") => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({"error": {"message": "Rate limit exceeded"}})),
        ),
        Some("bad key") => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": {"code": "invalid_api_key"}})),
        ),
        Some("empty") => (StatusCode::OK, Json(json!({"choices": []}))),
        _ => (
            StatusCode::OK,
            Json(json!({"choices": [{
                "message": {"role": "assistant", "content": "Shiok weather!"}
            }]})),
        ),
    }
}

async fn provider() -> (OpenRouterProvider, Seen) {
    let seen = Seen::default();
    let router = Router::new()
        .route("/api/v1/chat/completions", post(completions))
        .with_state(seen.clone());
    let base = serve(router).await;
    let config = AiConfig {
        base_url: format!("{base}/api/v1"),
        ..AiConfig::default()
    };
    (
        OpenRouterProvider::new(&config, "sk-test".to_string()).unwrap(),
        seen,
    )
}

#[tokio::test]
async fn test_generate_sends_persona_and_question() {
    let (provider, seen) = provider().await;

    let reply = provider.generate("You are Uncle.", "Hot or not?").await.unwrap();
    assert_eq!(reply, "Shiok weather!");

    let headers = &seen.headers.lock().unwrap()[0];
    assert_eq!(headers["authorization"], "Bearer sk-test");
    assert_eq!(headers["x-title"], "Weather Uncle");

    let body = &seen.bodies.lock().unwrap()[0];
    assert_eq!(body["model"], "openai/gpt-4o");
    assert_eq!(body["max_tokens"], 500);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][0]["content"], "You are Uncle.");
    assert_eq!(body["messages"][1]["content"], "Hot or not?");
}

#[tokio::test]
async fn test_rate_limit_is_quota() {
    let (provider, _) = provider().await;
    let err = provider.generate("sys", "quota").await.unwrap_err();
    assert!(matches!(err, AiError::QuotaExceeded(_)));
}

#[tokio::test]
async fn test_unauthorized_is_invalid_key() {
    let (provider, _) = provider().await;
    let err = provider.generate("sys", "bad key").await.unwrap_err();
    assert!(matches!(err, AiError::InvalidApiKey(_)));
}

#[tokio::test]
async fn test_empty_choices_is_parse_error() {
    let (provider, _) = provider().await;
    let err = provider.generate("sys", "empty").await.unwrap_err();
    assert!(matches!(err, AiError::ParseError(_)));
}
