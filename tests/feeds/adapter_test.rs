//! Single-feed adapter tests.

use axum::routing::get;
use axum::Router;
use weather_uncle::config::FeedsConfig;
use weather_uncle::feeds::{fetch_feed, FeedClient, FeedKind, ReadingValue, SourceResult};

use crate::fixtures::{feed_router, serve, CAMERA_COUNT};

async fn fetch(base: &str, kind: FeedKind) -> SourceResult {
    let config = FeedsConfig::with_base_url(base);
    let client = FeedClient::new(config.timeout()).unwrap();
    fetch_feed(&client, &config, kind).await
}

#[tokio::test]
async fn test_every_feed_parses_fixture() {
    let base = serve(feed_router(&[])).await;
    for kind in FeedKind::ALL {
        let result = fetch(&base, kind).await;
        let data = result
            .data()
            .unwrap_or_else(|| panic!("{kind:?} failed: {:?}", result.error_reason()));
        assert_eq!(data.feeds, vec![kind]);
        assert!(!data.readings.is_empty(), "{kind:?} has no readings");
        assert!(!data.summary.is_empty(), "{kind:?} has no summary");
    }
}

#[tokio::test]
async fn test_http_error_becomes_failure() {
    let base = serve(feed_router(&[FeedKind::Psi])).await;
    let result = fetch(&base, FeedKind::Psi).await;
    assert_eq!(
        result,
        SourceResult::Failure {
            source: "psi".to_string(),
            reason: "Feed returned HTTP 500".to_string(),
        }
    );
}

#[tokio::test]
async fn test_non_json_body_becomes_failure() {
    let router = Router::new().route("/v1/environment/uv-index", get(|| async { "<html>" }));
    let base = serve(router).await;
    let result = fetch(&base, FeedKind::UvIndex).await;
    assert!(!result.is_success());
    assert!(result
        .error_reason()
        .unwrap()
        .starts_with("Failed to parse feed payload"));
}

#[tokio::test]
async fn test_missing_route_becomes_failure() {
    let base = serve(Router::new()).await;
    let result = fetch(&base, FeedKind::Rainfall).await;
    assert_eq!(result.error_reason(), Some("Feed returned HTTP 404"));
}

#[tokio::test]
async fn test_coded_envelope_error_code_rejected() {
    let router = Router::new().route(
        "/v2/real-time/api/two-hr-forecast",
        get(|| async {
            axum::Json(serde_json::json!({"code": 17, "errorMsg": "bad request", "data": null}))
        }),
    );
    let base = serve(router).await;
    let result = fetch(&base, FeedKind::TwoHourForecast).await;
    assert!(result
        .error_reason()
        .unwrap()
        .starts_with("Invalid data format"));
}

#[tokio::test]
async fn test_traffic_samples_cameras() {
    let base = serve(feed_router(&[])).await;
    let result = fetch(&base, FeedKind::TrafficCameras).await;
    let data = result.data().unwrap();

    assert_eq!(data.total, CAMERA_COUNT);
    assert_eq!(data.readings.len(), 8);
    for reading in &data.readings {
        let ReadingValue::Camera(camera) = &reading.value else {
            panic!("expected a camera reading");
        };
        assert!(camera.image_url.starts_with("https://images.example/"));
        let scaled = camera.latitude * 10_000.0;
        assert!((scaled - scaled.round()).abs() < 1e-6);
    }
}

#[tokio::test]
async fn test_timestamp_rendered_in_singapore_time() {
    let base = serve(feed_router(&[])).await;
    let result = fetch(&base, FeedKind::Temperature).await;
    assert_eq!(result.data().unwrap().timestamp, "18/10/2026, 2:00:00 pm");
}
