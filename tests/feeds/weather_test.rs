//! Composite weather adapter tests.

use weather_uncle::config::FeedsConfig;
use weather_uncle::feeds::{fetch_weather, FeedClient, FeedKind, SourceResult, WEATHER_FEEDS};

use crate::fixtures::{feed_router, serve};

async fn weather(failing: &[FeedKind]) -> SourceResult {
    let base = serve(feed_router(failing)).await;
    let config = FeedsConfig::with_base_url(base);
    let client = FeedClient::new(config.timeout()).unwrap();
    fetch_weather(&client, &config).await
}

#[tokio::test]
async fn test_all_sections_present() {
    let result = weather(&[]).await;
    let data = result.data().unwrap();
    assert_eq!(data.feeds, WEATHER_FEEDS.to_vec());
    for label in ["FORECAST:", "TEMPERATURE:", "HUMIDITY:", "WIND:"] {
        assert!(data.summary.contains(label), "missing {label}");
    }
}

#[tokio::test]
async fn test_failed_sub_feed_omitted() {
    let result = weather(&[FeedKind::Temperature]).await;
    let data = result.data().expect("partial weather should still succeed");
    assert!(!data.feeds.contains(&FeedKind::Temperature));
    assert!(!data.summary.contains("TEMPERATURE:"));
    assert!(data.summary.contains("HUMIDITY:"));
    assert!(data.summary.contains("FORECAST:"));
}

#[tokio::test]
async fn test_all_sub_feeds_failing_fails() {
    let result = weather(&WEATHER_FEEDS).await;
    match result {
        SourceResult::Failure { source, reason } => {
            assert_eq!(source, "weather");
            assert!(reason.contains("HTTP 500"));
        }
        SourceResult::Success(_) => panic!("expected failure"),
    }
}
