//! Feed adapter tests against a local fixture server.

mod adapter_test;
mod weather_test;

/// Verify the public feed types are exported from the library.
#[test]
fn test_feed_types_exported() {
    use weather_uncle::feeds::{
        format_sg_timestamp, round_coordinate, FeedClient, FeedError, FeedKind, Metric,
        ReadingValue, SourceResult, FEEDS, KEY_AREAS, WEATHER_FEEDS,
    };

    assert_eq!(FEEDS.len(), FeedKind::ALL.len());
    assert_eq!(KEY_AREAS.len(), 5);
    assert_eq!(WEATHER_FEEDS.len(), 4);
    assert!((round_coordinate(1.234_56) - 1.2346).abs() < 1e-9);
    assert_eq!(format_sg_timestamp("not a time"), "not a time");
    assert!(FeedClient::new(std::time::Duration::from_secs(1)).is_ok());
    assert!(Metric::Temperature.is_numeric());
    assert_eq!(ReadingValue::Number(1.0).as_number(), Some(1.0));

    let failed = SourceResult::failed("psi", &FeedError::Status { status: 500 });
    assert!(!failed.is_success());
}
