//! Composite weather adapter.
//!
//! Fetches the two-hour forecast, temperature, humidity and wind speed
//! concurrently and merges whatever succeeded into one result.

use futures_util::future::join_all;

use crate::config::FeedsConfig;

use super::adapter::fetch_feed;
use super::{FeedClient, FeedKind, SourceData, SourceResult};

/// Sub-feeds of the composite weather adapter, in summary order.
pub const WEATHER_FEEDS: [FeedKind; 4] = [
    FeedKind::TwoHourForecast,
    FeedKind::Temperature,
    FeedKind::Humidity,
    FeedKind::WindSpeed,
];

/// Source name of the composite adapter.
pub const WEATHER_SOURCE: &str = "weather";

/// Fetch all weather sub-feeds and merge them.
pub async fn fetch_weather(client: &FeedClient, config: &FeedsConfig) -> SourceResult {
    let results = join_all(
        WEATHER_FEEDS
            .iter()
            .map(|kind| fetch_feed(client, config, *kind)),
    )
    .await;
    merge_weather(results)
}

/// Merge sub-feed results. Succeeds when at least one sub-feed did.
#[must_use]
pub fn merge_weather(results: Vec<SourceResult>) -> SourceResult {
    let mut merged: Option<SourceData> = None;
    let mut failures = Vec::new();

    for result in results {
        match result {
            SourceResult::Success(data) => {
                let label = data.feeds[0].descriptor().summary_label;
                let section = format!("{label}: {}", data.summary);
                match merged.as_mut() {
                    Some(acc) => {
                        acc.feeds.extend(data.feeds);
                        acc.readings.extend(data.readings);
                        acc.total += data.total;
                        acc.rain_areas = acc.rain_areas.or(data.rain_areas);
                        acc.summary.push('\n');
                        acc.summary.push_str(&section);
                    }
                    None => {
                        merged = Some(SourceData {
                            summary: section,
                            ..data
                        });
                    }
                }
            }
            SourceResult::Failure { source, reason } => {
                tracing::debug!(feed = %source, reason = %reason, "Weather section omitted");
                failures.push(format!("{source}: {reason}"));
            }
        }
    }

    match merged {
        Some(data) => SourceResult::Success(data),
        None => SourceResult::Failure {
            source: WEATHER_SOURCE.to_string(),
            reason: if failures.is_empty() {
                "no weather feeds requested".to_string()
            } else {
                failures.join("; ")
            },
        },
    }
}
