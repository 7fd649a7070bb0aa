//! Data-driven feed adapter.
//!
//! One code path serves every feed in the descriptor table; per-feed quirks
//! live in [`ReadingsShape`].

use serde_json::Value;

use crate::config::FeedsConfig;

use super::envelope::{sg_now, Snapshot};
use super::traffic::extract_cameras;
use super::{
    FeedClient, FeedDescriptor, FeedError, FeedKind, Metric, Reading, ReadingsShape, SourceData,
    SourceResult,
};

/// Areas always listed first in the two-hour forecast summary.
pub const KEY_AREAS: [&str; 5] = ["Ang Mo Kio", "City", "Bedok", "Jurong West", "Woodlands"];

/// Extra non-key areas listed after the key areas.
const EXTRA_AREAS: usize = 3;

const RAIN_WORDS: [&str; 5] = ["rain", "shower", "thunder", "drizzle", "storm"];

/// Readings pulled out of an envelope, before timestamp and summary.
#[derive(Debug)]
pub(crate) struct Extracted {
    pub readings: Vec<Reading>,
    pub total: usize,
    pub summary: String,
    pub rain_areas: Option<usize>,
}

/// Fetch one feed and normalize it. Never fails: errors become a failed result.
pub async fn fetch_feed(
    client: &FeedClient,
    config: &FeedsConfig,
    kind: FeedKind,
) -> SourceResult {
    let descriptor = kind.descriptor();
    let url = config.url_for(descriptor);

    let result = client
        .fetch_json(&url)
        .await
        .and_then(|payload| parse_feed(descriptor, &payload, config.traffic_sample_size));

    match result {
        Ok(data) => {
            tracing::debug!(feed = descriptor.name, readings = data.readings.len(), "Feed fetched");
            SourceResult::Success(data)
        }
        Err(e) => {
            tracing::warn!(feed = descriptor.name, error = %e, "Feed fetch failed");
            SourceResult::failed(descriptor.name, &e)
        }
    }
}

/// Validate a decoded payload and normalize it into [`SourceData`].
///
/// # Errors
///
/// Returns the envelope or extraction error describing why the payload is
/// unusable.
pub fn parse_feed(
    descriptor: &FeedDescriptor,
    payload: &Value,
    traffic_sample: usize,
) -> Result<SourceData, FeedError> {
    let snapshot = Snapshot::open(descriptor.envelope, payload)?;
    let metric = descriptor.metric;

    let extracted = match descriptor.shape {
        ReadingsShape::Stations => extract_stations(&snapshot, metric)?,
        ReadingsShape::RegionMap(key) => extract_regions(&snapshot, metric, key)?,
        ReadingsShape::IndexList => extract_index(&snapshot, metric)?,
        ReadingsShape::AreaForecasts => extract_area_forecasts(&snapshot, metric)?,
        ReadingsShape::GeneralForecast => extract_general_forecast(&snapshot, metric)?,
        ReadingsShape::DailyForecasts => extract_daily_forecasts(&snapshot, metric)?,
        ReadingsShape::Cameras => extract_cameras(&snapshot, traffic_sample)?,
    };

    let timestamp = snapshot.timestamp().unwrap_or_else(|| {
        tracing::debug!(feed = descriptor.name, "Item has no timestamp, using fetch time");
        sg_now()
    });

    Ok(SourceData {
        feeds: vec![descriptor.kind],
        timestamp,
        readings: extracted.readings,
        summary: extracted.summary,
        total: extracted.total,
        rain_areas: extracted.rain_areas,
    })
}

/// Whether forecast text mentions any form of precipitation.
#[must_use]
pub fn mentions_rain(text: &str) -> bool {
    let lower = text.to_lowercase();
    RAIN_WORDS.iter().any(|w| lower.contains(w))
}

/// Render a number with its unit, e.g. `31.2°C`.
#[must_use]
pub fn with_unit(metric: Metric, value: f64) -> String {
    format!("{value}{}", metric.unit())
}

fn item_field<'a>(snapshot: &Snapshot<'a>, field: &str) -> Result<&'a Value, FeedError> {
    snapshot
        .item
        .get(field)
        .ok_or_else(|| FeedError::InvalidEnvelope(format!("missing {field}")))
}

fn extract_stations(snapshot: &Snapshot<'_>, metric: Metric) -> Result<Extracted, FeedError> {
    let raw = item_field(snapshot, "readings")?
        .as_array()
        .ok_or_else(|| FeedError::InvalidEnvelope("readings is not a list".to_string()))?;

    let readings: Vec<Reading> = raw
        .iter()
        .filter_map(|r| {
            let id = r
                .get("station_id")
                .or_else(|| r.get("stationId"))
                .and_then(Value::as_str)?;
            let value = r.get("value").and_then(Value::as_f64)?;
            Some(Reading::number(metric, snapshot.station_name(id), value))
        })
        .collect();

    if readings.is_empty() {
        return Err(FeedError::Empty(format!("no {} stations reported", metric.label())));
    }

    let values = readings.iter().filter_map(|r| r.value.as_number());
    let max = values.clone().fold(f64::NEG_INFINITY, f64::max);
    let min = values.fold(f64::INFINITY, f64::min);
    let summary = format!(
        "{} to {} across {} stations",
        with_unit(metric, min),
        with_unit(metric, max),
        readings.len()
    );

    Ok(Extracted {
        total: readings.len(),
        readings,
        summary,
        rain_areas: None,
    })
}

fn extract_regions(
    snapshot: &Snapshot<'_>,
    metric: Metric,
    key: &str,
) -> Result<Extracted, FeedError> {
    let regions = item_field(snapshot, "readings")?
        .get(key)
        .and_then(Value::as_object)
        .ok_or_else(|| FeedError::InvalidEnvelope(format!("missing readings.{key}")))?;

    let readings: Vec<Reading> = regions
        .iter()
        .filter_map(|(region, v)| v.as_f64().map(|n| Reading::number(metric, region, n)))
        .collect();

    if readings.is_empty() {
        return Err(FeedError::Empty(format!("no {} regions reported", metric.label())));
    }

    let summary = readings
        .iter()
        .map(|r| format!("{}: {}", r.label, r.value.as_number().unwrap_or_default()))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(Extracted {
        total: readings.len(),
        readings,
        summary,
        rain_areas: None,
    })
}

fn extract_index(snapshot: &Snapshot<'_>, metric: Metric) -> Result<Extracted, FeedError> {
    let index = item_field(snapshot, "index")?
        .as_array()
        .ok_or_else(|| FeedError::InvalidEnvelope("index is not a list".to_string()))?;

    let latest = index
        .iter()
        .find_map(|entry| entry.get("value").and_then(Value::as_f64))
        .ok_or_else(|| FeedError::Empty("no index values".to_string()))?;

    Ok(Extracted {
        readings: vec![Reading::number(metric, "latest", latest)],
        total: index.len(),
        summary: format!("{} {latest}", metric.label()),
        rain_areas: None,
    })
}

fn extract_area_forecasts(
    snapshot: &Snapshot<'_>,
    metric: Metric,
) -> Result<Extracted, FeedError> {
    let forecasts = item_field(snapshot, "forecasts")?
        .as_array()
        .ok_or_else(|| FeedError::InvalidEnvelope("forecasts is not a list".to_string()))?;

    let all: Vec<(&str, &str)> = forecasts
        .iter()
        .filter_map(|f| {
            let area = f.get("area").and_then(Value::as_str)?;
            let text = f
                .get("forecast")
                .and_then(|v| v.as_str().or_else(|| v.get("text").and_then(Value::as_str)))?;
            Some((area, text))
        })
        .collect();

    if all.is_empty() {
        return Err(FeedError::Empty("no area forecasts".to_string()));
    }

    // Counted over every area; the readings below are only a sample.
    let rain_areas = all.iter().filter(|(_, text)| mentions_rain(text)).count();

    let key = all.iter().filter(|(area, _)| KEY_AREAS.contains(area));
    let others = all
        .iter()
        .filter(|(area, _)| !KEY_AREAS.contains(area))
        .take(EXTRA_AREAS);
    let readings: Vec<Reading> = key
        .chain(others)
        .map(|(area, text)| Reading::text(metric, *area, *text))
        .collect();

    let summary = format!(
        "{} ({} areas reporting)",
        readings
            .iter()
            .map(|r| format!("{}: {}", r.label, r.value.as_text().unwrap_or_default()))
            .collect::<Vec<_>>()
            .join(", "),
        all.len()
    );

    Ok(Extracted {
        readings,
        total: all.len(),
        summary,
        rain_areas: Some(rain_areas),
    })
}

fn extract_general_forecast(
    snapshot: &Snapshot<'_>,
    metric: Metric,
) -> Result<Extracted, FeedError> {
    let general = item_field(snapshot, "general")?;
    let forecast = general
        .get("forecast")
        .and_then(|v| v.as_str().or_else(|| v.get("text").and_then(Value::as_str)))
        .ok_or_else(|| FeedError::Empty("no general forecast".to_string()))?;

    let mut summary = forecast.to_string();
    if let Some(range) = low_high(general.get("temperature"), "°C") {
        summary.push_str(&format!(", {range}"));
    }
    if let Some(range) = low_high(general.get("relative_humidity"), "%") {
        summary.push_str(&format!(", humidity {range}"));
    }

    Ok(Extracted {
        readings: vec![Reading::text(metric, "", forecast)],
        total: 1,
        summary,
        rain_areas: None,
    })
}

fn extract_daily_forecasts(
    snapshot: &Snapshot<'_>,
    metric: Metric,
) -> Result<Extracted, FeedError> {
    let days = item_field(snapshot, "forecasts")?
        .as_array()
        .ok_or_else(|| FeedError::InvalidEnvelope("forecasts is not a list".to_string()))?;

    let (readings, lines): (Vec<Reading>, Vec<String>) = days
        .iter()
        .filter_map(|d| {
            let date = d.get("date").and_then(Value::as_str)?;
            let forecast = d.get("forecast").and_then(Value::as_str)?;
            let line = match low_high(d.get("temperature"), "°C") {
                Some(range) => format!("{date}: {forecast} ({range})"),
                None => format!("{date}: {forecast}"),
            };
            Some((Reading::text(metric, date, forecast), line))
        })
        .unzip();

    if readings.is_empty() {
        return Err(FeedError::Empty("no daily forecasts".to_string()));
    }

    let summary = lines.join("; ");

    Ok(Extracted {
        total: readings.len(),
        readings,
        summary,
        rain_areas: None,
    })
}

fn low_high(range: Option<&Value>, unit: &str) -> Option<String> {
    let range = range?;
    let low = range.get("low").and_then(Value::as_f64)?;
    let high = range.get("high").and_then(Value::as_f64)?;
    Some(format!("{low}-{high}{unit}"))
}
