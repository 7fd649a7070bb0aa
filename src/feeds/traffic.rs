//! Traffic camera extraction.

use serde_json::Value;

use super::adapter::Extracted;
use super::envelope::{format_sg_timestamp, Snapshot};
use super::{CameraSnapshot, FeedError, Metric, Reading, ReadingValue};

/// Round a coordinate to 4 decimal places (about 11 m).
#[must_use]
pub fn round_coordinate(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Sample up to `sample` cameras from the full camera list.
pub(crate) fn extract_cameras(
    snapshot: &Snapshot<'_>,
    sample: usize,
) -> Result<Extracted, FeedError> {
    let cameras = snapshot
        .item
        .get("cameras")
        .and_then(Value::as_array)
        .ok_or_else(|| FeedError::InvalidEnvelope("missing cameras".to_string()))?;

    if cameras.is_empty() {
        return Err(FeedError::Empty("no cameras reported".to_string()));
    }

    let readings: Vec<Reading> = cameras
        .iter()
        .filter_map(parse_camera)
        .take(sample)
        .map(|camera| Reading {
            metric: Metric::TrafficSummary,
            label: camera.id.clone(),
            value: ReadingValue::Camera(camera),
        })
        .collect();

    let summary = format!(
        "{} cameras reporting, showing {}: {}",
        cameras.len(),
        readings.len(),
        readings
            .iter()
            .map(|r| r.label.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(Extracted {
        readings,
        total: cameras.len(),
        summary,
        rain_areas: None,
    })
}

fn parse_camera(raw: &Value) -> Option<CameraSnapshot> {
    let id = match raw.get("camera_id")? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let location = raw.get("location")?;

    Some(CameraSnapshot {
        id,
        image_url: raw.get("image")?.as_str()?.to_string(),
        latitude: round_coordinate(location.get("latitude")?.as_f64()?),
        longitude: round_coordinate(location.get("longitude")?.as_f64()?),
        captured_at: raw
            .get("timestamp")
            .and_then(Value::as_str)
            .map(format_sg_timestamp)
            .unwrap_or_default(),
    })
}
