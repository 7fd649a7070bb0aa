//! Envelope validation for the two upstream API generations.

use chrono::{DateTime, FixedOffset, Utc};
use serde_json::Value;

use super::{EnvelopeKind, FeedError};

/// Singapore is UTC+8 all year.
const SGT_OFFSET_SECS: i32 = 8 * 3600;

/// The first item of a validated envelope together with its surroundings.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    /// Object holding `items` and any station metadata.
    pub root: &'a Value,
    /// First (most recent) item.
    pub item: &'a Value,
}

impl<'a> Snapshot<'a> {
    /// Open an envelope of the given kind.
    ///
    /// # Errors
    ///
    /// `FeedError::InvalidEnvelope` when the wrapper is missing or marks
    /// itself unsuccessful, `FeedError::Empty` when `items` is empty.
    pub fn open(kind: EnvelopeKind, payload: &'a Value) -> Result<Self, FeedError> {
        let root = match kind {
            EnvelopeKind::Coded => {
                match payload.get("code").and_then(Value::as_i64) {
                    Some(0) => {}
                    Some(code) => {
                        return Err(FeedError::InvalidEnvelope(format!(
                            "upstream returned code {code}"
                        )))
                    }
                    None => {
                        return Err(FeedError::InvalidEnvelope("missing code".to_string()))
                    }
                }
                payload
                    .get("data")
                    .filter(|d| d.is_object())
                    .ok_or_else(|| FeedError::InvalidEnvelope("missing data".to_string()))?
            }
            EnvelopeKind::Items => payload,
        };

        let items = root
            .get("items")
            .and_then(Value::as_array)
            .ok_or_else(|| FeedError::InvalidEnvelope("missing items".to_string()))?;
        let item = items
            .first()
            .ok_or_else(|| FeedError::Empty("items is empty".to_string()))?;

        Ok(Self { root, item })
    }

    /// Item timestamp rendered in Singapore time, if the item carries one.
    #[must_use]
    pub fn timestamp(&self) -> Option<String> {
        self.item
            .get("timestamp")
            .or_else(|| self.item.get("update_timestamp"))
            .and_then(Value::as_str)
            .map(format_sg_timestamp)
    }

    /// Display name for a station id, falling back to the id itself.
    #[must_use]
    pub fn station_name(&self, station_id: &str) -> String {
        let stations = self
            .root
            .pointer("/metadata/stations")
            .or_else(|| self.root.get("stations"))
            .and_then(Value::as_array);

        stations
            .and_then(|list| {
                list.iter().find(|s| {
                    s.get("id").and_then(Value::as_str) == Some(station_id)
                        || s.get("device_id").and_then(Value::as_str) == Some(station_id)
                })
            })
            .and_then(|s| s.get("name").and_then(Value::as_str))
            .unwrap_or(station_id)
            .to_string()
    }
}

/// Render an RFC 3339 timestamp the way `en-SG` locales print it,
/// e.g. `18/10/2026, 2:30:00 pm`. Unparseable input is returned unchanged.
#[must_use]
pub fn format_sg_timestamp(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw).map_or_else(|_| raw.to_string(), |dt| format_sg_time(&dt))
}

/// Current time rendered like [`format_sg_timestamp`].
pub(crate) fn sg_now() -> String {
    format_sg_time(&Utc::now().fixed_offset())
}

fn format_sg_time(dt: &DateTime<FixedOffset>) -> String {
    match FixedOffset::east_opt(SGT_OFFSET_SECS) {
        Some(sgt) => dt
            .with_timezone(&sgt)
            .format("%d/%m/%Y, %-I:%M:%S %P")
            .to_string(),
        None => dt.to_rfc3339(),
    }
}
