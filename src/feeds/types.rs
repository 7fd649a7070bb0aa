//! Normalized feed results.

use serde::Serialize;

use super::{FeedError, FeedKind, Metric};

/// A traffic camera capture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CameraSnapshot {
    pub id: String,
    pub image_url: String,
    /// Rounded to 4 decimal places.
    pub latitude: f64,
    /// Rounded to 4 decimal places.
    pub longitude: f64,
    pub captured_at: String,
}

/// Value carried by a reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReadingValue {
    Number(f64),
    Text(String),
    Camera(CameraSnapshot),
}

impl ReadingValue {
    /// Numeric value, if any.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Text value, if any.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// One station, region, or area reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub metric: Metric,
    /// Station, region, area, or date the reading belongs to.
    pub label: String,
    pub value: ReadingValue,
}

impl Reading {
    #[must_use]
    pub fn number(metric: Metric, label: impl Into<String>, value: f64) -> Self {
        Self {
            metric,
            label: label.into(),
            value: ReadingValue::Number(value),
        }
    }

    #[must_use]
    pub fn text(metric: Metric, label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            metric,
            label: label.into(),
            value: ReadingValue::Text(value.into()),
        }
    }
}

/// Payload of a successful adapter call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceData {
    /// Feeds that contributed. One for plain adapters, several for composites.
    pub feeds: Vec<FeedKind>,
    /// Locale-formatted observation time.
    pub timestamp: String,
    pub readings: Vec<Reading>,
    pub summary: String,
    /// Number of entries upstream before any sampling.
    pub total: usize,
    /// Areas whose forecast mentions rain, counted before sampling. Only set
    /// by area forecasts.
    pub rain_areas: Option<usize>,
}

/// Outcome of one adapter invocation.
///
/// Either every field of [`SourceData`] is present or only a reason is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceResult {
    Success(SourceData),
    Failure { source: String, reason: String },
}

impl SourceResult {
    /// Build a failed result from an error.
    #[must_use]
    pub fn failed(source: impl Into<String>, error: &FeedError) -> Self {
        Self::Failure {
            source: source.into(),
            reason: error.to_string(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Successful payload, if any.
    #[must_use]
    pub fn data(&self) -> Option<&SourceData> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure { .. } => None,
        }
    }

    /// Failure reason, if any.
    #[must_use]
    pub fn error_reason(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure { reason, .. } => Some(reason),
        }
    }
}
