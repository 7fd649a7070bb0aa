//! Merged per-interaction fact set.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::feeds::{FeedKind, Metric, Reduction, SourceData, SourceResult};

/// Snapshot of every metric fetched successfully for one interaction.
///
/// Absent metrics stay `None`; nothing is defaulted to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FactSet {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
    pub rainfall: Option<f64>,
    pub psi: Option<f64>,
    pub pm25: Option<f64>,
    pub uv_index: Option<f64>,
    pub forecast_2h: Option<String>,
    /// Areas forecasting rain in the next two hours, out of every area
    /// reported. `forecast_2h` only lists a sample.
    pub forecast_2h_rain_areas: Option<usize>,
    pub forecast_24h: Option<String>,
    pub forecast_4d: Option<String>,
    pub traffic_summary: Option<String>,
    /// Observation time of the first contributing source.
    pub observed_at: Option<String>,
    /// Feeds that contributed at least one value.
    #[serde(skip)]
    pub sources: BTreeSet<FeedKind>,
}

impl FactSet {
    /// Merge every successful result. Failed results contribute nothing.
    #[must_use]
    pub fn from_results(results: &[SourceResult]) -> Self {
        let mut facts = Self::default();
        for data in results.iter().filter_map(SourceResult::data) {
            facts.absorb(data);
        }
        facts
    }

    fn absorb(&mut self, data: &SourceData) {
        let mut touched = false;

        for metric in data.readings.iter().map(|r| r.metric).collect::<BTreeSet<_>>() {
            let readings = data.readings.iter().filter(|r| r.metric == metric);
            match metric.reduction() {
                Reduction::Max => {
                    let reduced = readings.filter_map(|r| r.value.as_number()).reduce(f64::max);
                    if let Some(value) = reduced {
                        let merged = self.number(metric).map_or(value, |v| v.max(value));
                        self.set_number(metric, merged);
                        touched = true;
                    }
                }
                Reduction::First => {
                    if self.number(metric).is_none() {
                        if let Some(value) = readings.filter_map(|r| r.value.as_number()).next() {
                            self.set_number(metric, value);
                            touched = true;
                        }
                    }
                }
                Reduction::Join => {
                    if self.text(metric).is_none() {
                        let text = if metric == Metric::TrafficSummary {
                            format!(
                                "{} cameras online ({} sampled)",
                                data.total,
                                readings.count()
                            )
                        } else {
                            readings
                                .filter_map(|r| {
                                    let value = r.value.as_text()?;
                                    Some(if r.label.is_empty() {
                                        value.to_string()
                                    } else {
                                        format!("{}: {value}", r.label)
                                    })
                                })
                                .collect::<Vec<_>>()
                                .join(", ")
                        };
                        if !text.is_empty() {
                            self.set_text(metric, text);
                            touched = true;
                        }
                    }
                }
            }
        }

        if self.forecast_2h_rain_areas.is_none() {
            self.forecast_2h_rain_areas = data.rain_areas;
        }

        if touched {
            self.sources.extend(data.feeds.iter().copied());
            if self.observed_at.is_none() {
                self.observed_at = Some(data.timestamp.clone());
            }
        }
    }

    /// Numeric value of a metric, if present.
    #[must_use]
    pub fn number(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Temperature => self.temperature,
            Metric::Humidity => self.humidity,
            Metric::WindSpeed => self.wind_speed,
            Metric::WindDirection => self.wind_direction,
            Metric::Rainfall => self.rainfall,
            Metric::Psi => self.psi,
            Metric::Pm25 => self.pm25,
            Metric::UvIndex => self.uv_index,
            _ => None,
        }
    }

    /// Text value of a metric, if present.
    #[must_use]
    pub fn text(&self, metric: Metric) -> Option<&str> {
        match metric {
            Metric::Forecast2h => self.forecast_2h.as_deref(),
            Metric::Forecast24h => self.forecast_24h.as_deref(),
            Metric::Forecast4d => self.forecast_4d.as_deref(),
            Metric::TrafficSummary => self.traffic_summary.as_deref(),
            _ => None,
        }
    }

    /// Whether a metric has a value.
    #[must_use]
    pub fn has(&self, metric: Metric) -> bool {
        self.number(metric).is_some() || self.text(metric).is_some()
    }

    fn set_number(&mut self, metric: Metric, value: f64) {
        let slot = match metric {
            Metric::Temperature => &mut self.temperature,
            Metric::Humidity => &mut self.humidity,
            Metric::WindSpeed => &mut self.wind_speed,
            Metric::WindDirection => &mut self.wind_direction,
            Metric::Rainfall => &mut self.rainfall,
            Metric::Psi => &mut self.psi,
            Metric::Pm25 => &mut self.pm25,
            Metric::UvIndex => &mut self.uv_index,
            _ => return,
        };
        *slot = Some(value);
    }

    fn set_text(&mut self, metric: Metric, value: String) {
        let slot = match metric {
            Metric::Forecast2h => &mut self.forecast_2h,
            Metric::Forecast24h => &mut self.forecast_24h,
            Metric::Forecast4d => &mut self.forecast_4d,
            Metric::TrafficSummary => &mut self.traffic_summary,
            _ => return,
        };
        *slot = Some(value);
    }

    /// Copy of this fact set keeping only the given metrics.
    #[must_use]
    pub fn subset(&self, metrics: &[Metric]) -> Self {
        let mut out = Self {
            observed_at: self.observed_at.clone(),
            ..Self::default()
        };
        for metric in metrics {
            if let Some(v) = self.number(*metric) {
                out.set_number(*metric, v);
            }
            if let Some(t) = self.text(*metric) {
                out.set_text(*metric, t.to_string());
            }
        }
        if metrics.contains(&Metric::Forecast2h) {
            out.forecast_2h_rain_areas = self.forecast_2h_rain_areas;
        }
        out.sources = self
            .sources
            .iter()
            .copied()
            .filter(|kind| metrics.contains(&kind.descriptor().metric))
            .collect();
        out
    }

    /// True when no metric has a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        ALL_METRICS.iter().all(|m| !self.has(*m))
    }

    /// Metrics that have a value, in display order.
    #[must_use]
    pub fn present(&self) -> Vec<Metric> {
        ALL_METRICS.iter().copied().filter(|m| self.has(*m)).collect()
    }
}

/// Every metric, in display order.
pub const ALL_METRICS: [Metric; 12] = [
    Metric::Temperature,
    Metric::Humidity,
    Metric::WindSpeed,
    Metric::WindDirection,
    Metric::Rainfall,
    Metric::Psi,
    Metric::Pm25,
    Metric::UvIndex,
    Metric::Forecast2h,
    Metric::Forecast24h,
    Metric::Forecast4d,
    Metric::TrafficSummary,
];
