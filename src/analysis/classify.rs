//! Threshold rules turning a fact set into safety and risk judgments.
//!
//! Every rule is a pure function of the [`FactSet`]. An absent metric is no
//! signal: it never trips a rule and never counts as a safe reading either,
//! it is simply skipped.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::feeds::{mentions_rain, with_unit, Metric};

use super::FactSet;

/// UV index above which jogging is unsafe.
pub const JOGGING_MAX_UV: f64 = 7.0;
/// PSI above which jogging is unsafe.
pub const JOGGING_MAX_PSI: f64 = 100.0;
/// UV index above which outdoor play is unsafe for children.
pub const CHILD_MAX_UV: f64 = 6.0;
/// PSI above which outdoor play is unsafe for children.
pub const CHILD_MAX_PSI: f64 = 55.0;
/// Relative humidity above which laundry will not dry.
pub const LAUNDRY_MAX_HUMIDITY: f64 = 85.0;
/// Wind speed (knots) below which haze lingers.
pub const HAZE_LOW_WIND_KNOTS: f64 = 5.0;

/// Which judgment to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    Jogging,
    ChildPlay,
    Laundry,
    Picnic,
    RainPrediction,
    HazeRisk,
}

impl CheckKind {
    pub const ALL: [CheckKind; 6] = [
        Self::Jogging,
        Self::ChildPlay,
        Self::Laundry,
        Self::Picnic,
        Self::RainPrediction,
        Self::HazeRisk,
    ];

    /// Card heading.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Jogging => "🏃 Jogging Check",
            Self::ChildPlay => "👶 Children Outdoor Play",
            Self::Laundry => "👕 Laundry Check",
            Self::Picnic => "🧺 Picnic Check",
            Self::RainPrediction => "🌧️ Rain Prediction",
            Self::HazeRisk => "🌫️ Haze Risk",
        }
    }

    /// Metrics the rule reads.
    #[must_use]
    pub fn inputs(self) -> &'static [Metric] {
        match self {
            Self::Jogging => &[Metric::UvIndex, Metric::Psi, Metric::Rainfall],
            Self::ChildPlay => &[Metric::UvIndex, Metric::Psi],
            Self::Laundry => &[
                Metric::Rainfall,
                Metric::Humidity,
                Metric::Forecast2h,
                Metric::Forecast24h,
            ],
            Self::Picnic | Self::RainPrediction => {
                &[Metric::Rainfall, Metric::Forecast2h, Metric::Forecast24h]
            }
            Self::HazeRisk => &[Metric::Psi, Metric::WindSpeed],
        }
    }

    /// Run the rule for this kind.
    #[must_use]
    pub fn assess(self, facts: &FactSet) -> Assessment {
        match self {
            Self::Jogging => jogging(facts),
            Self::ChildPlay => child_play(facts),
            Self::Laundry => laundry(facts),
            Self::Picnic => picnic(facts),
            Self::RainPrediction => rain_prediction(facts),
            Self::HazeRisk => haze_risk(facts),
        }
    }
}

/// Ordinal risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Severe,
}

impl RiskLevel {
    /// One level up, saturating at `Severe`.
    #[must_use]
    pub fn raised(self) -> Self {
        match self {
            Self::Low => Self::Moderate,
            Self::Moderate => Self::High,
            Self::High | Self::Severe => Self::Severe,
        }
    }

    fn from_signal(signal: u8) -> Self {
        match signal {
            0 => Self::Low,
            1 => Self::Moderate,
            _ => Self::High,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::Severe => "severe",
        };
        f.write_str(s)
    }
}

/// PSI health bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PsiBand {
    Good,
    Moderate,
    Unhealthy,
    Hazardous,
}

impl PsiBand {
    #[must_use]
    pub fn from_psi(psi: f64) -> Self {
        if psi <= 50.0 {
            Self::Good
        } else if psi <= 100.0 {
            Self::Moderate
        } else if psi <= 300.0 {
            Self::Unhealthy
        } else {
            Self::Hazardous
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Moderate => "moderate",
            Self::Unhealthy => "unhealthy",
            Self::Hazardous => "hazardous",
        }
    }

    fn base_risk(self) -> RiskLevel {
        match self {
            Self::Good => RiskLevel::Low,
            Self::Moderate => RiskLevel::Moderate,
            Self::Unhealthy => RiskLevel::High,
            Self::Hazardous => RiskLevel::Severe,
        }
    }
}

/// Outcome of one rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub kind: CheckKind,
    /// Whether the activity is advisable.
    pub safe: bool,
    /// Risk level, for the ordinal rules.
    pub risk: Option<RiskLevel>,
    /// Number of rain signals that fired, for the rain-based rules.
    pub rain_signal: Option<u8>,
    /// One entry per condition that fired. Never empty when `safe` is false.
    pub reasons: Vec<String>,
    /// The facts the rule read.
    pub inputs: FactSet,
}

impl Assessment {
    fn new(kind: CheckKind, facts: &FactSet, reasons: Vec<String>) -> Self {
        Self {
            kind,
            safe: reasons.is_empty(),
            risk: None,
            rain_signal: None,
            reasons,
            inputs: facts.subset(kind.inputs()),
        }
    }

    /// Likelihood phrase for rain predictions.
    #[must_use]
    pub fn likelihood(&self) -> Option<&'static str> {
        if self.kind != CheckKind::RainPrediction {
            return None;
        }
        self.risk.map(|risk| match risk {
            RiskLevel::Low => "Unlikely",
            RiskLevel::Moderate => "Possible",
            RiskLevel::High | RiskLevel::Severe => "Likely",
        })
    }
}

/// Rain anywhere in the two-hour forecast. The per-area count covers every
/// area; the text only covers the sampled ones.
fn two_hour_rain(facts: &FactSet) -> bool {
    match facts.forecast_2h_rain_areas {
        Some(areas) => areas > 0,
        None => facts.forecast_2h.as_deref().is_some_and(mentions_rain),
    }
}

fn above(value: Option<f64>, threshold: f64) -> Option<f64> {
    value.filter(|v| *v > threshold)
}

/// Unsafe when UV > 7, PSI > 100, or any rain is falling.
#[must_use]
pub fn jogging(facts: &FactSet) -> Assessment {
    let mut reasons = Vec::new();
    if let Some(uv) = above(facts.uv_index, JOGGING_MAX_UV) {
        reasons.push(format!("UV index is very high ({uv})"));
    }
    if let Some(psi) = above(facts.psi, JOGGING_MAX_PSI) {
        reasons.push(format!("PSI is unhealthy ({psi})"));
    }
    if let Some(rain) = above(facts.rainfall, 0.0) {
        reasons.push(format!(
            "Rain is falling ({})",
            with_unit(Metric::Rainfall, rain)
        ));
    }
    Assessment::new(CheckKind::Jogging, facts, reasons)
}

/// Unsafe when UV > 6 or PSI > 55.
#[must_use]
pub fn child_play(facts: &FactSet) -> Assessment {
    let mut reasons = Vec::new();
    if let Some(uv) = above(facts.uv_index, CHILD_MAX_UV) {
        reasons.push(format!("UV index too high for children ({uv})"));
    }
    if let Some(psi) = above(facts.psi, CHILD_MAX_PSI) {
        reasons.push(format!("Air quality not ideal for children (PSI {psi})"));
    }
    Assessment::new(CheckKind::ChildPlay, facts, reasons)
}

/// Unsuitable when raining, humidity > 85%, or a forecast mentions rain.
#[must_use]
pub fn laundry(facts: &FactSet) -> Assessment {
    let mut reasons = Vec::new();
    if let Some(rain) = above(facts.rainfall, 0.0) {
        reasons.push(format!(
            "Rain recorded ({})",
            with_unit(Metric::Rainfall, rain)
        ));
    }
    if let Some(humidity) = above(facts.humidity, LAUNDRY_MAX_HUMIDITY) {
        reasons.push(format!(
            "Humidity too high for drying ({})",
            with_unit(Metric::Humidity, humidity)
        ));
    }
    if two_hour_rain(facts) {
        reasons.push("Rain expected in the next 2 hours".to_string());
    }
    if facts.forecast_24h.as_deref().is_some_and(mentions_rain) {
        reasons.push("Rain expected within 24 hours".to_string());
    }
    Assessment::new(CheckKind::Laundry, facts, reasons)
}

/// Rain signals shared by the picnic and rain rules.
fn rain_signals(facts: &FactSet) -> Vec<String> {
    let mut signals = Vec::new();
    if let Some(rain) = above(facts.rainfall, 0.0) {
        signals.push(format!(
            "Current rainfall {}",
            with_unit(Metric::Rainfall, rain)
        ));
    }
    if two_hour_rain(facts) {
        signals.push("2-hour forecast shows rain".to_string());
    }
    if facts.forecast_24h.as_deref().is_some_and(mentions_rain) {
        signals.push("24-hour forecast shows rain".to_string());
    }
    signals
}

fn signal_count(signals: &[String]) -> u8 {
    u8::try_from(signals.len()).unwrap_or(u8::MAX)
}

/// Rain signal 0 is suitable; 1 is moderate risk, 2 or more high.
#[must_use]
pub fn picnic(facts: &FactSet) -> Assessment {
    let reasons = rain_signals(facts);
    let signal = signal_count(&reasons);
    Assessment {
        risk: Some(RiskLevel::from_signal(signal)),
        rain_signal: Some(signal),
        ..Assessment::new(CheckKind::Picnic, facts, reasons)
    }
}

/// Likelihood of rain from the same signals as [`picnic`].
#[must_use]
pub fn rain_prediction(facts: &FactSet) -> Assessment {
    let reasons = rain_signals(facts);
    let signal = signal_count(&reasons);
    Assessment {
        risk: Some(RiskLevel::from_signal(signal)),
        rain_signal: Some(signal),
        ..Assessment::new(CheckKind::RainPrediction, facts, reasons)
    }
}

/// Risk from the PSI band, raised one level in any band when wind is too
/// light to disperse haze. Safe while the risk stays at moderate or below.
#[must_use]
pub fn haze_risk(facts: &FactSet) -> Assessment {
    let Some(psi) = facts.psi else {
        return Assessment::new(CheckKind::HazeRisk, facts, Vec::new());
    };

    let band = PsiBand::from_psi(psi);
    let mut risk = band.base_risk();
    let mut reasons = Vec::new();

    if band != PsiBand::Good {
        reasons.push(format!("PSI {psi} is in the {} band", band.label()));
    }
    if let Some(wind) = facts.wind_speed.filter(|w| *w < HAZE_LOW_WIND_KNOTS) {
        risk = risk.raised();
        reasons.push(format!(
            "Light winds ({}) let haze linger",
            with_unit(Metric::WindSpeed, wind)
        ));
    }

    Assessment {
        safe: risk <= RiskLevel::Moderate,
        risk: Some(risk),
        ..Assessment::new(CheckKind::HazeRisk, facts, reasons)
    }
}
