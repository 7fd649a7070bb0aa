//! Feed descriptor table.
//!
//! Every upstream feed is described by one [`FeedDescriptor`]: where it lives,
//! which envelope generation wraps it, how its readings are laid out, and which
//! fact it contributes. Adding a feed means adding a row here, not a function.

use serde::{Deserialize, Serialize};

/// Which upstream API generation serves a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiGeneration {
    /// `api.data.gov.sg/v1` style endpoints.
    V1,
    /// `api-open.data.gov.sg/v2` style endpoints.
    V2,
}

/// Envelope wrapping the readings of a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeKind {
    /// `{code: 0, data: {items: [...]}}`.
    Coded,
    /// `{items: [...], metadata?: {...}}`.
    Items,
}

/// Layout of the readings inside the first envelope item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingsShape {
    /// `readings: [{station_id, value}]` with names in `metadata.stations`.
    Stations,
    /// `readings: {<key>: {<region>: value}}`.
    RegionMap(&'static str),
    /// `index: [{value, timestamp}]`, most recent first.
    IndexList,
    /// `forecasts: [{area, forecast}]`.
    AreaForecasts,
    /// `general: {forecast, temperature: {low, high}, relative_humidity: {low, high}}`.
    GeneralForecast,
    /// `forecasts: [{date, forecast, temperature: {low, high}}]`.
    DailyForecasts,
    /// `cameras: [{camera_id, image, location, timestamp}]`.
    Cameras,
}

/// A fact the system knows how to derive from a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    Temperature,
    Humidity,
    WindSpeed,
    WindDirection,
    Rainfall,
    Psi,
    Pm25,
    UvIndex,
    Forecast2h,
    Forecast24h,
    Forecast4d,
    TrafficSummary,
}

impl Metric {
    /// Human-readable name used in cards and prompts.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Temperature => "Temperature",
            Self::Humidity => "Humidity",
            Self::WindSpeed => "Wind Speed",
            Self::WindDirection => "Wind Direction",
            Self::Rainfall => "Rainfall",
            Self::Psi => "PSI",
            Self::Pm25 => "PM2.5",
            Self::UvIndex => "UV Index",
            Self::Forecast2h => "2-Hour Forecast",
            Self::Forecast24h => "24-Hour Forecast",
            Self::Forecast4d => "4-Day Outlook",
            Self::TrafficSummary => "Traffic Cameras",
        }
    }

    /// Unit suffix appended to numeric values. Empty for dimensionless values.
    #[must_use]
    pub fn unit(self) -> &'static str {
        match self {
            Self::Temperature => "°C",
            Self::Humidity => "%",
            Self::WindSpeed => " knots",
            Self::WindDirection => "°",
            Self::Rainfall => "mm",
            Self::Pm25 => " µg/m³",
            _ => "",
        }
    }

    /// Whether the fact is numeric (reduced across stations) or free text.
    #[must_use]
    pub fn is_numeric(self) -> bool {
        !matches!(
            self,
            Self::Forecast2h | Self::Forecast24h | Self::Forecast4d | Self::TrafficSummary
        )
    }

    /// How many station readings collapse into one representative value.
    #[must_use]
    pub fn reduction(self) -> Reduction {
        match self {
            Self::WindDirection => Reduction::First,
            m if m.is_numeric() => Reduction::Max,
            _ => Reduction::Join,
        }
    }
}

/// Reduction from many station readings to one fact value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    /// Highest reading across stations.
    Max,
    /// First reported station.
    First,
    /// Text readings joined in feed order.
    Join,
}

/// One upstream feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedKind {
    TwoHourForecast,
    DayForecast,
    FourDayOutlook,
    Temperature,
    Humidity,
    WindSpeed,
    WindDirection,
    Rainfall,
    Psi,
    Pm25,
    UvIndex,
    TrafficCameras,
}

impl FeedKind {
    /// Every feed, in dashboard order.
    pub const ALL: [FeedKind; 12] = [
        Self::TwoHourForecast,
        Self::DayForecast,
        Self::FourDayOutlook,
        Self::Temperature,
        Self::Humidity,
        Self::WindSpeed,
        Self::WindDirection,
        Self::Rainfall,
        Self::Psi,
        Self::Pm25,
        Self::UvIndex,
        Self::TrafficCameras,
    ];

    /// Descriptor row for this feed.
    #[must_use]
    pub fn descriptor(self) -> &'static FeedDescriptor {
        // FEEDS is declared in the same order as the enum.
        &FEEDS[self as usize]
    }

    /// Short name used in logs and failure reasons.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }
}

/// Static description of one upstream feed.
#[derive(Debug, Clone, Copy)]
pub struct FeedDescriptor {
    pub kind: FeedKind,
    pub name: &'static str,
    pub api: ApiGeneration,
    pub path: &'static str,
    pub envelope: EnvelopeKind,
    pub shape: ReadingsShape,
    pub metric: Metric,
    /// Heading used for this feed's section of a merged summary.
    pub summary_label: &'static str,
    /// Name shown in the attribution footer.
    pub attribution: &'static str,
}

/// The descriptor table. Order matches [`FeedKind`].
pub static FEEDS: [FeedDescriptor; 12] = [
    FeedDescriptor {
        kind: FeedKind::TwoHourForecast,
        name: "two_hour_forecast",
        api: ApiGeneration::V2,
        path: "/v2/real-time/api/two-hr-forecast",
        envelope: EnvelopeKind::Coded,
        shape: ReadingsShape::AreaForecasts,
        metric: Metric::Forecast2h,
        summary_label: "FORECAST",
        attribution: "2-hr Forecast",
    },
    FeedDescriptor {
        kind: FeedKind::DayForecast,
        name: "day_forecast",
        api: ApiGeneration::V1,
        path: "/v1/environment/24-hour-weather-forecast",
        envelope: EnvelopeKind::Items,
        shape: ReadingsShape::GeneralForecast,
        metric: Metric::Forecast24h,
        summary_label: "24-HOUR OUTLOOK",
        attribution: "24-hr Forecast",
    },
    FeedDescriptor {
        kind: FeedKind::FourDayOutlook,
        name: "four_day_outlook",
        api: ApiGeneration::V1,
        path: "/v1/environment/4-day-weather-forecast",
        envelope: EnvelopeKind::Items,
        shape: ReadingsShape::DailyForecasts,
        metric: Metric::Forecast4d,
        summary_label: "4-DAY OUTLOOK",
        attribution: "4-day Outlook",
    },
    FeedDescriptor {
        kind: FeedKind::Temperature,
        name: "temperature",
        api: ApiGeneration::V1,
        path: "/v1/environment/air-temperature",
        envelope: EnvelopeKind::Items,
        shape: ReadingsShape::Stations,
        metric: Metric::Temperature,
        summary_label: "TEMPERATURE",
        attribution: "Temperature",
    },
    FeedDescriptor {
        kind: FeedKind::Humidity,
        name: "humidity",
        api: ApiGeneration::V1,
        path: "/v1/environment/relative-humidity",
        envelope: EnvelopeKind::Items,
        shape: ReadingsShape::Stations,
        metric: Metric::Humidity,
        summary_label: "HUMIDITY",
        attribution: "Humidity",
    },
    FeedDescriptor {
        kind: FeedKind::WindSpeed,
        name: "wind_speed",
        api: ApiGeneration::V1,
        path: "/v1/environment/wind-speed",
        envelope: EnvelopeKind::Items,
        shape: ReadingsShape::Stations,
        metric: Metric::WindSpeed,
        summary_label: "WIND",
        attribution: "Wind Speed",
    },
    FeedDescriptor {
        kind: FeedKind::WindDirection,
        name: "wind_direction",
        api: ApiGeneration::V1,
        path: "/v1/environment/wind-direction",
        envelope: EnvelopeKind::Items,
        shape: ReadingsShape::Stations,
        metric: Metric::WindDirection,
        summary_label: "WIND DIRECTION",
        attribution: "Wind Direction",
    },
    FeedDescriptor {
        kind: FeedKind::Rainfall,
        name: "rainfall",
        api: ApiGeneration::V1,
        path: "/v1/environment/rainfall",
        envelope: EnvelopeKind::Items,
        shape: ReadingsShape::Stations,
        metric: Metric::Rainfall,
        summary_label: "RAINFALL",
        attribution: "Rainfall",
    },
    FeedDescriptor {
        kind: FeedKind::Psi,
        name: "psi",
        api: ApiGeneration::V1,
        path: "/v1/environment/psi",
        envelope: EnvelopeKind::Items,
        shape: ReadingsShape::RegionMap("psi_twenty_four_hourly"),
        metric: Metric::Psi,
        summary_label: "PSI",
        attribution: "PSI",
    },
    FeedDescriptor {
        kind: FeedKind::Pm25,
        name: "pm25",
        api: ApiGeneration::V1,
        path: "/v1/environment/pm25",
        envelope: EnvelopeKind::Items,
        shape: ReadingsShape::RegionMap("pm25_one_hourly"),
        metric: Metric::Pm25,
        summary_label: "PM2.5",
        attribution: "PM2.5",
    },
    FeedDescriptor {
        kind: FeedKind::UvIndex,
        name: "uv_index",
        api: ApiGeneration::V1,
        path: "/v1/environment/uv-index",
        envelope: EnvelopeKind::Items,
        shape: ReadingsShape::IndexList,
        metric: Metric::UvIndex,
        summary_label: "UV INDEX",
        attribution: "UV Index",
    },
    FeedDescriptor {
        kind: FeedKind::TrafficCameras,
        name: "traffic_cameras",
        api: ApiGeneration::V1,
        path: "/v1/transport/traffic-images",
        envelope: EnvelopeKind::Items,
        shape: ReadingsShape::Cameras,
        metric: Metric::TrafficSummary,
        summary_label: "TRAFFIC",
        attribution: "Traffic Cameras",
    },
];
