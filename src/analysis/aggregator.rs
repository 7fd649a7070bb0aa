//! Concurrent fan-out over the feed adapters.

use futures_util::future::join_all;

use crate::config::FeedsConfig;
use crate::feeds::{
    fetch_feed, fetch_weather, FeedClient, FeedError, FeedKind, Metric, SourceResult,
    WEATHER_FEEDS,
};

use super::{FactSet, IntentDetector, Topics};

/// An adapter the aggregator can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adapter {
    /// Composite forecast, temperature, humidity and wind adapter.
    Weather,
    /// A single feed.
    Feed(FeedKind),
}

/// Extra feeds fetched alongside the composite weather adapter.
const WEATHER_EXTRAS: [FeedKind; 5] = [
    FeedKind::Rainfall,
    FeedKind::Psi,
    FeedKind::Pm25,
    FeedKind::UvIndex,
    FeedKind::DayForecast,
];

impl Adapter {
    /// Adapters needed to answer the given topics.
    #[must_use]
    pub fn for_topics(topics: Topics) -> Vec<Self> {
        let mut adapters = Vec::new();
        if topics.weather {
            adapters.push(Self::Weather);
            adapters.extend(WEATHER_EXTRAS.iter().map(|k| Self::Feed(*k)));
        }
        if topics.traffic {
            adapters.push(Self::Feed(FeedKind::TrafficCameras));
        }
        adapters
    }

    /// Adapters whose feeds produce any of the given metrics.
    ///
    /// Weather sub-feeds are reached through the composite adapter.
    #[must_use]
    pub fn for_metrics(metrics: &[Metric]) -> Vec<Self> {
        let produces = |kind: &FeedKind| metrics.contains(&kind.descriptor().metric);
        let mut adapters = Vec::new();
        if WEATHER_FEEDS.iter().any(produces) {
            adapters.push(Self::Weather);
        }
        adapters.extend(
            FeedKind::ALL
                .iter()
                .filter(|k| !WEATHER_FEEDS.contains(k) && produces(k))
                .map(|k| Self::Feed(*k)),
        );
        adapters
    }

    /// Every adapter, covering every feed exactly once.
    #[must_use]
    pub fn all() -> Vec<Self> {
        std::iter::once(Self::Weather)
            .chain(
                FeedKind::ALL
                    .iter()
                    .filter(|k| !WEATHER_FEEDS.contains(k))
                    .map(|k| Self::Feed(*k)),
            )
            .collect()
    }
}

/// Results of one aggregation round.
#[derive(Debug, Clone, Default)]
pub struct Aggregate {
    /// One result per adapter invoked, in request order.
    pub results: Vec<SourceResult>,
    pub facts: FactSet,
}

impl Aggregate {
    /// Build from raw results.
    #[must_use]
    pub fn from_results(results: Vec<SourceResult>) -> Self {
        let facts = FactSet::from_results(&results);
        Self { results, facts }
    }

    /// Number of adapters that succeeded.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }
}

/// Fans requests out to the adapters and merges what comes back.
#[derive(Debug, Clone)]
pub struct Aggregator {
    client: FeedClient,
    config: FeedsConfig,
    detector: IntentDetector,
}

impl Aggregator {
    /// Create an aggregator from feed configuration.
    ///
    /// # Errors
    ///
    /// Returns `FeedError::Network` if the HTTP client cannot be built.
    pub fn new(config: FeedsConfig) -> Result<Self, FeedError> {
        let client = FeedClient::new(config.timeout())?;
        Ok(Self {
            client,
            config,
            detector: IntentDetector::with_default_rules(),
        })
    }

    /// Replace the intent detector (builder pattern).
    #[must_use]
    pub fn with_detector(mut self, detector: IntentDetector) -> Self {
        self.detector = detector;
        self
    }

    /// Topics a free-text query is about.
    #[must_use]
    pub fn detect(&self, text: &str) -> Topics {
        self.detector.detect(text)
    }

    /// Invoke the adapters concurrently and wait for all of them.
    pub async fn collect(&self, adapters: &[Adapter]) -> Aggregate {
        let results = join_all(adapters.iter().map(|adapter| self.invoke(*adapter))).await;
        let aggregate = Aggregate::from_results(results);
        tracing::info!(
            requested = adapters.len(),
            succeeded = aggregate.succeeded(),
            "Aggregation complete"
        );
        aggregate
    }

    /// Fetch what the topics need. No topics means no fetches.
    pub async fn gather(&self, topics: Topics) -> Aggregate {
        self.collect(&Adapter::for_topics(topics)).await
    }

    /// Fetch only what the given metrics need.
    pub async fn gather_metrics(&self, metrics: &[Metric]) -> Aggregate {
        self.collect(&Adapter::for_metrics(metrics)).await
    }

    /// Fetch every feed.
    pub async fn gather_all(&self) -> Aggregate {
        self.collect(&Adapter::all()).await
    }

    async fn invoke(&self, adapter: Adapter) -> SourceResult {
        match adapter {
            Adapter::Weather => fetch_weather(&self.client, &self.config).await,
            Adapter::Feed(kind) => fetch_feed(&self.client, &self.config, kind).await,
        }
    }
}
