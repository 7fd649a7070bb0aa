//! Keyword intent detection for free-text queries.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// Weather, air-quality and forecast keywords.
pub const WEATHER_PATTERN: &str = r"singapore|weather|forecast|rain|sunny|cloudy|temperature|humid";

/// Road and traffic keywords.
pub const TRAFFIC_PATTERN: &str =
    r"traffic|jam|congest|road|expressway|highway|camera|checkpoint|causeway";

/// Topic a query may be about. Topics are not exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Weather,
    Traffic,
}

/// Error type for intent rules.
#[derive(thiserror::Error, Debug)]
pub enum IntentError {
    /// Invalid regex pattern.
    #[error("Invalid intent pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// One case-insensitive pattern mapped to a topic.
#[derive(Debug, Clone)]
pub struct IntentRule {
    topic: Topic,
    pattern: Regex,
}

impl IntentRule {
    /// Create a new rule.
    ///
    /// # Errors
    ///
    /// Returns `IntentError::InvalidPattern` if the regex is invalid.
    pub fn new(topic: Topic, pattern: &str) -> Result<Self, IntentError> {
        Ok(Self {
            topic,
            pattern: RegexBuilder::new(pattern).case_insensitive(true).build()?,
        })
    }

    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    #[must_use]
    pub fn topic(&self) -> Topic {
        self.topic
    }
}

/// Topics detected in one query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Topics {
    pub weather: bool,
    pub traffic: bool,
}

impl Topics {
    /// Both topics.
    pub const ALL: Topics = Topics {
        weather: true,
        traffic: true,
    };

    #[must_use]
    pub fn any(self) -> bool {
        self.weather || self.traffic
    }
}

/// Maps query text to topics.
#[derive(Debug, Clone, Default)]
pub struct IntentDetector {
    rules: Vec<IntentRule>,
}

impl IntentDetector {
    /// Create a detector with no rules.
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a detector with the weather and traffic keyword rules.
    #[must_use]
    pub fn with_default_rules() -> Self {
        let rules = [
            IntentRule::new(Topic::Weather, WEATHER_PATTERN),
            IntentRule::new(Topic::Traffic, TRAFFIC_PATTERN),
        ]
        .into_iter()
        .filter_map(|result| match result {
            Ok(rule) => Some(rule),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to compile intent rule");
                None
            }
        })
        .collect();
        Self { rules }
    }

    /// Add a rule.
    pub fn add_rule(&mut self, rule: IntentRule) {
        self.rules.push(rule);
    }

    /// Detect every topic whose rule matches the text.
    #[must_use]
    pub fn detect(&self, text: &str) -> Topics {
        let mut topics = Topics::default();
        for rule in self.rules.iter().filter(|r| r.matches(text)) {
            match rule.topic() {
                Topic::Weather => topics.weather = true,
                Topic::Traffic => topics.traffic = true,
            }
        }
        topics
    }
}
