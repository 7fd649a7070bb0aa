//! Feed error types.

/// Errors raised while fetching or decoding an upstream feed.
///
/// These never escape an adapter: every variant is folded into a failed
/// [`SourceResult`](super::SourceResult) at the adapter boundary.
#[derive(thiserror::Error, Debug)]
pub enum FeedError {
    /// Feed did not answer within the configured timeout.
    #[error("Feed request timed out: {url}")]
    Timeout { url: String },

    /// Feed unreachable.
    #[error("Feed request failed: {0}")]
    Network(String),

    /// Feed answered with a non-success HTTP status.
    #[error("Feed returned HTTP {status}")]
    Status { status: u16 },

    /// Feed answered but the body was not valid JSON.
    #[error("Failed to parse feed payload: {0}")]
    Decode(String),

    /// Envelope well-formed JSON but missing the expected wrapper.
    #[error("Invalid data format: {0}")]
    InvalidEnvelope(String),

    /// Envelope valid but carries no usable readings.
    #[error("No data available: {0}")]
    Empty(String),
}

impl From<reqwest::Error> for FeedError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout {
                url: e.url().map_or_else(String::new, ToString::to_string),
            }
        } else if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}
