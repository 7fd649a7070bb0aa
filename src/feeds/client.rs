//! JSON-over-HTTPS fetch primitive.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use super::FeedError;

/// Connection timeout for feed requests.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Fetches and decodes upstream feeds.
///
/// A single GET per call. No retries.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: Client,
}

impl FeedClient {
    /// Create a client whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `FeedError::Network` if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, FeedError> {
        let http = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .timeout(timeout)
            .user_agent(concat!("weather-uncle/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FeedError::Network(e.to_string()))?;
        Ok(Self { http })
    }

    /// GET `url`, buffer the body and decode it as JSON.
    ///
    /// # Errors
    ///
    /// Network failures, timeouts and non-2xx statuses map to the matching
    /// `FeedError`; a body that is not JSON maps to `FeedError::Decode`.
    pub async fn fetch_json(&self, url: &str) -> Result<Value, FeedError> {
        tracing::debug!(url = %url, "Fetching feed");

        let response = self.http.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FeedError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FeedError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| FeedError::Decode(e.to_string()))
    }
}
