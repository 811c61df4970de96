//! MAAS (Mars Atmospheric Aggregation Service) client.
//!
//! Fetches Curiosity REMS weather reports. The API exposes the latest report
//! at `/` and a specific sol at `/{sol}`.

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;
use std::time::Duration;

/// Public community MAAS2 endpoint.
pub const DEFAULT_MAAS_BASE: &str = "https://api.maas2.apollorion.com";

/// Upstream request timeout.
pub const DEFAULT_MAAS_TIMEOUT_SECS: u64 = 20;

pub const DEFAULT_MAAS_USER_AGENT: &str = "mars-weather-api/1.0";

/// Failure talking to MAAS. Every variant keeps the URL and the underlying cause.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("invalid client configuration: {0}")]
    Config(String),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Path for a MAAS report: `/` for the latest sol, `/{sol}` otherwise.
pub fn maas_path(sol: Option<i64>) -> String {
    match sol {
        None => "/".to_string(),
        Some(sol) => format!("/{}", sol),
    }
}

/// Client for the MAAS API.
#[derive(Debug, Clone)]
pub struct MaasClient {
    client: reqwest::Client,
    base_url: String,
}

impl MaasClient {
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .map_err(|e| UpstreamError::Config(format!("Invalid User-Agent: {}", e)))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::Config(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the JSON document at `path` (`"/"` or `"/{sol}"`).
    ///
    /// A single attempt: connection errors, timeouts, non-2xx statuses and
    /// bodies that are not JSON all come back as `UpstreamError`.
    pub async fn fetch(&self, path: &str) -> Result<Value, UpstreamError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("Fetching MAAS report: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| UpstreamError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status { url, status });
        }

        response
            .json::<Value>()
            .await
            .map_err(|source| UpstreamError::Decode { url, source })
    }
}
