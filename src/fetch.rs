//! Generic JSON retrieval over HTTP
//!
//! The temperature source depends only on [`JsonFetcher`]; transport details
//! (connection pooling, optional transient retries) stay behind it.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Url;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::ArchiveConfig;
use crate::{GradtageError, Result};

/// Retrieve structured data for an endpoint with query parameters.
///
/// Implementations fail with `Network` on transport errors and non-success
/// status codes, and with `DataFormat` when the payload is not JSON.
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    async fn get_json(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
        timeout: Duration,
    ) -> Result<Value>;
}

/// `reqwest` based fetcher rooted at a base URL
pub struct HttpJsonFetcher {
    client: ClientWithMiddleware,
    base_url: String,
}

impl HttpJsonFetcher {
    /// Create a fetcher for `base_url` with up to `max_retries` transient retries
    pub fn new(base_url: impl Into<String>, max_retries: u32) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("gradtage/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GradtageError::config(format!("Failed to create HTTP client: {e}")))?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(max_retries);
        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ArchiveConfig) -> Result<Self> {
        Self::new(config.base_url.clone(), config.max_retries)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint_url(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Url> {
        let raw = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        Url::parse_with_params(&raw, query.iter().map(|(k, v)| (*k, v.as_str())))
            .map_err(|e| GradtageError::config(format!("Invalid endpoint URL '{raw}': {e}")))
    }
}

#[async_trait]
impl JsonFetcher for HttpJsonFetcher {
    #[instrument(skip(self, query), fields(base_url = %self.base_url))]
    async fn get_json(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
        timeout: Duration,
    ) -> Result<Value> {
        let url = self.endpoint_url(endpoint, query)?;
        debug!("Requesting {}", url);
        let start_time = Instant::now();

        let response = self.client.get(url).timeout(timeout).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Archive request failed with HTTP {}", status);
            return Err(GradtageError::network(format!("HTTP {status}")));
        }

        let body = response.bytes().await?;
        let value: Value = serde_json::from_slice(&body)?;

        debug!(
            "Received {} bytes in {:.3}s",
            body.len(),
            start_time.elapsed().as_secs_f64()
        );
        Ok(value)
    }
}
