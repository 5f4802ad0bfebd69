//! HTTP fetcher backed by `reqwest`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use coinrelay_core::error::{GatewayError, Result};
use coinrelay_core::traits::Fetch;
use coinrelay_core::types::UpstreamRequest;

/// Fetcher configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Request timeout in milliseconds. Applied to every outbound call; this
    /// is the only timeout the gateway enforces.
    pub timeout_ms: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self { timeout_ms: 10_000 }
    }
}

/// Performs single outbound GET requests against upstream APIs.
///
/// The body is parsed as JSON and treated opaquely; no schema is imposed.
/// Failures are never retried here, the dispatcher propagates them as-is.
pub struct HttpFetcher {
    client: reqwest::Client,
    config: FetcherConfig,
}

impl HttpFetcher {
    /// Creates a fetcher with the default configuration.
    pub fn new() -> Self {
        Self::with_config(FetcherConfig::default())
    }

    /// Creates a fetcher with a custom configuration.
    pub fn with_config(config: FetcherConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(config.timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    #[instrument(skip(self, request), fields(url = %request.url))]
    async fn fetch(&self, request: &UpstreamRequest) -> Result<Value> {
        let mut req = self.client.get(&request.url);
        for (name, value) in &request.headers {
            req = req.header(*name, value);
        }

        let response = req.send().await.map_err(|e| {
            warn!(error = %e, "Upstream request failed");
            GatewayError::Upstream(format!("request to upstream failed: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Upstream returned error status");
            return Err(GatewayError::Upstream(format!(
                "upstream returned HTTP {status}"
            )));
        }

        let payload = response.json::<Value>().await.map_err(|e| {
            warn!(error = %e, "Upstream body was not valid JSON");
            GatewayError::Upstream(format!("invalid JSON from upstream: {e}"))
        })?;

        debug!("Upstream fetch succeeded");
        Ok(payload)
    }
}
