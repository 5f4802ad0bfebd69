//! App state: config, route table, dispatcher.

use std::path::PathBuf;
use std::sync::Arc;

use coinrelay_core::traits::Fetch;
use coinrelay_upstream::{FetcherConfig, HttpFetcher};

use crate::dispatch::Dispatcher;
use crate::table::RouteTable;

/// Process configuration, read once at startup.
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    /// Listen port.
    pub port: u16,
    /// Coinglass API credential; the flow route fails without it.
    pub coinglass_key: Option<String>,
    /// Deployment tag surfaced verbatim by `/api/health`.
    pub env_tag: String,
    /// Directory holding the front-end bundle for the SPA fallback.
    pub public_dir: PathBuf,
    /// Outbound request timeout in milliseconds.
    pub upstream_timeout_ms: u64,
}

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_ENV_TAG: &str = "production";
const DEFAULT_PUBLIC_DIR: &str = "public";

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            coinglass_key: None,
            env_tag: DEFAULT_ENV_TAG.into(),
            public_dir: DEFAULT_PUBLIC_DIR.into(),
            upstream_timeout_ms: FetcherConfig::default().timeout_ms,
        }
    }
}

impl GatewayConfig {
    /// Reads configuration from the environment (and a `.env` file if one
    /// exists). Unset or unparseable values fall back to defaults.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            coinglass_key: std::env::var("COINGLASS_KEY").ok(),
            env_tag: std::env::var("APP_ENV").unwrap_or_else(|_| DEFAULT_ENV_TAG.into()),
            public_dir: std::env::var("PUBLIC_DIR")
                .unwrap_or_else(|_| DEFAULT_PUBLIC_DIR.into())
                .into(),
            upstream_timeout_ms: std::env::var("UPSTREAM_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(|| FetcherConfig::default().timeout_ms),
        }
    }
}

/// Shared per-process state handed to every handler.
pub struct AppState {
    /// Process configuration.
    pub config: GatewayConfig,
    /// Static route table, immutable for the process lifetime.
    pub table: RouteTable,
    /// Cache-aside dispatcher owning the payload cache.
    pub dispatcher: Dispatcher,
}

impl AppState {
    /// Builds state with the real HTTP fetcher.
    pub fn new(config: GatewayConfig) -> Self {
        let fetcher = HttpFetcher::with_config(FetcherConfig {
            timeout_ms: config.upstream_timeout_ms,
        });
        Self::with_fetcher(config, Arc::new(fetcher))
    }

    /// Builds state around an arbitrary fetcher. Used by tests to script
    /// upstream outcomes.
    pub fn with_fetcher(config: GatewayConfig, fetcher: Arc<dyn Fetch>) -> Self {
        Self {
            config,
            table: RouteTable::standard(),
            dispatcher: Dispatcher::new(fetcher),
        }
    }
}
