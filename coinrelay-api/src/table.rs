//! The static route table.
//!
//! Each inbound path maps to an explicit [`Route`] record: a deterministic
//! cache-key rule, a TTL, and a pure request builder that validates required
//! parameters and credentials before anything touches the cache or the
//! network. The table is built once at startup and never changes.

use std::collections::HashMap;
use std::time::Duration;

use url::Url;

use coinrelay_core::error::{GatewayError, Result};
use coinrelay_core::types::UpstreamRequest;

use crate::state::GatewayConfig;

/// Resolved query parameters of an inbound request.
pub type Params = HashMap<String, String>;

/// One gateway route: inbound path plus the rules to derive a cache key and
/// an upstream request from the caller's parameters.
///
/// Both functions are pure. `cache_key` must map distinct effective parameter
/// sets to distinct keys; `build_request` fails fast with `BadRequest` or
/// `Configuration` before any cache or upstream interaction.
pub struct Route {
    /// Exact inbound path.
    pub path: &'static str,
    /// How long a fetched payload stays fresh. Fixed per route.
    pub ttl: Duration,
    /// Human-readable key shape, for diagnostics and the CLI listing.
    pub key_pattern: &'static str,
    /// Derives the cache key from resolved parameters.
    pub cache_key: fn(&Params) -> String,
    /// Validates parameters/credentials and resolves the upstream request.
    pub build_request: fn(&Params, &GatewayConfig) -> Result<UpstreamRequest>,
}

/// Static mapping from inbound paths to routes. Exact match only; anything
/// unmatched is the static-file collaborator's problem.
pub struct RouteTable {
    routes: Vec<Route>,
}

const COINGECKO_GLOBAL_URL: &str = "https://api.coingecko.com/api/v3/global";
const COINPAPRIKA_GLOBAL_URL: &str = "https://api.coinpaprika.com/v1/global";
const COINGLASS_COIN_FLOW_URL: &str = "https://open-api.coinglass.com/api/pro/v1/coin/flow";
const COINGLASS_COINS_FLOW_URL: &str = "https://open-api.coinglass.com/api/pro/v1/coins/flow";
const FNG_URL: &str = "https://api.alternative.me/fng/";
const ALTSEASON_URL: &str = "https://api.coin-stats.com/v2/ratings/altcoin-season";
const MEXC_DEPTH_URL: &str = "https://api.mexc.com/api/v3/depth";

impl RouteTable {
    /// The fixed set of proxied market-data routes.
    pub fn standard() -> Self {
        Self {
            routes: vec![
                Route {
                    path: "/api/coingecko/global",
                    ttl: Duration::from_secs(10),
                    key_pattern: "coingecko_global",
                    cache_key: key_coingecko_global,
                    build_request: build_coingecko_global,
                },
                Route {
                    path: "/api/coinpaprika/global",
                    ttl: Duration::from_secs(10),
                    key_pattern: "coinpaprika_global",
                    cache_key: key_coinpaprika_global,
                    build_request: build_coinpaprika_global,
                },
                Route {
                    path: "/api/coinglass/flow",
                    ttl: Duration::from_secs(12),
                    key_pattern: "flow_<SYMBOL|all>",
                    cache_key: key_coinglass_flow,
                    build_request: build_coinglass_flow,
                },
                Route {
                    path: "/api/fng",
                    ttl: Duration::from_secs(60),
                    key_pattern: "fng",
                    cache_key: key_fng,
                    build_request: build_fng,
                },
                Route {
                    path: "/api/altseason",
                    ttl: Duration::from_secs(60),
                    key_pattern: "altseason",
                    cache_key: key_altseason,
                    build_request: build_altseason,
                },
                Route {
                    path: "/api/mexc/depth",
                    ttl: Duration::from_secs(5),
                    key_pattern: "depth_<symbol>",
                    cache_key: key_mexc_depth,
                    build_request: build_mexc_depth,
                },
                Route {
                    path: "/api/proxy",
                    ttl: Duration::from_secs(10),
                    key_pattern: "proxy_<url>",
                    cache_key: key_proxy,
                    build_request: build_proxy,
                },
            ],
        }
    }

    /// Looks up a route by exact path.
    pub fn find(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.path == path)
    }

    /// Iterates over all routes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    /// Number of routes in the table.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the table is empty. It never is.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

// An empty parameter value counts as missing, matching how the original
// service treated empty query strings.
fn param<'a>(params: &'a Params, name: &str) -> Option<&'a str> {
    params.get(name).map(String::as_str).filter(|v| !v.is_empty())
}

fn key_coingecko_global(_: &Params) -> String {
    "coingecko_global".into()
}

fn build_coingecko_global(_: &Params, _: &GatewayConfig) -> Result<UpstreamRequest> {
    Ok(UpstreamRequest::new(COINGECKO_GLOBAL_URL))
}

fn key_coinpaprika_global(_: &Params) -> String {
    "coinpaprika_global".into()
}

fn build_coinpaprika_global(_: &Params, _: &GatewayConfig) -> Result<UpstreamRequest> {
    Ok(UpstreamRequest::new(COINPAPRIKA_GLOBAL_URL))
}

// Coinglass is case-insensitive on symbols; uppercase so BTC and btc share
// one entry. A missing symbol means "all coins".
fn key_coinglass_flow(params: &Params) -> String {
    match param(params, "symbol") {
        Some(symbol) => format!("flow_{}", symbol.to_uppercase()),
        None => "flow_all".into(),
    }
}

fn build_coinglass_flow(params: &Params, config: &GatewayConfig) -> Result<UpstreamRequest> {
    let key = config
        .coinglass_key
        .as_deref()
        .ok_or_else(|| GatewayError::missing_credential("COINGLASS_KEY"))?;

    let url = match param(params, "symbol") {
        Some(symbol) => format!("{}?symbol={}", COINGLASS_COIN_FLOW_URL, symbol.to_uppercase()),
        None => COINGLASS_COINS_FLOW_URL.into(),
    };

    Ok(UpstreamRequest::new(url)
        .with_header("Accept", "application/json")
        .with_header("coinglassSecret", key))
}

fn key_fng(_: &Params) -> String {
    "fng".into()
}

fn build_fng(_: &Params, _: &GatewayConfig) -> Result<UpstreamRequest> {
    Ok(UpstreamRequest::new(FNG_URL))
}

fn key_altseason(_: &Params) -> String {
    "altseason".into()
}

fn build_altseason(_: &Params, _: &GatewayConfig) -> Result<UpstreamRequest> {
    Ok(UpstreamRequest::new(ALTSEASON_URL))
}

fn key_mexc_depth(params: &Params) -> String {
    format!("depth_{}", param(params, "symbol").unwrap_or_default())
}

fn build_mexc_depth(params: &Params, _: &GatewayConfig) -> Result<UpstreamRequest> {
    let symbol = param(params, "symbol").ok_or_else(|| GatewayError::missing_param("symbol"))?;
    Ok(UpstreamRequest::new(format!(
        "{MEXC_DEPTH_URL}?symbol={symbol}&limit=5000"
    )))
}

fn key_proxy(params: &Params) -> String {
    format!("proxy_{}", param(params, "url").unwrap_or_default())
}

fn build_proxy(params: &Params, _: &GatewayConfig) -> Result<UpstreamRequest> {
    let raw = param(params, "url").ok_or_else(|| GatewayError::missing_param("url"))?;
    let url = Url::parse(raw).map_err(|e| GatewayError::BadRequest(format!("Invalid url param: {e}")))?;
    Ok(UpstreamRequest::new(url))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn config_with_key() -> GatewayConfig {
        GatewayConfig {
            coinglass_key: Some("sekrit".into()),
            ..GatewayConfig::default()
        }
    }

    #[test]
    fn test_find_exact_match() {
        let table = RouteTable::standard();
        assert!(table.find("/api/fng").is_some());
        assert!(table.find("/api/fng/").is_none());
        assert!(table.find("/api/unknown").is_none());
    }

    #[test]
    fn test_table_has_all_routes() {
        let table = RouteTable::standard();
        assert_eq!(table.len(), 7);
    }

    #[test]
    fn test_fixed_keys_ignore_params() {
        let table = RouteTable::standard();
        let route = table.find("/api/fng").unwrap();
        assert_eq!((route.cache_key)(&params(&[])), "fng");
        assert_eq!((route.cache_key)(&params(&[("x", "y")])), "fng");
    }

    #[test]
    fn test_flow_key_defaults_and_uppercases() {
        let table = RouteTable::standard();
        let route = table.find("/api/coinglass/flow").unwrap();
        assert_eq!((route.cache_key)(&params(&[])), "flow_all");
        assert_eq!((route.cache_key)(&params(&[("symbol", "")])), "flow_all");
        assert_eq!((route.cache_key)(&params(&[("symbol", "btc")])), "flow_BTC");
        assert_eq!((route.cache_key)(&params(&[("symbol", "BTC")])), "flow_BTC");
    }

    #[test]
    fn test_key_isolation_across_symbols() {
        let table = RouteTable::standard();
        let route = table.find("/api/mexc/depth").unwrap();
        let k1 = (route.cache_key)(&params(&[("symbol", "BTCUSDT")]));
        let k2 = (route.cache_key)(&params(&[("symbol", "ETHUSDT")]));
        assert_ne!(k1, k2);
    }

    #[test]
    fn test_mexc_missing_symbol_fails_fast() {
        let table = RouteTable::standard();
        let route = table.find("/api/mexc/depth").unwrap();
        let err = (route.build_request)(&params(&[]), &GatewayConfig::default()).unwrap_err();
        assert_eq!(err, GatewayError::BadRequest("Missing symbol param".into()));
    }

    #[test]
    fn test_mexc_empty_symbol_counts_as_missing() {
        let table = RouteTable::standard();
        let route = table.find("/api/mexc/depth").unwrap();
        let err = (route.build_request)(&params(&[("symbol", "")]), &GatewayConfig::default())
            .unwrap_err();
        assert!(matches!(err, GatewayError::BadRequest(_)));
    }

    #[test]
    fn test_mexc_url_carries_symbol_and_limit() {
        let table = RouteTable::standard();
        let route = table.find("/api/mexc/depth").unwrap();
        let req = (route.build_request)(&params(&[("symbol", "BTCUSDT")]), &GatewayConfig::default())
            .unwrap();
        assert_eq!(
            req.url,
            "https://api.mexc.com/api/v3/depth?symbol=BTCUSDT&limit=5000"
        );
        assert!(req.headers.is_empty());
    }

    #[test]
    fn test_coinglass_missing_credential() {
        let table = RouteTable::standard();
        let route = table.find("/api/coinglass/flow").unwrap();
        let err = (route.build_request)(&params(&[("symbol", "BTC")]), &GatewayConfig::default())
            .unwrap_err();
        assert_eq!(
            err,
            GatewayError::Configuration("Missing COINGLASS_KEY in env".into())
        );
    }

    #[test]
    fn test_coinglass_per_symbol_and_all_urls() {
        let table = RouteTable::standard();
        let route = table.find("/api/coinglass/flow").unwrap();

        let req = (route.build_request)(&params(&[("symbol", "btc")]), &config_with_key()).unwrap();
        assert_eq!(
            req.url,
            "https://open-api.coinglass.com/api/pro/v1/coin/flow?symbol=BTC"
        );
        assert!(req
            .headers
            .contains(&("coinglassSecret", "sekrit".to_string())));

        let req = (route.build_request)(&params(&[]), &config_with_key()).unwrap();
        assert_eq!(req.url, "https://open-api.coinglass.com/api/pro/v1/coins/flow");
    }

    #[test]
    fn test_proxy_missing_url_fails_fast() {
        let table = RouteTable::standard();
        let route = table.find("/api/proxy").unwrap();
        let err = (route.build_request)(&params(&[]), &GatewayConfig::default()).unwrap_err();
        assert_eq!(err, GatewayError::BadRequest("Missing url param".into()));
    }

    #[test]
    fn test_proxy_rejects_relative_url() {
        let table = RouteTable::standard();
        let route = table.find("/api/proxy").unwrap();
        let err = (route.build_request)(&params(&[("url", "/relative/path")]), &GatewayConfig::default())
            .unwrap_err();
        assert!(matches!(err, GatewayError::BadRequest(_)));
    }

    #[test]
    fn test_proxy_key_includes_url() {
        let table = RouteTable::standard();
        let route = table.find("/api/proxy").unwrap();
        let k1 = (route.cache_key)(&params(&[("url", "https://a.example/x")]));
        let k2 = (route.cache_key)(&params(&[("url", "https://b.example/x")]));
        assert_eq!(k1, "proxy_https://a.example/x");
        assert_ne!(k1, k2);
    }

    #[test]
    fn test_ttls_match_contract() {
        let table = RouteTable::standard();
        let ttl = |path: &str| table.find(path).unwrap().ttl;
        assert_eq!(ttl("/api/coingecko/global"), Duration::from_secs(10));
        assert_eq!(ttl("/api/coinpaprika/global"), Duration::from_secs(10));
        assert_eq!(ttl("/api/coinglass/flow"), Duration::from_secs(12));
        assert_eq!(ttl("/api/fng"), Duration::from_secs(60));
        assert_eq!(ttl("/api/altseason"), Duration::from_secs(60));
        assert_eq!(ttl("/api/mexc/depth"), Duration::from_secs(5));
        assert_eq!(ttl("/api/proxy"), Duration::from_secs(10));
    }
}
