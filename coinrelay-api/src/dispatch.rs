//! The cache-aside dispatcher.
//!
//! One instance per process, constructed at startup and owned by the app
//! state. Tests build their own instance for isolation.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use coinrelay_cache::PayloadCache;
use coinrelay_core::error::Result;
use coinrelay_core::traits::Fetch;

use crate::state::GatewayConfig;
use crate::table::{Params, Route};

/// Resolves each request to a cache key and an upstream fetch, serving from
/// the payload cache when fresh.
pub struct Dispatcher {
    cache: PayloadCache,
    fetcher: Arc<dyn Fetch>,
}

impl Dispatcher {
    /// Creates a dispatcher with an empty cache around the given fetcher.
    pub fn new(fetcher: Arc<dyn Fetch>) -> Self {
        Self {
            cache: PayloadCache::new(),
            fetcher,
        }
    }

    /// Read access to the underlying cache, for diagnostics and tests.
    pub fn cache(&self) -> &PayloadCache {
        &self.cache
    }

    /// Runs one request through the cache-aside cycle:
    /// validate → derive key → cache lookup → (miss: fetch, store) → value.
    ///
    /// Validation failures (`BadRequest`, `Configuration`) return before any
    /// cache interaction. A failed fetch propagates as-is and never
    /// populates the cache. Concurrent misses on one key each fetch
    /// independently and the last store wins; there is no per-key
    /// coalescing, so a cache stampede against the upstream is possible.
    pub async fn dispatch(
        &self,
        route: &Route,
        params: &Params,
        config: &GatewayConfig,
    ) -> Result<Value> {
        let request = (route.build_request)(params, config)?;
        let key = (route.cache_key)(params);

        if let Some(value) = self.cache.get(&key) {
            debug!(%key, "Cache hit");
            return Ok(value);
        }

        debug!(%key, url = %request.url, "Cache miss, fetching upstream");
        let value = self.fetcher.fetch(&request).await?;
        self.cache.set(&key, value.clone(), route.ttl);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::json;

    use coinrelay_core::error::GatewayError;
    use coinrelay_core::types::UpstreamRequest;

    /// Fetcher returning a fixed outcome and counting invocations.
    struct ScriptedFetch {
        outcome: Result<Value>,
        calls: AtomicUsize,
    }

    impl ScriptedFetch {
        fn ok(value: Value) -> Arc<Self> {
            Arc::new(Self {
                outcome: Ok(value),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(msg: &str) -> Arc<Self> {
            Arc::new(Self {
                outcome: Err(GatewayError::Upstream(msg.into())),
                calls: AtomicUsize::new(0),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Fetch for ScriptedFetch {
        async fn fetch(&self, _request: &UpstreamRequest) -> Result<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    fn fixed_key(_: &Params) -> String {
        "test_key".into()
    }

    fn always_ok(_: &Params, _: &GatewayConfig) -> Result<UpstreamRequest> {
        Ok(UpstreamRequest::new("https://upstream.test/data"))
    }

    fn always_bad(_: &Params, _: &GatewayConfig) -> Result<UpstreamRequest> {
        Err(GatewayError::missing_param("symbol"))
    }

    fn route(ttl: Duration, build: fn(&Params, &GatewayConfig) -> Result<UpstreamRequest>) -> Route {
        Route {
            path: "/api/test",
            ttl,
            key_pattern: "test_key",
            cache_key: fixed_key,
            build_request: build,
        }
    }

    #[tokio::test]
    async fn test_miss_then_hit_fetches_once() {
        let fetch = ScriptedFetch::ok(json!({"status": "ok"}));
        let dispatcher = Dispatcher::new(fetch.clone());
        let route = route(Duration::from_secs(60), always_ok);
        let (params, config) = (Params::new(), GatewayConfig::default());

        let first = dispatcher.dispatch(&route, &params, &config).await.unwrap();
        let second = dispatcher.dispatch(&route, &params, &config).await.unwrap();

        assert_eq!(first, json!({"status": "ok"}));
        assert_eq!(second, first);
        assert_eq!(fetch.call_count(), 1);
    }

    #[tokio::test]
    async fn test_expired_entry_refetches() {
        let fetch = ScriptedFetch::ok(json!(1));
        let dispatcher = Dispatcher::new(fetch.clone());
        let route = route(Duration::from_millis(1), always_ok);
        let (params, config) = (Params::new(), GatewayConfig::default());

        dispatcher.dispatch(&route, &params, &config).await.unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        dispatcher.dispatch(&route, &params, &config).await.unwrap();

        assert_eq!(fetch.call_count(), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_stores_nothing() {
        let fetch = ScriptedFetch::failing("upstream returned HTTP 503");
        let dispatcher = Dispatcher::new(fetch.clone());
        let route = route(Duration::from_secs(60), always_ok);
        let (params, config) = (Params::new(), GatewayConfig::default());

        let err = dispatcher.dispatch(&route, &params, &config).await.unwrap_err();
        assert!(matches!(err, GatewayError::Upstream(_)));
        assert!(dispatcher.cache().is_empty());

        // The key stays cold, so the next request tries the upstream again.
        let _ = dispatcher.dispatch(&route, &params, &config).await;
        assert_eq!(fetch.call_count(), 2);
    }

    #[tokio::test]
    async fn test_validation_failure_skips_cache_and_fetch() {
        let fetch = ScriptedFetch::ok(json!(1));
        let dispatcher = Dispatcher::new(fetch.clone());
        let route = route(Duration::from_secs(60), always_bad);
        let (params, config) = (Params::new(), GatewayConfig::default());

        let err = dispatcher.dispatch(&route, &params, &config).await.unwrap_err();
        assert_eq!(err, GatewayError::BadRequest("Missing symbol param".into()));
        assert_eq!(fetch.call_count(), 0);
        assert!(dispatcher.cache().is_empty());
    }
}
