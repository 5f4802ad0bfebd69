//! Common traits for extensibility.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::types::UpstreamRequest;

/// Performs a single outbound GET and returns the body as opaque JSON.
///
/// The dispatcher depends on this seam rather than on a concrete HTTP
/// client, so tests can script fetch outcomes without a network.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Executes the request. One attempt, no retry; any transport failure,
    /// non-2xx status, or non-JSON body is a [`GatewayError::Upstream`].
    ///
    /// [`GatewayError::Upstream`]: crate::error::GatewayError::Upstream
    async fn fetch(&self, request: &UpstreamRequest) -> Result<Value>;
}
