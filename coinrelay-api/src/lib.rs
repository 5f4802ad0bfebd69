//! # Coinrelay Gateway Server
//!
//! Caching reverse proxy that aggregates public crypto market-data APIs
//! behind one uniform HTTP surface, shielding the front-end from upstream
//! rate limits and latency variance.
//!
//! ## Endpoints
//!
//! - `GET /api/coingecko/global` - CoinGecko global market stats
//! - `GET /api/coinpaprika/global` - CoinPaprika global market stats
//! - `GET /api/coinglass/flow` - Coinglass coin flow (requires `COINGLASS_KEY`)
//! - `GET /api/fng` - Fear & Greed index
//! - `GET /api/altseason` - Altcoin season rating
//! - `GET /api/mexc/depth?symbol=..` - MEXC order book
//! - `GET /api/proxy?url=..` - Generic passthrough for public endpoints
//! - `GET /api/health` - Liveness probe, never cached
//! - `GET *` - Static single-page-app fallback
//!
//! ## Example
//!
//! ```rust,ignore
//! use coinrelay_api::{GatewayServer, GatewayConfig};
//!
//! let config = GatewayConfig::from_env();
//! let server = GatewayServer::new(config);
//! server.run(([0, 0, 0, 0], 3000)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod dispatch;
mod dto;
mod error;
mod handlers;
mod routes;
mod state;
mod table;

pub use dispatch::Dispatcher;
pub use error::ErrorEnvelope;
pub use routes::create_router;
pub use state::{AppState, GatewayConfig};
pub use table::{Params, Route, RouteTable};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// HTTP server for the coinrelay gateway.
pub struct GatewayServer {
    state: Arc<AppState>,
}

impl GatewayServer {
    /// Creates a new gateway server with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            state: Arc::new(AppState::new(config)),
        }
    }

    /// Creates the router with all routes and middleware configured.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!("Coinrelay gateway listening on {}", addr);

        axum::serve(listener, self.router()).await
    }
}

/// Starts the gateway with configuration read from the environment.
pub async fn start_server(port: u16) -> std::io::Result<()> {
    let config = GatewayConfig::from_env();
    let server = GatewayServer::new(config);
    server.run(([0, 0, 0, 0], port)).await
}
