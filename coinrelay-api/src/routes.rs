//! API route configuration.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::services::{ServeDir, ServeFile};

use crate::handlers;
use crate::state::AppState;

/// Creates the gateway router: the health probe, one GET route per entry in
/// the route table, and the static single-page-app fallback for everything
/// else.
pub fn create_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        // Health check, never cached
        .route("/api/health", get(handlers::health));

    // Proxied market-data routes
    for route in state.table.iter() {
        router = router.route(route.path, get(handlers::relay));
    }

    // Anything unmatched is served from the front-end bundle, with
    // index.html as the single-page fallback.
    let spa = ServeDir::new(&state.config.public_dir)
        .fallback(ServeFile::new(state.config.public_dir.join("index.html")));

    router.fallback_service(spa).with_state(state)
}
