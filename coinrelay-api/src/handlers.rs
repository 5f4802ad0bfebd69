//! API route handlers.

use std::sync::Arc;

use axum::{
    extract::{MatchedPath, Query, State},
    response::{IntoResponse, Response},
    Json,
};

use coinrelay_core::error::GatewayError;
use coinrelay_core::types::Envelope;

use crate::dto::HealthResponse;
use crate::error::ErrorEnvelope;
use crate::state::AppState;
use crate::table::Params;

/// GET handler shared by every proxied route.
///
/// Looks the matched path up in the route table and runs it through the
/// dispatcher; the outcome is always a JSON envelope.
pub async fn relay(
    State(state): State<Arc<AppState>>,
    path: MatchedPath,
    Query(params): Query<Params>,
) -> Response {
    // Only table paths are registered with this handler, so the lookup can
    // fail only if the router and the table disagree.
    let Some(route) = state.table.find(path.as_str()) else {
        return ErrorEnvelope(GatewayError::BadRequest(format!(
            "Unknown route: {}",
            path.as_str()
        )))
        .into_response();
    };

    match state.dispatcher.dispatch(route, &params, &state.config).await {
        Ok(data) => Json(Envelope::success(data)).into_response(),
        Err(err) => ErrorEnvelope(err).into_response(),
    }
}

/// GET /api/health
///
/// Liveness probe. Bypasses the dispatcher entirely; no cache interaction.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        up: true,
        env: state.config.env_tag.clone(),
    })
}
