//! Error-to-response mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use coinrelay_core::error::GatewayError;
use coinrelay_core::types::Envelope;

/// Wraps a [`GatewayError`] for conversion into an HTTP response.
///
/// `BadRequest` and `Configuration` map to HTTP 400. `Upstream` maps to
/// HTTP 200 with a failure envelope: the proxy itself worked, and the
/// original wire contract reports upstream failures in-band rather than
/// through the transport status.
#[derive(Debug)]
pub struct ErrorEnvelope(pub GatewayError);

impl IntoResponse for ErrorEnvelope {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            GatewayError::BadRequest(_) | GatewayError::Configuration(_) => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::Upstream(_) => StatusCode::OK,
        };

        (status, Json(Envelope::failure(self.0.to_string()))).into_response()
    }
}

impl From<GatewayError> for ErrorEnvelope {
    fn from(err: GatewayError) -> Self {
        Self(err)
    }
}
