//! Error types for the coinrelay gateway.
//!
//! The taxonomy is deliberately small: a request is either malformed by the
//! caller, impossible because the operator left a credential unset, or failed
//! at the upstream. Every handler converts these locally into the response
//! envelope; nothing propagates to a process-level handler.

use thiserror::Error;

/// Result type alias using `GatewayError`.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for all gateway operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// The caller omitted or malformed a required query parameter.
    ///
    /// Raised before any cache lookup or upstream call is attempted.
    #[error("{0}")]
    BadRequest(String),

    /// A server-side credential required by the route is not configured.
    ///
    /// Independent of caller input; raised before any cache or upstream
    /// interaction.
    #[error("{0}")]
    Configuration(String),

    /// The outbound call failed: transport error, non-2xx status, or a body
    /// that was not valid JSON. Never retried; never stored.
    #[error("{0}")]
    Upstream(String),
}

impl GatewayError {
    /// Error for a missing required query parameter.
    pub fn missing_param(name: &str) -> Self {
        Self::BadRequest(format!("Missing {name} param"))
    }

    /// Error for a credential absent from the process environment.
    pub fn missing_credential(var: &str) -> Self {
        Self::Configuration(format!("Missing {var} in env"))
    }
}
