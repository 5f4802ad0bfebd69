//! DTOs for responses that do not use the standard envelope.

use serde::{Deserialize, Serialize};

/// Response for `/api/health`. Always succeeds; never cached.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always true.
    pub success: bool,
    /// Always true while the process is serving.
    pub up: bool,
    /// The configured deployment tag, verbatim.
    pub env: String,
}
