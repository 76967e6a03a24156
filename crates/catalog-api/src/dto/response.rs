//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` when the search backend answers, `"degraded"` otherwise.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Search backend state: `"up"` or `"down"`.
    pub backend: String,
}
