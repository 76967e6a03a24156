//! Health check handler.

use axum::Json;
use axum::extract::State;

use catalog_core::traits::search_backend::SearchBackend;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let backend_up = match state.search.ping().await {
        Ok(up) => up,
        Err(e) => {
            tracing::warn!(backend = state.search.name(), error = %e, "Search backend ping failed");
            false
        }
    };

    Json(HealthResponse {
        status: if backend_up { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: if backend_up { "up" } else { "down" }.to_string(),
    })
}
