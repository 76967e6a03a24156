//! Application builder: wires configuration, search client and router.

use axum::Router;
use tracing::info;

use catalog_core::config::AppConfig;
use catalog_core::result::AppResult;
use catalog_search::SearchClient;

use crate::router::build_router;
use crate::state::AppState;

/// Connect the configured search backend and build the shared state.
pub fn build_state(config: AppConfig) -> AppResult<AppState> {
    info!(
        provider = %config.search.provider,
        index = %config.search.products_index,
        "Initializing search client"
    );
    let search = SearchClient::new(&config.search)?;
    Ok(AppState::new(config, search))
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}
