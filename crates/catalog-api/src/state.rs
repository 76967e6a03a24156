//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use catalog_core::config::AppConfig;
use catalog_search::{ProductRepository, SearchClient};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Search backend client
    pub search: SearchClient,
    /// Product repository
    pub product_repo: Arc<ProductRepository>,
}

impl AppState {
    /// Wire the state around an existing search client.
    pub fn new(config: AppConfig, search: SearchClient) -> Self {
        let product_repo = Arc::new(ProductRepository::for_products(
            search.backend(),
            &config.search,
        ));
        Self {
            config: Arc::new(config),
            search,
            product_repo,
        }
    }
}
