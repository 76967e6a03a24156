//! Product repository.

use std::sync::Arc;

use catalog_core::config::search::SearchConfig;
use catalog_core::traits::search_backend::SearchBackend;
use catalog_entity::Product;

use super::base::BaseRepository;

/// Repository for product documents.
pub type ProductRepository = BaseRepository<Product>;

impl BaseRepository<Product> {
    /// Create a product repository over the configured products index.
    pub fn for_products(backend: Arc<dyn SearchBackend>, config: &SearchConfig) -> Self {
        Self::new(backend, config.products_index.as_str())
            .with_max_result_window(config.max_result_window)
    }
}
