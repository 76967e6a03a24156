//! Search client that dispatches to the configured backend.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use catalog_core::config::search::SearchConfig;
use catalog_core::error::AppError;
use catalog_core::result::AppResult;
use catalog_core::traits::search_backend::{BulkResponse, SearchBackend, SearchHits};
use catalog_core::types::query::{SearchQuery, SearchRequest};

/// Search client wrapping the configured backend.
///
/// The backend is selected at construction time from `search.provider`.
/// Cloning is cheap and shares the backend.
#[derive(Debug, Clone)]
pub struct SearchClient {
    inner: Arc<dyn SearchBackend>,
}

impl SearchClient {
    /// Create a search client from configuration.
    pub fn new(config: &SearchConfig) -> AppResult<Self> {
        let inner: Arc<dyn SearchBackend> = match config.provider.as_str() {
            #[cfg(feature = "elasticsearch")]
            "elasticsearch" => {
                info!("Initializing Elasticsearch search backend");
                Arc::new(crate::backends::ElasticsearchBackend::new(config)?)
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory search backend");
                Arc::new(crate::backends::MemoryBackend::new())
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown search provider: '{other}'. Supported: elasticsearch, memory"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Create a search client from an existing backend (for testing).
    pub fn from_backend(backend: Arc<dyn SearchBackend>) -> Self {
        Self { inner: backend }
    }

    /// Shared handle to the inner backend.
    pub fn backend(&self) -> Arc<dyn SearchBackend> {
        Arc::clone(&self.inner)
    }
}

#[async_trait]
impl SearchBackend for SearchClient {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn index_document(&self, index: &str, id: &str, document: Value) -> AppResult<()> {
        self.inner.index_document(index, id, document).await
    }

    async fn bulk_index(
        &self,
        index: &str,
        documents: Vec<(String, Value)>,
    ) -> AppResult<BulkResponse> {
        self.inner.bulk_index(index, documents).await
    }

    async fn get_document(&self, index: &str, id: &str) -> AppResult<Option<Value>> {
        self.inner.get_document(index, id).await
    }

    async fn search(&self, index: &str, request: &SearchRequest) -> AppResult<SearchHits> {
        self.inner.search(index, request).await
    }

    async fn delete_document(&self, index: &str, id: &str) -> AppResult<()> {
        self.inner.delete_document(index, id).await
    }

    async fn delete_by_query(&self, index: &str, query: &SearchQuery) -> AppResult<u64> {
        self.inner.delete_by_query(index, query).await
    }

    async fn document_exists(&self, index: &str, id: &str) -> AppResult<bool> {
        self.inner.document_exists(index, id).await
    }

    async fn update_document(&self, index: &str, id: &str, partial: Value) -> AppResult<()> {
        self.inner.update_document(index, id, partial).await
    }

    async fn count(&self, index: &str) -> AppResult<u64> {
        self.inner.count(index).await
    }

    async fn ping(&self) -> AppResult<bool> {
        self.inner.ping().await
    }
}
