//! Generic repository over one search index.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};
use validator::Validate;

use catalog_core::error::AppError;
use catalog_core::result::AppResult;
use catalog_core::traits::repository::{Document, Repository};
use catalog_core::traits::search_backend::SearchBackend;
use catalog_core::types::pagination::{PagedList, PaginationParameters};
use catalog_core::types::query::{SearchQuery, SearchRequest};
use catalog_core::types::sorting::{SortField, parse_sort_spec};

/// Default number of documents requested by unpaged queries.
pub const DEFAULT_MAX_RESULT_WINDOW: u64 = 10_000;

/// Repository storing documents of type `T` in one index.
///
/// Holds a shared backend handle and the index name, both fixed at
/// construction.
pub struct BaseRepository<T> {
    backend: Arc<dyn SearchBackend>,
    index: String,
    max_result_window: u64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> std::fmt::Debug for BaseRepository<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaseRepository")
            .field("backend", &self.backend.name())
            .field("index", &self.index)
            .field("max_result_window", &self.max_result_window)
            .finish()
    }
}

impl<T> Clone for BaseRepository<T> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            index: self.index.clone(),
            max_result_window: self.max_result_window,
            _marker: PhantomData,
        }
    }
}

impl<T: Document> BaseRepository<T> {
    /// Create a repository over `index`.
    pub fn new(backend: Arc<dyn SearchBackend>, index: impl Into<String>) -> Self {
        Self {
            backend,
            index: index.into(),
            max_result_window: DEFAULT_MAX_RESULT_WINDOW,
            _marker: PhantomData,
        }
    }

    /// Set the number of documents unpaged queries ask for.
    pub fn with_max_result_window(mut self, max_result_window: u64) -> Self {
        self.max_result_window = max_result_window;
        self
    }

    /// The index this repository reads and writes.
    pub fn index(&self) -> &str {
        &self.index
    }

    async fn search_all(&self, query: SearchQuery) -> AppResult<Vec<T>> {
        let request = SearchRequest::new(query).with_size(self.max_result_window);
        let hits = self.backend.search(&self.index, &request).await?;
        decode_all(hits.documents)
    }

    async fn search_page(
        &self,
        query: SearchQuery,
        sort: Vec<SortField>,
        page_number: u64,
        page_size: u64,
    ) -> AppResult<PagedList<T>> {
        let params = PaginationParameters::new(page_number, page_size);
        params.validate()?;
        let offset = params.offset().ok_or_else(|| {
            AppError::validation(format!(
                "pageNumber {page_number} with pageSize {page_size} is out of range"
            ))
        })?;

        let request = SearchRequest::new(query)
            .with_sort(sort)
            .with_page(offset, params.page_size);
        debug!(
            index = %self.index,
            from = request.from,
            size = params.page_size,
            "Searching page"
        );

        let hits = self.backend.search(&self.index, &request).await?;
        let items = decode_all(hits.documents)?;
        Ok(PagedList::new(
            items,
            hits.total,
            params.page_number,
            params.page_size,
        ))
    }
}

fn decode_all<T: Document>(documents: Vec<Value>) -> AppResult<Vec<T>> {
    documents
        .into_iter()
        .map(|doc| serde_json::from_value(doc).map_err(Into::into))
        .collect()
}

/// Drop `null` members of an object, recursively.
fn prune_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, prune_nulls(v)))
                .collect(),
        ),
        other => other,
    }
}

#[async_trait]
impl<T: Document> Repository<T> for BaseRepository<T> {
    async fn add_bulk(&self, documents: &[T]) -> bool {
        if documents.is_empty() {
            return true;
        }

        let mut batch = Vec::with_capacity(documents.len());
        for document in documents {
            match serde_json::to_value(document) {
                Ok(value) => batch.push((document.id().to_string(), value)),
                Err(e) => {
                    warn!(index = %self.index, id = document.id(), error = %e, "Failed to serialize document");
                    return false;
                }
            }
        }

        match self.backend.bulk_index(&self.index, batch).await {
            Ok(response) if response.is_success() => true,
            Ok(response) => {
                warn!(
                    index = %self.index,
                    failed = response.failed.len(),
                    total = documents.len(),
                    "Bulk request rejected documents"
                );
                false
            }
            Err(e) => {
                warn!(index = %self.index, error = %e, "Bulk request failed");
                false
            }
        }
    }

    async fn add(&self, document: &T) -> bool {
        let value = match serde_json::to_value(document) {
            Ok(value) => value,
            Err(e) => {
                warn!(index = %self.index, id = document.id(), error = %e, "Failed to serialize document");
                return false;
            }
        };

        match self
            .backend
            .index_document(&self.index, document.id(), value)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                warn!(index = %self.index, id = document.id(), error = %e, "Failed to index document");
                false
            }
        }
    }

    async fn get(&self, id: &str) -> AppResult<Option<T>> {
        self.backend
            .get_document(&self.index, id)
            .await?
            .map(|doc| serde_json::from_value(doc).map_err(Into::into))
            .transpose()
    }

    async fn all(&self) -> AppResult<Vec<T>> {
        self.search_all(SearchQuery::MatchAll).await
    }

    async fn query(&self, predicate: &SearchQuery) -> AppResult<Vec<T>> {
        self.search_all(predicate.clone()).await
    }

    async fn remove(&self, id: &str) -> bool {
        match self.backend.delete_document(&self.index, id).await {
            Ok(()) => true,
            Err(e) => {
                warn!(index = %self.index, id, error = %e, "Failed to delete document");
                false
            }
        }
    }

    async fn remove_all(&self) -> bool {
        match self
            .backend
            .delete_by_query(&self.index, &SearchQuery::MatchAll)
            .await
        {
            Ok(deleted) => {
                debug!(index = %self.index, deleted, "Deleted all documents");
                true
            }
            Err(e) => {
                warn!(index = %self.index, error = %e, "Failed to delete all documents");
                false
            }
        }
    }

    async fn exists(&self, id: &str) -> bool {
        match self.backend.document_exists(&self.index, id).await {
            Ok(exists) => exists,
            Err(e) => {
                warn!(index = %self.index, id, error = %e, "Failed to check document");
                false
            }
        }
    }

    async fn update(&self, id: &str, document: &T) -> bool {
        let partial = match serde_json::to_value(document) {
            Ok(value) => prune_nulls(value),
            Err(e) => {
                warn!(index = %self.index, id, error = %e, "Failed to serialize document");
                return false;
            }
        };

        match self.backend.update_document(&self.index, id, partial).await {
            Ok(()) => true,
            Err(e) => {
                warn!(index = %self.index, id, error = %e, "Failed to update document");
                false
            }
        }
    }

    async fn total_count(&self) -> AppResult<u64> {
        self.backend.count(&self.index).await
    }

    async fn all_paged_list(
        &self,
        page_number: u64,
        page_size: u64,
        sort_by: Option<&str>,
        search_text: Option<&str>,
    ) -> AppResult<PagedList<T>> {
        let sort = sort_by
            .map(parse_sort_spec)
            .unwrap_or_default()
            .iter()
            .map(SortField::resolved)
            .collect();

        self.search_page(
            SearchQuery::for_search_text(search_text),
            sort,
            page_number,
            page_size,
        )
        .await
    }

    async fn query_paged_list(
        &self,
        predicate: &SearchQuery,
        page_number: u64,
        page_size: u64,
        _sort_by: Option<&str>,
        _search_text: Option<&str>,
    ) -> AppResult<PagedList<T>> {
        self.search_page(predicate.clone(), Vec::new(), page_number, page_size)
            .await
    }
}
