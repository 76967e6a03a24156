//! Search backend trait: the document-search engine as the repository sees it.
//!
//! Documents cross this boundary as raw JSON. An `Err` from any method means
//! the call failed or the backend's response was not valid for the request.

use async_trait::async_trait;
use serde_json::Value;

use crate::result::AppResult;
use crate::types::query::{SearchQuery, SearchRequest};

/// The documents returned by a search, with the total number of matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchHits {
    /// Total number of matching documents (not only those returned).
    pub total: u64,
    /// The `_source` of each returned hit, in order.
    pub documents: Vec<Value>,
}

/// One rejected item of a bulk request.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkItemFailure {
    /// ID of the rejected document.
    pub id: String,
    /// Status code reported for the item.
    pub status: u16,
    /// Reason reported by the backend.
    pub reason: String,
}

/// Outcome of a bulk request that reached the backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkResponse {
    /// Time the backend spent on the request.
    pub took_ms: u64,
    /// Items the backend rejected.
    pub failed: Vec<BulkItemFailure>,
}

impl BulkResponse {
    /// Whether every item was accepted.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Abstract interface over a document-search engine.
///
/// Implementations must be safe to share across concurrent requests.
#[async_trait]
pub trait SearchBackend: Send + Sync + std::fmt::Debug {
    /// Human-readable backend name for logs.
    fn name(&self) -> &'static str;

    /// Index (create or replace) one document.
    async fn index_document(&self, index: &str, id: &str, document: Value) -> AppResult<()>;

    /// Index many `(id, document)` pairs in one request.
    async fn bulk_index(&self, index: &str, documents: Vec<(String, Value)>)
    -> AppResult<BulkResponse>;

    /// Fetch a document's `_source` by ID; `Ok(None)` when it does not exist.
    async fn get_document(&self, index: &str, id: &str) -> AppResult<Option<Value>>;

    /// Run a search.
    async fn search(&self, index: &str, request: &SearchRequest) -> AppResult<SearchHits>;

    /// Delete one document. A missing document is a `NotFound` error.
    async fn delete_document(&self, index: &str, id: &str) -> AppResult<()>;

    /// Delete every document matching `query`; returns the number deleted.
    async fn delete_by_query(&self, index: &str, query: &SearchQuery) -> AppResult<u64>;

    /// Whether a document exists, without fetching it.
    async fn document_exists(&self, index: &str, id: &str) -> AppResult<bool>;

    /// Merge `partial` into an existing document. A missing document is a
    /// `NotFound` error; nothing is created.
    async fn update_document(&self, index: &str, id: &str, partial: Value) -> AppResult<()>;

    /// Number of documents in the index.
    async fn count(&self, index: &str) -> AppResult<u64>;

    /// Whether the backend is reachable and healthy.
    async fn ping(&self) -> AppResult<bool>;
}
