//! Generic repository trait for search-index access.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::result::AppResult;
use crate::types::pagination::PagedList;
use crate::types::query::SearchQuery;

/// A record stored in a search index under a string ID.
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The document ID.
    fn id(&self) -> &str;
}

/// Generic repository over one index of documents of type `T`.
///
/// Write operations report a single success flag: a failed or rejected
/// backend call is `false`, never an error. Read operations distinguish a
/// missing document (`Ok(None)`) from a failed call (`Err`).
#[async_trait]
pub trait Repository<T: Document>: Send + Sync + 'static {
    /// Index all documents in one bulk request. `false` if any item is
    /// rejected; individual failures are not reported.
    async fn add_bulk(&self, documents: &[T]) -> bool;

    /// Index one document under its ID.
    async fn add(&self, document: &T) -> bool;

    /// Fetch a document by ID.
    async fn get(&self, id: &str) -> AppResult<Option<T>>;

    /// Every document in the index, unpaged.
    async fn all(&self) -> AppResult<Vec<T>>;

    /// Every document matching `predicate`, unpaged.
    async fn query(&self, predicate: &SearchQuery) -> AppResult<Vec<T>>;

    /// Delete a document by ID.
    async fn remove(&self, id: &str) -> bool;

    /// Delete every document in the index.
    async fn remove_all(&self) -> bool;

    /// Whether a document with this ID exists.
    async fn exists(&self, id: &str) -> bool;

    /// Merge the non-null fields of `document` into the stored document.
    /// Does not create a missing document.
    async fn update(&self, id: &str, document: &T) -> bool;

    /// Number of documents in the index.
    async fn total_count(&self) -> AppResult<u64>;

    /// One page of documents matching `search_text` (all documents when
    /// absent), sorted by the `sort_by` specification.
    async fn all_paged_list(
        &self,
        page_number: u64,
        page_size: u64,
        sort_by: Option<&str>,
        search_text: Option<&str>,
    ) -> AppResult<PagedList<T>>;

    /// One page of documents matching `predicate`.
    ///
    /// `sort_by` and `search_text` are accepted for signature parity with
    /// [`Repository::all_paged_list`] and are not applied.
    async fn query_paged_list(
        &self,
        predicate: &SearchQuery,
        page_number: u64,
        page_size: u64,
        sort_by: Option<&str>,
        search_text: Option<&str>,
    ) -> AppResult<PagedList<T>>;
}
