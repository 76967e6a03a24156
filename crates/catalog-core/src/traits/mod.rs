//! Core traits defined in `catalog-core` and implemented by other crates.

pub mod repository;
pub mod search_backend;

pub use repository::{Document, Repository};
pub use search_backend::{BulkItemFailure, BulkResponse, SearchBackend, SearchHits};
