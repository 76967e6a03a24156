//! Core type definitions used across the Catalog workspace.

pub mod pagination;
pub mod query;
pub mod sorting;

pub use pagination::{PagedList, PaginationParameters, QueryParameters};
pub use query::{QueryValue, SearchQuery, SearchRequest};
pub use sorting::{SortDirection, SortField};
