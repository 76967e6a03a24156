//! Custom Axum extractors.

pub mod json;
pub mod pagination;

pub use json::ValidatedJson;
pub use pagination::ListQuery;
