//! # catalog-core
//!
//! Core crate for Catalog. Contains the configuration schema, the
//! pagination, sorting and query-DSL types, the repository and search
//! backend traits, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Catalog crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
