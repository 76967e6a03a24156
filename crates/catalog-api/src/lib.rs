//! # catalog-api
//!
//! HTTP API layer for Catalog built on Axum.
//!
//! Provides the product REST endpoints and health check, middleware
//! (logging, CORS, compression), extractors, DTOs, and the mapping from
//! [`AppError`](catalog_core::AppError) to problem responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state};
pub use error::ApiError;
pub use state::AppState;
