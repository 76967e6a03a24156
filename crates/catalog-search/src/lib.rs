//! # catalog-search
//!
//! Search backends (Elasticsearch and an in-memory development backend),
//! the [`SearchClient`] that dispatches to the configured one, and the
//! generic repository built on top.

pub mod backends;
pub mod client;
#[cfg(feature = "elasticsearch")]
pub mod connection;
pub mod repositories;

pub use client::SearchClient;
pub use repositories::{BaseRepository, ProductRepository};
