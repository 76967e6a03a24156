//! # catalog-entity
//!
//! Document models for Catalog. Every struct in this crate is the `_source`
//! of a search-index document and implements
//! [`Document`](catalog_core::traits::Document).

pub mod product;

pub use product::Product;
