//! Repository implementations for Catalog documents.

pub mod base;
pub mod product;

pub use base::BaseRepository;
pub use product::ProductRepository;
