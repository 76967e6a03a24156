//! Product documents.

pub mod model;

pub use model::{PRODUCTS_INDEX, Product};
