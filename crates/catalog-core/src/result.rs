//! Convenience result type alias for Catalog.

use crate::error::AppError;

/// A specialized `Result` type for Catalog operations.
pub type AppResult<T> = Result<T, AppError>;
