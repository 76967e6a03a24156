//! Paged list query-string extractor.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use validator::Validate;

use catalog_core::error::AppError;
use catalog_core::types::pagination::QueryParameters;

use crate::error::ApiError;

/// Validated `pageNumber`, `pageSize`, `searchString` and `sortBy` query
/// parameters. Missing parameters take their defaults.
#[derive(Debug, Clone)]
pub struct ListQuery(pub QueryParameters);

impl<S> FromRequestParts<S> for ListQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<QueryParameters>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        params.validate().map_err(AppError::from)?;
        Ok(Self(params))
    }
}
