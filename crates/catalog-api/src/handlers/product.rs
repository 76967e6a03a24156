//! Product handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::IntoResponse;

use catalog_core::error::AppError;
use catalog_core::traits::repository::Repository;
use catalog_core::types::pagination::PagedList;
use catalog_entity::Product;

use crate::dto::request::{CreateProductRequest, UpdateProductRequest};
use crate::error::ApiError;
use crate::extractors::{ListQuery, ValidatedJson};
use crate::state::AppState;

/// GET /products
pub async fn list_products(
    State(state): State<AppState>,
    ListQuery(params): ListQuery,
) -> Result<Json<PagedList<Product>>, ApiError> {
    let page = state
        .product_repo
        .all_paged_list(
            params.page_number,
            params.page_size,
            params.sort_by.as_deref(),
            params.search_string.as_deref(),
        )
        .await?;

    Ok(Json(page))
}

/// GET /products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let product = state
        .product_repo
        .get(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {id} not found")))?;

    Ok(Json(product))
}

/// POST /products
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let product = req.into_product();
    let location = HeaderValue::from_str(&format!("/products/{}", product.id))
        .map_err(|_| AppError::validation("id contains characters not allowed in a URI"))?;

    if !state.product_repo.add(&product).await {
        return Err(AppError::internal("Unable to add product.").into());
    }

    tracing::info!(id = %product.id, "Product created");
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(product),
    ))
}

/// PUT /products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateProductRequest>,
) -> Result<StatusCode, ApiError> {
    if !state.product_repo.update(&id, &req.into_partial()).await {
        return Err(AppError::internal("Unable to update product.").into());
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if !state.product_repo.remove(&id).await {
        return Err(AppError::internal("Unable to delete product.").into());
    }
    tracing::info!(id = %id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}
