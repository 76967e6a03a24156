//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use catalog_entity::Product;

/// Create product request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    /// Product ID; generated when absent or empty.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name.
    #[validate(
        required(message = "name is required"),
        length(min = 1, message = "name must not be empty")
    )]
    pub name: Option<String>,
    /// Unit price.
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: Option<f64>,
    /// Creation timestamp; defaults to now.
    pub created_at: Option<DateTime<Utc>>,
}

impl CreateProductRequest {
    /// Build the product to index, filling in the ID and timestamp.
    pub fn into_product(self) -> Product {
        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Product {
            id,
            name: self.name,
            price: self.price,
            created_at: Some(self.created_at.unwrap_or_else(Utc::now)),
        }
    }
}

/// Update product request body. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    /// New name.
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    /// New price.
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: Option<f64>,
    /// New creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
}

impl UpdateProductRequest {
    /// The partial product carrying only the fields to change.
    pub fn into_partial(self) -> Product {
        Product {
            id: String::new(),
            name: self.name,
            price: self.price,
            created_at: self.created_at,
        }
    }
}
