//! Product types and input rules

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::error::CatalogError;

/// Highest stock a product may be created with
pub const MAX_INITIAL_STOCK: i64 = 100;

/// Product row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Product {
    pub id: i64,
    #[schema(example = "Mechanical Keyboard")]
    pub name: String,
    #[schema(example = 49.9)]
    pub price: f64,
    #[schema(example = 25)]
    pub stock: i64,
    #[schema(example = "Electronics")]
    pub category: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

/// Body of product create and update requests
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductInput {
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    #[schema(example = "Mechanical Keyboard")]
    pub name: String,
    #[validate(range(min = 0.0, message = "price must be non-negative"))]
    #[schema(example = 49.9)]
    pub price: f64,
    #[schema(example = 25)]
    pub stock: i64,
    #[serde(default)]
    #[validate(length(min = 1, message = "category is required"))]
    #[schema(example = "Electronics")]
    pub category: String,
}

impl ProductInput {
    /// Rules for a new product: stock must start within `0..=MAX_INITIAL_STOCK`.
    pub fn check_for_create(&self) -> Result<(), CatalogError> {
        self.check_common()?;
        if !(0..=MAX_INITIAL_STOCK).contains(&self.stock) {
            return Err(CatalogError::Validation(format!(
                "stock must be between 0 and {}",
                MAX_INITIAL_STOCK
            )));
        }
        Ok(())
    }

    /// Rules for replacing an existing product: stock only has to be non-negative.
    pub fn check_for_update(&self) -> Result<(), CatalogError> {
        self.check_common()?;
        if self.stock < 0 {
            return Err(CatalogError::Validation(
                "stock must be non-negative".to_string(),
            ));
        }
        Ok(())
    }

    fn check_common(&self) -> Result<(), CatalogError> {
        self.validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;
        if self.name.trim().is_empty() || self.category.trim().is_empty() {
            return Err(CatalogError::Validation(
                "name and category must not be blank".to_string(),
            ));
        }
        if !self.price.is_finite() {
            return Err(CatalogError::Validation("price must be a number".to_string()));
        }
        Ok(())
    }
}
