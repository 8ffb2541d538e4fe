//! HTTP handlers, one submodule per resource

pub mod health;
pub mod orders;
pub mod products;
pub mod reports;
pub mod users;

pub use health::{HealthResponse, health_check};
pub use orders::{create_order, delete_order, list_orders};
pub use products::{create_product, delete_product, list_products, update_product};
pub use reports::{dashboard_summary, sales_charts};
pub use users::list_users;

use super::error::ApiError;

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}
