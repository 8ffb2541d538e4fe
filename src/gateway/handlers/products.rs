//! Product handlers

use std::sync::Arc;

use axum::{Extension, Json, extract::State, http::StatusCode};

use super::super::error::{ApiError, ApiJson, ApiPath};
use super::super::state::AppState;
use super::super::types::ApiResponse;
use crate::catalog::{Product, ProductInput, ProductRepository};
use crate::user_auth::Claims;

/// List all products
///
/// GET /products
#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "All products", body = ApiResponse<Vec<Product>>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Product>>>, ApiError> {
    let products = ProductRepository::list(state.pool()).await?;
    Ok(Json(ApiResponse::success(products)))
}

/// Create a product (editor or admin)
///
/// POST /products
#[utoipa::path(
    post,
    path = "/products",
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<Product>),
        (status = 400, description = "Missing field, negative price or stock outside 0-100"),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid token or insufficient role")
    ),
    security(("bearer_jwt" = [])),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    ApiJson(input): ApiJson<ProductInput>,
) -> Result<(StatusCode, Json<ApiResponse<Product>>), ApiError> {
    let product = ProductRepository::create(state.pool(), &input).await?;
    tracing::debug!(by = %claims.username, product_id = product.id, "create_product");
    Ok((StatusCode::CREATED, Json(ApiResponse::success(product))))
}

/// Replace a product's fields (editor or admin)
///
/// PUT /products/{id}
#[utoipa::path(
    put,
    path = "/products/{id}",
    params(("id" = i64, Path, description = "Product ID")),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<Product>),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid token or insufficient role"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_jwt" = [])),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<ProductInput>,
) -> Result<Json<ApiResponse<Product>>, ApiError> {
    let product = ProductRepository::update(state.pool(), id, &input).await?;
    Ok(Json(ApiResponse::success(product)))
}

/// Delete a product (admin only)
///
/// DELETE /products/{id}
#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 400, description = "Product still has orders"),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid token or not an admin"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_jwt" = [])),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    ProductRepository::delete(state.pool(), id).await?;
    tracing::info!(by = %claims.username, product_id = id, "Product removed by admin");
    Ok(Json(ApiResponse::success(())))
}
