//! Order handlers

use std::sync::Arc;

use axum::{Extension, Json, extract::State, http::StatusCode};

use super::super::error::{ApiError, ApiJson, ApiPath};
use super::super::state::AppState;
use super::super::types::ApiResponse;
use crate::orders::{CreateOrderRequest, DeletedOrder, OrderDetails};
use crate::user_auth::Claims;

/// List orders with product names, newest first (editor or admin)
///
/// GET /orders
#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "All orders", body = ApiResponse<Vec<OrderDetails>>),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid token or insufficient role")
    ),
    security(("bearer_jwt" = [])),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<OrderDetails>>>, ApiError> {
    let orders = state.orders().list_orders().await?;
    Ok(Json(ApiResponse::success(orders)))
}

/// Place an order (editor or admin)
///
/// POST /orders
///
/// Decrements the product's stock and stores `price x quantity` as the total,
/// all in one transaction.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = ApiResponse<OrderDetails>),
        (status = 400, description = "Invalid order or insufficient stock"),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid token or insufficient role"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_jwt" = [])),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    ApiJson(req): ApiJson<CreateOrderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<OrderDetails>>), ApiError> {
    match state.orders().create_order(&req).await {
        Ok(order) => Ok((StatusCode::CREATED, Json(ApiResponse::success(order)))),
        Err(e) => {
            tracing::warn!(
                by = %claims.username,
                product_id = req.product_id,
                quantity = req.quantity,
                "Order rejected: {}",
                e
            );
            Err(e.into())
        }
    }
}

/// Delete an order and restore its stock (any authenticated user)
///
/// DELETE /orders/{id}
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    params(("id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order deleted", body = ApiResponse<DeletedOrder>),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid token"),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_jwt" = [])),
    tag = "Orders"
)]
pub async fn delete_order(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ApiResponse<DeletedOrder>>, ApiError> {
    let deleted = state.orders().delete_order(id).await?;
    Ok(Json(ApiResponse::success(deleted)))
}
