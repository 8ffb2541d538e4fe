//! Dashboard and sales chart handlers

use std::sync::Arc;

use axum::{Json, extract::State};

use super::super::error::ApiError;
use super::super::state::AppState;
use super::super::types::ApiResponse;
use crate::reports::{self, DashboardSummary, ProductSales};

/// Dashboard counters (public)
///
/// GET /dashboard-summary
#[utoipa::path(
    get,
    path = "/dashboard-summary",
    responses(
        (status = 200, description = "Counts and total sales", body = ApiResponse<DashboardSummary>)
    ),
    tag = "Reports"
)]
pub async fn dashboard_summary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<DashboardSummary>>, ApiError> {
    let summary = reports::dashboard_summary(state.pool()).await?;
    Ok(Json(ApiResponse::success(summary)))
}

/// Units sold per product (editor or admin)
///
/// GET /sales-charts
#[utoipa::path(
    get,
    path = "/sales-charts",
    responses(
        (status = 200, description = "Per-product sales, best seller first", body = ApiResponse<Vec<ProductSales>>),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid token or insufficient role")
    ),
    security(("bearer_jwt" = [])),
    tag = "Reports"
)]
pub async fn sales_charts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<ProductSales>>>, ApiError> {
    let sales = reports::sales_by_product(state.pool()).await?;
    Ok(Json(ApiResponse::success(sales)))
}
