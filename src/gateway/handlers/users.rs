use std::sync::Arc;

use axum::{Json, extract::State};

use super::super::error::ApiError;
use super::super::state::AppState;
use super::super::types::ApiResponse;
use crate::account::{User, UserRepository};

/// List users without password hashes (any authenticated user)
///
/// GET /users
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users", body = ApiResponse<Vec<User>>),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid token")
    ),
    security(("bearer_jwt" = [])),
    tag = "Users"
)]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<User>>>, ApiError> {
    let users = UserRepository::list(state.pool()).await?;
    Ok(Json(ApiResponse::success(users)))
}
