use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

use super::service::{AuthResponse, LoginRequest, RegisterRequest};
use crate::gateway::error::{ApiError, ApiJson};
use crate::gateway::{state::AppState, types::ApiResponse};

/// Register a new user
///
/// POST /register
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = ApiResponse<AuthResponse>),
        (status = 400, description = "Invalid input or user already exists"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponse>>), ApiError> {
    let resp = state.user_auth.register(req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(resp))))
}

/// Login user
///
/// POST /login
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthResponse>),
        (status = 401, description = "Wrong password"),
        (status = 404, description = "Unknown username"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    let username = req.username.clone();
    match state.user_auth.login(req).await {
        Ok(resp) => {
            tracing::info!(user_id = resp.user.id, %username, "Login succeeded");
            Ok(Json(ApiResponse::success(resp)))
        }
        Err(e) => {
            tracing::warn!(%username, "Login failed: {}", e);
            Err(e.into())
        }
    }
}
