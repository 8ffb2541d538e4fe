//! API error taxonomy and JSON extractors that report through it.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request, rejection::JsonRejection},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::types::{ApiResponse, error_codes};
use crate::catalog::CatalogError;
use crate::orders::OrderError;
use crate::user_auth::AuthError;

/// Every failure a handler can report. Rendered as the standard envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    InsufficientStock(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    /// The detail is logged, never returned to the caller
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InsufficientStock(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::Validation(_) => error_codes::INVALID_PARAMETER,
            Self::InsufficientStock(_) => error_codes::INSUFFICIENT_STOCK,
            Self::Unauthorized(_) => error_codes::MISSING_AUTH,
            Self::Forbidden(_) => error_codes::FORBIDDEN,
            Self::NotFound(_) => error_codes::NOT_FOUND,
            Self::Internal(_) => error_codes::INTERNAL_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let msg = match &self {
            Self::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        let body = ApiResponse::<()>::error(self.code(), msg);
        (self.status(), Json(body)).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        Self::Internal(format!("Database error: {}", e))
    }
}

impl From<OrderError> for ApiError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::Validation(msg) => Self::Validation(msg),
            OrderError::ProductNotFound(_) => Self::NotFound("Product not found".to_string()),
            OrderError::OrderNotFound(_) => Self::NotFound("Order not found".to_string()),
            e @ OrderError::InsufficientStock { .. } => Self::InsufficientStock(e.to_string()),
            OrderError::Database(e) => e.into(),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::Validation(msg) => Self::Validation(msg),
            CatalogError::NotFound(_) => Self::NotFound("Product not found".to_string()),
            e @ CatalogError::InUse(_) => Self::Validation(e.to_string()),
            CatalogError::Database(e) => e.into(),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(msg) => Self::Validation(msg),
            AuthError::UserNotFound => Self::NotFound("User not found".to_string()),
            e @ (AuthError::InvalidPassword | AuthError::MissingToken) => {
                Self::Unauthorized(e.to_string())
            }
            e @ (AuthError::InvalidToken | AuthError::InsufficientRole(_)) => {
                Self::Forbidden(e.to_string())
            }
            e @ (AuthError::Hashing(_) | AuthError::TokenEncoding(_)) => {
                Self::Internal(e.to_string())
            }
            AuthError::Database(e) => e.into(),
        }
    }
}

// ============================================================================
// Extractors
// ============================================================================

/// `Json` whose rejections come back as a `Validation` envelope instead of plain text
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| ApiError::Validation(e.body_text()))?;
        Ok(Self(value))
    }
}

/// `Path` whose rejections come back as a `Validation` envelope
#[derive(Debug, Clone, Copy)]
pub struct ApiPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::Validation(e.body_text()))?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::AccessTier;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::Validation("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::InsufficientStock("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Unauthorized("x".into()).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Forbidden("x".into()).status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_auth_errors_split_401_403() {
        assert_eq!(
            ApiError::from(AuthError::MissingToken).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(AuthError::InvalidToken).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::from(AuthError::InsufficientRole(AccessTier::Admin)).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::from(AuthError::InvalidPassword).status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_order_errors() {
        let e = ApiError::from(OrderError::InsufficientStock {
            requested: 3,
            available: 2,
        });
        assert_eq!(e.code(), error_codes::INSUFFICIENT_STOCK);
        assert!(e.to_string().contains("available 2"));
        assert_eq!(
            ApiError::from(OrderError::OrderNotFound(1)).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let resp = ApiError::Internal("disk on fire".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
