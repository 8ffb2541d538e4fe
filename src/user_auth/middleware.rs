use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use super::error::AuthError;
use super::service::UserAuthService;
use crate::account::AccessTier;
use crate::gateway::error::ApiError;

/// Per-route access check: verifies the bearer token, then the caller's role
/// against `tier`. On success the verified [`Claims`](super::Claims) are inserted
/// into the request extensions for the handler.
#[derive(Clone)]
pub struct AccessGuard {
    auth: Arc<UserAuthService>,
    tier: AccessTier,
}

impl AccessGuard {
    pub fn new(auth: Arc<UserAuthService>, tier: AccessTier) -> Self {
        Self { auth, tier }
    }
}

pub async fn access_guard_middleware(
    State(guard): State<AccessGuard>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    // 1. Extract bearer token
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token)
        .ok_or(AuthError::MissingToken)?;

    // 2. Verify signature and expiry
    let claims = guard.auth.verify_token(token)?;

    // 3. Check role
    if !claims.role.satisfies(guard.tier) {
        tracing::warn!(
            user = %claims.username,
            role = %claims.role,
            required = ?guard.tier,
            path = %request.uri().path(),
            "Access denied"
        );
        return Err(AuthError::InsufficientRole(guard.tier).into());
    }

    // 4. Hand the session to the handler
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Token from an `Authorization` value; the scheme name is case-insensitive.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim_start().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_scheme_any_case() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("bearer abc"), Some("abc"));
        assert_eq!(bearer_token("BEARER  abc "), Some("abc"));
    }

    #[test]
    fn test_bearer_rejects_other_forms() {
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("Bearer"), None);
        assert_eq!(bearer_token("Bearer   "), None);
        assert_eq!(bearer_token("abc"), None);
    }
}
