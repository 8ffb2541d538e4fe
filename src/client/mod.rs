//! Typed HTTP client for the admin API
//!
//! The client holds no login state. [`AdminClient::login`] and
//! [`AdminClient::register`] return a [`Session`], and every protected call
//! takes that session explicitly.
//!
//! ```no_run
//! # async fn demo() -> Result<(), storefront_admin::ClientError> {
//! use storefront_admin::AdminClient;
//!
//! let client = AdminClient::new("http://localhost:3000")?;
//! let session = client.login("admin", "admin123").await?;
//! let products = client.list_products().await?;
//! client.delete_product(&session, products[0].id).await?;
//! # Ok(())
//! # }
//! ```

pub mod retry;

pub use retry::RetryPolicy;

use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::account::{AccessTier, Role, User};
use crate::catalog::{Product, ProductInput};
use crate::gateway::handlers::HealthResponse;
use crate::gateway::types::ApiResponse;
use crate::orders::{CreateOrderRequest, DeletedOrder, OrderDetails};
use crate::reports::{DashboardSummary, ProductSales};
use crate::user_auth::{AuthResponse, LoginRequest, RegisterRequest};

/// Per-request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Server answered with an error envelope (or a non-JSON error body)
    #[error("API error {status} (code {code}): {message}")]
    Api {
        status: u16,
        code: i32,
        message: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Response carried no data")]
    EmptyResponse,
}

impl ClientError {
    /// HTTP status of an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Envelope code of an API error
    pub fn code(&self) -> Option<i32> {
        match self {
            ClientError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Token plus the user it belongs to
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn role(&self) -> Role {
        self.user.role
    }

    /// Whether the UI should offer actions guarded by `tier`
    pub fn can(&self, tier: AccessTier) -> bool {
        self.user.role.satisfies(tier)
    }
}

impl From<AuthResponse> for Session {
    fn from(auth: AuthResponse) -> Self {
        Self {
            token: auth.token,
            user: auth.user,
        }
    }
}

pub struct AdminClient {
    http: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl AdminClient {
    /// Client with a 10 s timeout and the default retry policy
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self::with_http_client(http, base_url))
    }

    pub fn with_http_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ------------------------------------------------------------------
    // Public endpoints
    // ------------------------------------------------------------------

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        self.fetch(|| self.request(Method::GET, "/health", None))
            .await
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ClientError> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let auth: AuthResponse = self
            .fetch(|| self.request(Method::POST, "/login", None).json(&body))
            .await?;
        tracing::debug!(user = %auth.user.username, role = %auth.user.role, "Logged in");
        Ok(auth.into())
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<Session, ClientError> {
        let auth: AuthResponse = self
            .fetch(|| self.request(Method::POST, "/register", None).json(request))
            .await?;
        Ok(auth.into())
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        self.fetch(|| self.request(Method::GET, "/products", None))
            .await
    }

    pub async fn dashboard_summary(&self) -> Result<DashboardSummary, ClientError> {
        self.fetch(|| self.request(Method::GET, "/dashboard-summary", None))
            .await
    }

    // ------------------------------------------------------------------
    // Protected endpoints
    // ------------------------------------------------------------------

    pub async fn create_product(
        &self,
        session: &Session,
        input: &ProductInput,
    ) -> Result<Product, ClientError> {
        self.fetch(|| {
            self.request(Method::POST, "/products", Some(session))
                .json(input)
        })
        .await
    }

    pub async fn update_product(
        &self,
        session: &Session,
        id: i64,
        input: &ProductInput,
    ) -> Result<Product, ClientError> {
        let path = format!("/products/{}", id);
        self.fetch(|| self.request(Method::PUT, &path, Some(session)).json(input))
            .await
    }

    pub async fn delete_product(&self, session: &Session, id: i64) -> Result<(), ClientError> {
        let path = format!("/products/{}", id);
        self.execute::<()>(|| self.request(Method::DELETE, &path, Some(session)))
            .await?;
        Ok(())
    }

    pub async fn list_orders(&self, session: &Session) -> Result<Vec<OrderDetails>, ClientError> {
        self.fetch(|| self.request(Method::GET, "/orders", Some(session)))
            .await
    }

    pub async fn create_order(
        &self,
        session: &Session,
        request: &CreateOrderRequest,
    ) -> Result<OrderDetails, ClientError> {
        self.fetch(|| {
            self.request(Method::POST, "/orders", Some(session))
                .json(request)
        })
        .await
    }

    pub async fn delete_order(
        &self,
        session: &Session,
        id: i64,
    ) -> Result<DeletedOrder, ClientError> {
        let path = format!("/orders/{}", id);
        self.fetch(|| self.request(Method::DELETE, &path, Some(session)))
            .await
    }

    pub async fn sales_charts(&self, session: &Session) -> Result<Vec<ProductSales>, ClientError> {
        self.fetch(|| self.request(Method::GET, "/sales-charts", Some(session)))
            .await
    }

    pub async fn list_users(&self, session: &Session) -> Result<Vec<User>, ClientError> {
        self.fetch(|| self.request(Method::GET, "/users", Some(session)))
            .await
    }

    // ------------------------------------------------------------------
    // Plumbing
    // ------------------------------------------------------------------

    fn request(&self, method: Method, path: &str, session: Option<&Session>) -> RequestBuilder {
        let request = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        match session {
            Some(session) => request.bearer_auth(&session.token),
            None => request,
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        build: impl FnMut() -> RequestBuilder,
    ) -> Result<Option<T>, ClientError> {
        let response = self.retry.send(build).await?;
        decode(response).await
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        build: impl FnMut() -> RequestBuilder,
    ) -> Result<T, ClientError> {
        self.execute(build).await?.ok_or(ClientError::EmptyResponse)
    }
}

/// Unwrap the response envelope, turning error statuses into [`ClientError::Api`]
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<Option<T>, ClientError> {
    let status = response.status();
    let body = response.bytes().await?;

    match serde_json::from_slice::<ApiResponse<T>>(&body) {
        Ok(envelope) if status.is_success() && envelope.is_success() => Ok(envelope.data),
        Ok(envelope) => Err(ClientError::Api {
            status: status.as_u16(),
            code: envelope.code,
            message: envelope.msg,
        }),
        Err(e) if status.is_success() => Err(ClientError::Decode(e)),
        Err(_) => Err(ClientError::Api {
            status: status.as_u16(),
            code: 0,
            message: fallback_message(status, &body),
        }),
    }
}

fn fallback_message(status: StatusCode, body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body).trim().to_string();
    if text.is_empty() {
        status.canonical_reason().unwrap_or("unknown error").to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> reqwest::Response {
        axum::http::Response::builder()
            .status(status)
            .body(body.to_string())
            .unwrap()
            .into()
    }

    #[tokio::test]
    async fn test_decode_success_envelope() {
        let r = response(200, r#"{"code":0,"msg":"ok","data":[1,2,3]}"#);
        let data: Option<Vec<i32>> = decode(r).await.unwrap();
        assert_eq!(data, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_decode_null_data() {
        let r = response(200, r#"{"code":0,"msg":"ok","data":null}"#);
        let data: Option<()> = decode(r).await.unwrap();
        assert!(data.is_none());
    }

    #[tokio::test]
    async fn test_decode_error_envelope() {
        let r = response(400, r#"{"code":1002,"msg":"Insufficient stock: requested 3, available 2"}"#);
        let err = decode::<OrderDetails>(r).await.unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.code(), Some(1002));
        assert!(err.to_string().contains("Insufficient stock"));
    }

    #[tokio::test]
    async fn test_decode_plain_error_body() {
        let r = response(405, "");
        let err = decode::<()>(r).await.unwrap_err();
        match err {
            ClientError::Api { status, code, message } => {
                assert_eq!(status, 405);
                assert_eq!(code, 0);
                assert_eq!(message, "Method Not Allowed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_decode_garbage_on_success_is_decode_error() {
        let r = response(200, "<html>");
        assert!(matches!(
            decode::<Product>(r).await,
            Err(ClientError::Decode(_))
        ));
    }

    #[test]
    fn test_session_capabilities() {
        let session = Session {
            token: "t".to_string(),
            user: User {
                id: 2,
                username: "editor".to_string(),
                email: "editor@example.com".to_string(),
                role: Role::Editor,
                created_at: None,
            },
        };
        assert_eq!(session.role(), Role::Editor);
        assert!(session.can(AccessTier::Editor));
        assert!(!session.can(AccessTier::Admin));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = AdminClient::new("http://localhost:3000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
    }
}
