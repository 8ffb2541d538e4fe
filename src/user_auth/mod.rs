//! Password login, registration and bearer-token access control

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod service;

pub use error::AuthError;
pub use middleware::{AccessGuard, access_guard_middleware};
pub use service::{AuthResponse, Claims, LoginRequest, RegisterRequest, UserAuthService};
