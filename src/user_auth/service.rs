use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use utoipa::ToSchema;
use validator::Validate;

use super::error::AuthError;
use crate::account::{Role, User, UserRepository};

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    pub sub: String, // user id
    pub username: String,
    pub role: Role,
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

/// User Registration Request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "username is required"))]
    #[schema(example = "user1")]
    pub username: String,
    #[serde(default)]
    #[validate(email(message = "email must be a valid email address"))]
    #[schema(example = "user1@example.com")]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    #[schema(example = "password123")]
    pub password: String,
    #[serde(default, alias = "confirmPassword")]
    #[validate(must_match(other = "password", message = "passwords do not match"))]
    #[schema(example = "password123")]
    pub confirm_password: String,
}

/// User Login Request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "admin")]
    pub username: String,
    #[schema(example = "admin123")]
    pub password: String,
}

/// Auth Response (JWT + the user it was issued to)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Accounts created on first start when seeding is enabled
const DEFAULT_USERS: &[(&str, &str, &str, Role)] = &[
    ("admin", "admin@example.com", "admin123", Role::Admin),
    ("editor", "editor@example.com", "editor123", Role::Editor),
];

pub struct UserAuthService {
    db: SqlitePool,
    jwt_secret: String,
    token_ttl: Duration,
}

impl UserAuthService {
    pub fn new(db: SqlitePool, jwt_secret: String, token_ttl_hours: i64) -> Self {
        Self {
            db,
            jwt_secret,
            token_ttl: Duration::hours(token_ttl_hours),
        }
    }

    /// Register a new user with role `user` and issue a token
    pub async fn register(&self, req: RegisterRequest) -> Result<AuthResponse, AuthError> {
        req.validate()
            .map_err(|e| AuthError::Validation(e.to_string()))?;
        let username = req.username.trim();
        if username.is_empty() {
            return Err(AuthError::Validation("username is required".to_string()));
        }

        if UserRepository::exists(&self.db, username, &req.email).await? {
            return Err(AuthError::Validation(
                "Username or email already in use".to_string(),
            ));
        }

        let password_hash = hash_password(&req.password)?;
        let id = UserRepository::create(&self.db, username, &req.email, &password_hash, Role::User)
            .await
            .map_err(|e| match e {
                // Lost a race with a concurrent registration
                sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                    AuthError::Validation("Username or email already in use".to_string())
                }
                other => AuthError::Database(other),
            })?;

        let user = UserRepository::get_by_id(&self.db, id)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        let token = self.issue_token(&user)?;

        tracing::info!(user_id = id, username = %user.username, "User registered");
        Ok(AuthResponse { token, user })
    }

    /// Login user and issue JWT
    pub async fn login(&self, req: LoginRequest) -> Result<AuthResponse, AuthError> {
        // 1. Find user by username
        let record = UserRepository::get_by_username(&self.db, &req.username)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        // 2. Verify password
        verify_password(&req.password, &record.password)?;

        // 3. Generate JWT
        let user = record.into_user();
        let token = self.issue_token(&user)?;
        Ok(AuthResponse { token, user })
    }

    /// Sign a token carrying the user's id, username and role
    pub fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            role: user.role,
            exp: (now + self.token_ttl).timestamp().max(0) as usize,
            iat: now.timestamp().max(0) as usize,
        };
        self.encode_claims(&claims)
    }

    pub(crate) fn encode_claims(&self, claims: &Claims) -> Result<String, AuthError> {
        Ok(encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )?)
    }

    /// Verify JWT signature and expiry
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let decoding_key = DecodingKey::from_secret(self.jwt_secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact
        validation.leeway = 0;
        decode::<Claims>(token, &decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Token rejected: {}", e);
                AuthError::InvalidToken
            })
    }

    /// Create the default admin and editor accounts if they do not exist yet
    pub async fn seed_default_users(&self) -> Result<(), AuthError> {
        for (username, email, password, role) in DEFAULT_USERS {
            if UserRepository::get_by_username(&self.db, username)
                .await?
                .is_some()
            {
                continue;
            }
            let hash = hash_password(password)?;
            UserRepository::create(&self.db, username, email, &hash, *role).await?;
            tracing::info!(username, role = %role, "Default user created");
        }
        Ok(())
    }
}

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

pub fn verify_password(password: &str, stored_hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| AuthError::Hashing(e.to_string()))?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidPassword)
}
