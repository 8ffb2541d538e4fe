//! Data models for user accounts and roles

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

// ============================================================================
// Roles and access tiers
// ============================================================================

/// User role. Privileges nest: admin ⊇ editor ⊇ user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Editor,
    Admin,
}

/// Minimum privilege a route demands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessTier {
    /// Any valid token
    Authenticated,
    /// Editor or admin
    Editor,
    /// Admin only
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Editor => "editor",
            Role::Admin => "admin",
        }
    }

    /// The single authorization predicate used by every protected route.
    pub fn satisfies(self, tier: AccessTier) -> bool {
        match tier {
            AccessTier::Authenticated => true,
            AccessTier::Editor => self >= Role::Editor,
            AccessTier::Admin => self == Role::Admin,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
#[error("Unknown role: '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "editor" => Ok(Role::Editor),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

// ============================================================================
// Users
// ============================================================================

/// User as exposed by the API (never carries the password hash)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub created_at: Option<NaiveDateTime>,
}

/// Full `users` row, including the stored password hash
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub created_at: Option<NaiveDateTime>,
}

impl UserRecord {
    /// Drop the hash. Unknown role strings fall back to the least privileged role.
    pub fn into_user(self) -> User {
        let role = self.role.parse().unwrap_or_else(|e: UnknownRole| {
            tracing::warn!(user_id = self.id, "{}; treating as 'user'", e);
            Role::User
        });
        User {
            id: self.id,
            username: self.username,
            email: self.email,
            role,
            created_at: self.created_at,
        }
    }
}
