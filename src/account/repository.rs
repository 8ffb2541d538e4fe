//! Repository layer for the `users` table

use super::models::{Role, User, UserRecord};
use sqlx::SqlitePool;

/// User repository for CRUD operations
pub struct UserRepository;

impl UserRepository {
    /// Get user (with password hash) by username
    pub async fn get_by_username(
        pool: &SqlitePool,
        username: &str,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        sqlx::query_as::<_, UserRecord>(
            r#"SELECT id, username, email, password, role, created_at
               FROM users WHERE username = ?"#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await
    }

    /// Get user by ID
    pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
        let row = sqlx::query_as::<_, UserRecord>(
            r#"SELECT id, username, email, password, role, created_at
               FROM users WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(UserRecord::into_user))
    }

    /// Whether a user already holds this username or email
    pub async fn exists(pool: &SqlitePool, username: &str, email: &str) -> Result<bool, sqlx::Error> {
        let found: Option<i64> =
            sqlx::query_scalar("SELECT id FROM users WHERE username = ? OR email = ? LIMIT 1")
                .bind(username)
                .bind(email)
                .fetch_optional(pool)
                .await?;
        Ok(found.is_some())
    }

    /// Create a new user; `password_hash` must already be hashed
    pub async fn create(
        pool: &SqlitePool,
        username: &str,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<i64, sqlx::Error> {
        let result =
            sqlx::query("INSERT INTO users (username, email, password, role) VALUES (?, ?, ?, ?)")
                .bind(username)
                .bind(email)
                .bind(password_hash)
                .bind(role.as_str())
                .execute(pool)
                .await?;

        Ok(result.last_insert_rowid())
    }

    /// List all users without password hashes
    pub async fn list(pool: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
        let rows = sqlx::query_as::<_, UserRecord>(
            r#"SELECT id, username, email, '' AS password, role, created_at
               FROM users ORDER BY id"#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(UserRecord::into_user).collect())
    }
}
