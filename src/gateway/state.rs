use sqlx::SqlitePool;
use std::sync::Arc;

use crate::db::Database;
use crate::orders::OrderService;
use crate::user_auth::UserAuthService;

/// Shared gateway state
#[derive(Clone)]
pub struct AppState {
    /// SQLite pool
    pub db: Arc<Database>,
    /// Login, registration and token verification
    pub user_auth: Arc<UserAuthService>,
}

impl AppState {
    pub fn new(db: Arc<Database>, user_auth: Arc<UserAuthService>) -> Self {
        Self { db, user_auth }
    }

    pub fn pool(&self) -> &SqlitePool {
        self.db.pool()
    }

    pub fn orders(&self) -> OrderService {
        OrderService::new(self.db.pool().clone())
    }
}
