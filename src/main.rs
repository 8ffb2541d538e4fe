//! Storefront admin API server
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌──────────┐    ┌──────────┐
//! │  Client  │───▶│  Access  │───▶│ Handlers │───▶│  SQLite  │
//! │  (JSON)  │    │  Guard   │    │          │    │  (sqlx)  │
//! └──────────┘    └──────────┘    └──────────┘    └──────────┘
//! ```
//!
//! Usage: `storefront_admin [--env <name>] [--port <n>]`

use anyhow::{Context, Result, bail};
use std::sync::Arc;

use storefront_admin::config::AppConfig;
use storefront_admin::db::Database;
use storefront_admin::gateway::{self, state::AppState};
use storefront_admin::logging::init_logging;
use storefront_admin::user_auth::UserAuthService;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

#[tokio::main]
async fn main() -> Result<()> {
    let env = get_env();
    let mut app_config = AppConfig::load(&env)?;
    if let Some(port) = get_port_override() {
        app_config.server.port = port;
    }
    let _log_guard = init_logging(&app_config);

    tracing::info!("Starting storefront admin in {} mode", env);

    if app_config.auth.jwt_secret.trim().is_empty() {
        bail!("auth.jwt_secret is empty; set it in config/{}.yaml or JWT_SECRET", env);
    }

    let db = Arc::new(
        Database::connect(&app_config.database.url, app_config.database.max_connections)
            .await
            .context("Database initialization failed")?,
    );

    let user_auth = Arc::new(UserAuthService::new(
        db.pool().clone(),
        app_config.auth.jwt_secret.clone(),
        app_config.auth.token_ttl_hours,
    ));
    if app_config.auth.seed_default_users {
        user_auth
            .seed_default_users()
            .await
            .context("Failed to create default users")?;
    }

    let state = Arc::new(AppState::new(db.clone(), user_auth));
    let result = gateway::run_server(&app_config.server, state).await;

    db.close().await;
    result
}
