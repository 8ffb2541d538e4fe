pub mod error;
pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use anyhow::{Context, Result};
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::account::AccessTier;
use crate::config::ServerConfig;
use crate::user_auth::{AccessGuard, access_guard_middleware};
use state::AppState;

/// Assemble every route with its access tier.
///
/// | tier | routes |
/// |---|---|
/// | public | /health, /login, /register, GET /products, /dashboard-summary |
/// | authenticated | DELETE /orders/{id}, /users |
/// | editor | POST /products, PUT /products/{id}, /orders, /sales-charts |
/// | admin | DELETE /products/{id} |
pub fn build_router(state: Arc<AppState>) -> Router {
    let authenticated = from_fn_with_state(
        AccessGuard::new(state.user_auth.clone(), AccessTier::Authenticated),
        access_guard_middleware,
    );
    let editor = from_fn_with_state(
        AccessGuard::new(state.user_auth.clone(), AccessTier::Editor),
        access_guard_middleware,
    );
    let admin = from_fn_with_state(
        AccessGuard::new(state.user_auth.clone(), AccessTier::Admin),
        access_guard_middleware,
    );

    Router::new()
        // System
        .route("/health", get(handlers::health_check))
        // Auth
        .route("/login", post(crate::user_auth::handlers::login))
        .route("/register", post(crate::user_auth::handlers::register))
        // Products
        .route(
            "/products",
            get(handlers::list_products)
                .merge(post(handlers::create_product).route_layer(editor.clone())),
        )
        .route(
            "/products/{id}",
            put(handlers::update_product)
                .route_layer(editor.clone())
                .merge(delete(handlers::delete_product).route_layer(admin)),
        )
        // Orders
        .route(
            "/orders",
            get(handlers::list_orders)
                .post(handlers::create_order)
                .route_layer(editor.clone()),
        )
        .route(
            "/orders/{id}",
            delete(handlers::delete_order).route_layer(authenticated.clone()),
        )
        // Reports
        .route("/dashboard-summary", get(handlers::dashboard_summary))
        .route(
            "/sales-charts",
            get(handlers::sales_charts).route_layer(editor),
        )
        // Users
        .route("/users", get(handlers::list_users).route_layer(authenticated))
        .fallback(handlers::not_found)
        .with_state(state)
        // OpenAPI / Swagger UI (stateless, added after with_state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
}

/// CORS for the admin front end: a single origin, credentials allowed
pub fn cors_layer(origin: &str) -> Result<CorsLayer> {
    let origin = HeaderValue::from_str(origin)
        .with_context(|| format!("Invalid CORS origin: {}", origin))?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]))
}

/// Start HTTP server and serve until Ctrl-C
pub async fn run_server(config: &ServerConfig, state: Arc<AppState>) -> Result<()> {
    let app = build_router(state)
        .layer(cors_layer(&config.cors_origin)?)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await.with_context(|| {
        format!(
            "Failed to bind to {} (port {} may already be in use)",
            addr, config.port
        )
    })?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("API docs: http://{}/docs", addr);
    tracing::info!("Frontend origin: {}", config.cors_origin);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
