//! Storefront Admin - administration backend for a small shop
//!
//! REST API over SQLite for products, orders and users, guarded by JWT bearer
//! tokens and three access tiers (authenticated, editor, admin).
//!
//! # Modules
//!
//! - [`config`] - YAML configuration with environment overrides
//! - [`logging`] - tracing subscriber setup
//! - [`db`] - SQLite pool and schema
//! - [`account`] - users, roles and access tiers
//! - [`catalog`] - products
//! - [`orders`] - transactional order placement and cancellation
//! - [`reports`] - dashboard and sales aggregates
//! - [`user_auth`] - passwords, tokens and the access guard
//! - [`gateway`] - axum router, handlers, error envelope, OpenAPI
//! - [`client`] - typed HTTP client with session context and retry

pub mod account;
pub mod catalog;
pub mod client;
pub mod config;
pub mod db;
pub mod gateway;
pub mod logging;
pub mod orders;
pub mod reports;
pub mod user_auth;

pub use account::{AccessTier, Role, User};
pub use catalog::{Product, ProductInput};
pub use client::{AdminClient, ClientError, RetryPolicy, Session};
pub use config::AppConfig;
pub use db::Database;
pub use gateway::error::ApiError;
pub use orders::{CreateOrderRequest, DeletedOrder, OrderDetails, OrderError, OrderService};
