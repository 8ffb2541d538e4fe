//! Orders: the only multi-step writes in the system

pub mod error;
pub mod models;
pub mod service;

pub use error::OrderError;
pub use models::{CreateOrderRequest, DeletedOrder, OrderDetails};
pub use service::OrderService;
