//! Product catalog

pub mod error;
pub mod models;
pub mod repository;

pub use error::CatalogError;
pub use models::{MAX_INITIAL_STOCK, Product, ProductInput};
pub use repository::ProductRepository;
