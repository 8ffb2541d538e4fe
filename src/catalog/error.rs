use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0}")]
    Validation(String),

    #[error("Product not found: {0}")]
    NotFound(i64),

    #[error("Product {0} still has orders and cannot be deleted")]
    InUse(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
