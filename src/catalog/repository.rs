//! Product persistence

use sqlx::SqlitePool;

use super::error::CatalogError;
use super::models::{Product, ProductInput};

const PRODUCT_COLUMNS: &str = "id, name, price, stock, category, created_at";

/// Product repository. Inputs are checked here so every caller gets the same rules.
pub struct ProductRepository;

impl ProductRepository {
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Product>, CatalogError> {
        let rows = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id"
        ))
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<Product>, CatalogError> {
        let row = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }

    pub async fn create(pool: &SqlitePool, input: &ProductInput) -> Result<Product, CatalogError> {
        input.check_for_create()?;

        let product = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products (name, price, stock, category) VALUES (?, ?, ?, ?) \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(input.name.trim())
        .bind(input.price)
        .bind(input.stock)
        .bind(input.category.trim())
        .fetch_one(pool)
        .await?;

        tracing::info!(product_id = product.id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Replace name, price, stock and category of an existing product
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        input: &ProductInput,
    ) -> Result<Product, CatalogError> {
        input.check_for_update()?;

        let product = sqlx::query_as::<_, Product>(&format!(
            "UPDATE products SET name = ?, price = ?, stock = ?, category = ? WHERE id = ? \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(input.name.trim())
        .bind(input.price)
        .bind(input.stock)
        .bind(input.category.trim())
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(CatalogError::NotFound(id))?;

        tracing::info!(product_id = id, "Product updated");
        Ok(product)
    }

    /// Delete a product. Products still referenced by orders are kept.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), CatalogError> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                    CatalogError::InUse(id)
                }
                other => CatalogError::Database(other),
            })?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::NotFound(id));
        }
        tracing::info!(product_id = id, "Product deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    fn keyboard() -> ProductInput {
        ProductInput {
            name: "Keyboard".to_string(),
            price: 49.5,
            stock: 10,
            category: "Electronics".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let db = Database::in_memory().await.unwrap();
        let created = ProductRepository::create(db.pool(), &keyboard()).await.unwrap();
        assert_eq!(created.name, "Keyboard");
        assert_eq!(created.stock, 10);
        assert_eq!(created.category.as_deref(), Some("Electronics"));

        let all = ProductRepository::list(db.pool()).await.unwrap();
        assert_eq!(all, vec![created]);
    }

    #[tokio::test]
    async fn test_create_rejects_stock_over_cap() {
        let db = Database::in_memory().await.unwrap();
        let mut input = keyboard();
        input.stock = 101;
        let err = ProductRepository::create(db.pool(), &input).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert!(ProductRepository::list(db.pool()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_existing_and_missing() {
        let db = Database::in_memory().await.unwrap();
        let created = ProductRepository::create(db.pool(), &keyboard()).await.unwrap();

        let mut change = keyboard();
        change.price = 39.0;
        change.stock = 120;
        let updated = ProductRepository::update(db.pool(), created.id, &change)
            .await
            .unwrap();
        assert_eq!(updated.price, 39.0);
        assert_eq!(updated.stock, 120);

        let err = ProductRepository::update(db.pool(), 999, &change).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(999)));
    }

    #[tokio::test]
    async fn test_delete() {
        let db = Database::in_memory().await.unwrap();
        let created = ProductRepository::create(db.pool(), &keyboard()).await.unwrap();

        ProductRepository::delete(db.pool(), created.id).await.unwrap();
        assert!(ProductRepository::get(db.pool(), created.id).await.unwrap().is_none());

        let err = ProductRepository::delete(db.pool(), created.id).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_with_orders_is_refused() {
        let db = Database::in_memory().await.unwrap();
        let created = ProductRepository::create(db.pool(), &keyboard()).await.unwrap();
        sqlx::query(
            "INSERT INTO orders (product_id, quantity, total_price, customer_name, customer_email) \
             VALUES (?, 1, 49.5, 'Ann', 'ann@example.com')",
        )
        .bind(created.id)
        .execute(db.pool())
        .await
        .unwrap();

        let err = ProductRepository::delete(db.pool(), created.id).await.unwrap_err();
        assert!(matches!(err, CatalogError::InUse(id) if id == created.id));
        assert!(ProductRepository::get(db.pool(), created.id).await.unwrap().is_some());
    }
}
