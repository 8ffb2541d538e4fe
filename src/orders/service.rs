//! Order placement and cancellation
//!
//! Both operations run inside a single SQLite transaction. The first statement of
//! each transaction is a write, so the connection takes the write lock up front
//! instead of upgrading a read lock halfway through.

use sqlx::SqlitePool;

use super::error::OrderError;
use super::models::{CreateOrderRequest, DeletedOrder, OrderDetails};

#[derive(sqlx::FromRow)]
struct ReservedStock {
    name: String,
    price: f64,
}

#[derive(sqlx::FromRow)]
struct RemovedOrder {
    product_id: i64,
    quantity: i64,
}

pub struct OrderService {
    pool: SqlitePool,
}

impl OrderService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All orders with product names, newest first
    pub async fn list_orders(&self) -> Result<Vec<OrderDetails>, OrderError> {
        let rows = sqlx::query_as::<_, OrderDetails>(
            r#"
            SELECT o.id, o.product_id, p.name AS product_name, o.quantity, o.total_price,
                   o.customer_name, o.customer_email, o.created_at
            FROM orders o
            JOIN products p ON o.product_id = p.id
            ORDER BY o.created_at DESC, o.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Place an order: reserve stock, snapshot the total, record the order.
    ///
    /// Returning early drops `tx`, which rolls everything back.
    pub async fn create_order(&self, req: &CreateOrderRequest) -> Result<OrderDetails, OrderError> {
        req.check()?;

        let mut tx = self.pool.begin().await?;

        // 1. Decrement stock only if enough is left
        let reserved = sqlx::query_as::<_, ReservedStock>(
            r#"
            UPDATE products SET stock = stock - ?
            WHERE id = ? AND stock >= ?
            RETURNING name, price
            "#,
        )
        .bind(req.quantity)
        .bind(req.product_id)
        .bind(req.quantity)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(product) = reserved else {
            // 2. Tell a missing product apart from a short one
            let available: Option<i64> =
                sqlx::query_scalar("SELECT stock FROM products WHERE id = ?")
                    .bind(req.product_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            return Err(match available {
                None => OrderError::ProductNotFound(req.product_id),
                Some(available) => OrderError::InsufficientStock {
                    requested: req.quantity,
                    available,
                },
            });
        };

        // 3. Snapshot the total
        let total_price = product.price * req.quantity as f64;

        // 4. Record the order
        let (id, created_at) = sqlx::query_as::<_, (i64, Option<chrono::NaiveDateTime>)>(
            r#"
            INSERT INTO orders (product_id, quantity, total_price, customer_name, customer_email)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, created_at
            "#,
        )
        .bind(req.product_id)
        .bind(req.quantity)
        .bind(total_price)
        .bind(req.customer_name.trim())
        .bind(&req.customer_email)
        .fetch_one(&mut *tx)
        .await?;

        // 5. Commit
        tx.commit().await?;

        tracing::info!(
            order_id = id,
            product_id = req.product_id,
            quantity = req.quantity,
            total_price,
            "Order created"
        );

        Ok(OrderDetails {
            id,
            product_id: req.product_id,
            product_name: product.name,
            quantity: req.quantity,
            total_price,
            customer_name: req.customer_name.trim().to_string(),
            customer_email: req.customer_email.clone(),
            created_at,
        })
    }

    /// Delete an order and give its quantity back to the product.
    pub async fn delete_order(&self, order_id: i64) -> Result<DeletedOrder, OrderError> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query_as::<_, RemovedOrder>(
            "DELETE FROM orders WHERE id = ? RETURNING product_id, quantity",
        )
        .bind(order_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(OrderError::OrderNotFound(order_id))?;

        sqlx::query("UPDATE products SET stock = stock + ? WHERE id = ?")
            .bind(removed.quantity)
            .bind(removed.product_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            order_id,
            product_id = removed.product_id,
            restored = removed.quantity,
            "Order deleted, stock restored"
        );

        Ok(DeletedOrder {
            deleted: true,
            restored_stock: removed.quantity,
        })
    }
}
