//! Aggregate queries behind the dashboard and sales chart

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use utoipa::ToSchema;

/// Dashboard counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct DashboardSummary {
    pub product_count: i64,
    pub order_count: i64,
    /// Sum of all order totals, 0 when there are no orders
    pub total_sales: f64,
    pub user_count: i64,
}

/// Units sold per product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct ProductSales {
    #[schema(example = "Mechanical Keyboard")]
    pub product_name: String,
    #[schema(example = 12)]
    pub total_quantity: i64,
}

pub async fn dashboard_summary(pool: &SqlitePool) -> Result<DashboardSummary, sqlx::Error> {
    sqlx::query_as::<_, DashboardSummary>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM products) AS product_count,
            (SELECT COUNT(*) FROM orders) AS order_count,
            (SELECT CAST(COALESCE(SUM(total_price), 0) AS REAL) FROM orders) AS total_sales,
            (SELECT COUNT(*) FROM users) AS user_count
        "#,
    )
    .fetch_one(pool)
    .await
}

/// Ordered by units sold, best seller first
pub async fn sales_by_product(pool: &SqlitePool) -> Result<Vec<ProductSales>, sqlx::Error> {
    sqlx::query_as::<_, ProductSales>(
        r#"
        SELECT p.name AS product_name, SUM(o.quantity) AS total_quantity
        FROM orders o
        JOIN products p ON o.product_id = p.id
        GROUP BY p.name
        ORDER BY total_quantity DESC, p.name ASC
        "#,
    )
    .fetch_all(pool)
    .await
}
