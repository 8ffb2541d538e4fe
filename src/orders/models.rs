//! Order types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::error::OrderError;

/// Order joined with the name of its product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct OrderDetails {
    pub id: i64,
    pub product_id: i64,
    #[schema(example = "Mechanical Keyboard")]
    pub product_name: String,
    #[schema(example = 3)]
    pub quantity: i64,
    /// price x quantity at the moment the order was placed
    #[schema(example = 149.7)]
    pub total_price: f64,
    #[schema(example = "Ada Lovelace")]
    pub customer_name: String,
    #[schema(example = "ada@example.com")]
    pub customer_email: String,
    pub created_at: Option<NaiveDateTime>,
}

/// Create order request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    #[validate(range(min = 1, message = "product_id is required"))]
    pub product_id: i64,
    #[validate(range(min = 1, message = "quantity must be greater than zero"))]
    #[schema(example = 3)]
    pub quantity: i64,
    #[serde(default)]
    #[validate(length(min = 1, message = "customer_name is required"))]
    #[schema(example = "Ada Lovelace")]
    pub customer_name: String,
    #[serde(default)]
    #[validate(email(message = "customer_email must be a valid email address"))]
    #[schema(example = "ada@example.com")]
    pub customer_email: String,
}

impl CreateOrderRequest {
    pub fn check(&self) -> Result<(), OrderError> {
        self.validate()
            .map_err(|e| OrderError::Validation(e.to_string()))?;
        if self.customer_name.trim().is_empty() {
            return Err(OrderError::Validation(
                "customer_name is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of deleting an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeletedOrder {
    pub deleted: bool,
    /// Units returned to the product's stock
    #[schema(example = 3)]
    pub restored_stock: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(quantity: i64) -> CreateOrderRequest {
        CreateOrderRequest {
            product_id: 1,
            quantity,
            customer_name: "Ada".to_string(),
            customer_email: "ada@example.com".to_string(),
        }
    }

    #[test]
    fn test_quantity_must_be_positive() {
        assert!(request(1).check().is_ok());
        assert!(matches!(request(0).check(), Err(OrderError::Validation(_))));
        assert!(matches!(request(-4).check(), Err(OrderError::Validation(_))));
    }

    #[test]
    fn test_customer_fields_required() {
        let mut r = request(1);
        r.customer_name = "  ".to_string();
        assert!(r.check().is_err());

        let mut r = request(1);
        r.customer_email = "not-an-email".to_string();
        assert!(r.check().is_err());

        let parsed: CreateOrderRequest =
            serde_json::from_str(r#"{"product_id": 1, "quantity": 2}"#).unwrap();
        assert!(parsed.check().is_err());
    }
}
