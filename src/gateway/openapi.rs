//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:3000/docs`
//! - OpenAPI JSON: `http://localhost:3000/api-docs/openapi.json`

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::account::{Role, User};
use crate::catalog::{Product, ProductInput};
use crate::gateway::handlers::HealthResponse;
use crate::orders::{CreateOrderRequest, DeletedOrder, OrderDetails};
use crate::reports::{DashboardSummary, ProductSales};
use crate::user_auth::{AuthResponse, LoginRequest, RegisterRequest};

/// Bearer JWT issued by /login and /register
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_jwt",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Token from POST /login or POST /register: Authorization: Bearer <token>",
                        ))
                        .build(),
                ),
            );
        }
    }
}

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront Admin API",
        version = "1.0.0",
        description = "Products, orders and users for the storefront administration panel.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health::health_check,
        crate::user_auth::handlers::login,
        crate::user_auth::handlers::register,
        crate::gateway::handlers::products::list_products,
        crate::gateway::handlers::products::create_product,
        crate::gateway::handlers::products::update_product,
        crate::gateway::handlers::products::delete_product,
        crate::gateway::handlers::orders::list_orders,
        crate::gateway::handlers::orders::create_order,
        crate::gateway::handlers::orders::delete_order,
        crate::gateway::handlers::reports::dashboard_summary,
        crate::gateway::handlers::reports::sales_charts,
        crate::gateway::handlers::users::list_users,
    ),
    components(
        schemas(
            HealthResponse,
            LoginRequest,
            RegisterRequest,
            AuthResponse,
            User,
            Role,
            Product,
            ProductInput,
            OrderDetails,
            CreateOrderRequest,
            DeletedOrder,
            DashboardSummary,
            ProductSales,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Login and registration"),
        (name = "Products", description = "Product catalog"),
        (name = "Orders", description = "Order placement and cancellation"),
        (name = "Reports", description = "Dashboard and sales aggregates"),
        (name = "Users", description = "User listing"),
        (name = "System", description = "Health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::OpenApi;

    #[test]
    fn test_openapi_spec_generates() {
        let spec = ApiDoc::openapi();
        assert_eq!(spec.info.title, "Storefront Admin API");
        assert!(spec.to_json().is_ok());
    }

    #[test]
    fn test_all_endpoints_registered() {
        let paths = ApiDoc::openapi().paths.paths;
        for path in [
            "/health",
            "/login",
            "/register",
            "/products",
            "/products/{id}",
            "/orders",
            "/orders/{id}",
            "/dashboard-summary",
            "/sales-charts",
            "/users",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn test_security_scheme_registered() {
        let components = ApiDoc::openapi().components.expect("should have components");
        assert!(components.security_schemes.contains_key("bearer_jwt"));
    }
}
