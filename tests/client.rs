//! AdminClient against a live server on a loopback port.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use storefront_admin::account::{AccessTier, Role};
use storefront_admin::catalog::ProductInput;
use storefront_admin::client::{AdminClient, ClientError, RetryPolicy};
use storefront_admin::db::Database;
use storefront_admin::gateway::{build_router, state::AppState};
use storefront_admin::orders::CreateOrderRequest;
use storefront_admin::user_auth::{RegisterRequest, UserAuthService};

async fn spawn_server() -> AdminClient {
    let db = Arc::new(Database::in_memory().await.unwrap());
    let auth = Arc::new(UserAuthService::new(
        db.pool().clone(),
        "client-test-secret".to_string(),
        24,
    ));
    auth.seed_default_users().await.unwrap();
    let app = build_router(Arc::new(AppState::new(db, auth)));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let http = reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap();
    AdminClient::with_http_client(http, format!("http://{addr}")).with_retry_policy(RetryPolicy {
        max_retries: 1,
        delay: Duration::from_millis(10),
    })
}

fn keyboard(stock: i64) -> ProductInput {
    ProductInput {
        name: "Keyboard".to_string(),
        price: 100.0,
        stock,
        category: "Electronics".to_string(),
    }
}

fn order_for(product_id: i64, quantity: i64) -> CreateOrderRequest {
    CreateOrderRequest {
        product_id,
        quantity,
        customer_name: "Ada Lovelace".to_string(),
        customer_email: "ada@example.com".to_string(),
    }
}

#[tokio::test]
async fn admin_session_end_to_end() {
    let client = spawn_server().await;

    let health = client.health().await.unwrap();
    assert_eq!(health.status, "OK");

    let admin = client.login("admin", "admin123").await.unwrap();
    assert_eq!(admin.role(), Role::Admin);
    assert!(admin.can(AccessTier::Admin));

    let product = client.create_product(&admin, &keyboard(5)).await.unwrap();
    let placed = client
        .create_order(&admin, &order_for(product.id, 3))
        .await
        .unwrap();
    assert_eq!(placed.total_price, 300.0);

    let err = client
        .create_order(&admin, &order_for(product.id, 3))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.code(), Some(1002));

    let products = client.list_products().await.unwrap();
    assert_eq!(products[0].stock, 2);

    let summary = client.dashboard_summary().await.unwrap();
    assert_eq!(summary.order_count, 1);
    let sales = client.sales_charts(&admin).await.unwrap();
    assert_eq!(sales[0].total_quantity, 3);

    let removed = client.delete_order(&admin, placed.id).await.unwrap();
    assert_eq!(removed.restored_stock, 3);
    assert!(client.list_orders(&admin).await.unwrap().is_empty());

    let updated = client
        .update_product(&admin, product.id, &keyboard(150))
        .await
        .unwrap();
    assert_eq!(updated.stock, 150);

    client.delete_product(&admin, product.id).await.unwrap();
    assert!(client.list_products().await.unwrap().is_empty());

    assert_eq!(client.list_users(&admin).await.unwrap().len(), 2);
}

#[tokio::test]
async fn session_role_limits_what_server_accepts() {
    let client = spawn_server().await;

    let editor = client.login("editor", "editor123").await.unwrap();
    assert!(editor.can(AccessTier::Editor));
    assert!(!editor.can(AccessTier::Admin));

    let product = client.create_product(&editor, &keyboard(5)).await.unwrap();
    let err = client.delete_product(&editor, product.id).await.unwrap_err();
    assert_eq!(err.status(), Some(403));

    let user = client
        .register(&RegisterRequest {
            username: "carol".to_string(),
            email: "carol@example.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(user.role(), Role::User);
    let err = client.list_orders(&user).await.unwrap_err();
    assert_eq!(err.status(), Some(403));
}

#[tokio::test]
async fn login_failures_surface_as_api_errors() {
    let client = spawn_server().await;

    match client.login("admin", "wrong").await {
        Err(ClientError::Api { status, .. }) => assert_eq!(status, 401),
        other => panic!("unexpected: {other:?}"),
    }
    match client.login("ghost", "whatever").await {
        Err(ClientError::Api { status, code, .. }) => {
            assert_eq!(status, 404);
            assert_eq!(code, 4004);
        }
        other => panic!("unexpected: {other:?}"),
    }
}
