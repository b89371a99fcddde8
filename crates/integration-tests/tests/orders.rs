//! Order placement and lookup over HTTP.

#![allow(clippy::unwrap_used)]

use bugstore_core::Price;
use bugstore_integration_tests::{TestContext, body_json};
use reqwest::StatusCode;
use serde_json::json;
use uuid::Uuid;

async fn create_product(ctx: &TestContext, price: &str) -> String {
    let (product, _) = ctx
        .create(
            "/v1/products",
            &json!({
                "title": "Product 1",
                "description": "Test product",
                "slug": "product-1",
                "price": price
            }),
        )
        .await;
    product["id"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn test_create_order() {
    let ctx = TestContext::new().await;
    let product_id = create_product(&ctx, "50.00").await;
    let customer_id = Uuid::new_v4();

    let (body, location) = ctx
        .create(
            "/v1/orders",
            &json!({
                "customerId": customer_id,
                "lines": [{ "productId": product_id, "quantity": 2 }]
            }),
        )
        .await;

    assert_eq!(
        location,
        format!("/v1/orders/{}", body["id"].as_str().unwrap())
    );
    assert_eq!(body["customerId"], customer_id.to_string());
    assert!(body["createdAt"].is_string());
    assert_eq!(
        body["lines"],
        json!([{ "productId": product_id, "quantity": 2 }])
    );
    assert!(body.get("total").is_none());
    assert!(body.get("updatedAt").is_none());

    let stored = ctx.store.orders().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].lines[0].total, Price::from_cents(10_000));
}

#[tokio::test]
async fn test_create_ignores_client_total() {
    let ctx = TestContext::new().await;
    let product_id = create_product(&ctx, "10.00").await;

    ctx.create(
        "/v1/orders",
        &json!({
            "customerId": Uuid::new_v4(),
            "lines": [{ "productId": product_id, "quantity": 3, "total": "1.00" }]
        }),
    )
    .await;

    let stored = ctx.store.orders().await;
    assert_eq!(stored[0].lines[0].total, Price::from_cents(3000));
}

#[tokio::test]
async fn test_create_drops_unknown_products() {
    let ctx = TestContext::new().await;
    let product_id = create_product(&ctx, "5.00").await;

    let (body, _) = ctx
        .create(
            "/v1/orders",
            &json!({
                "customerId": Uuid::new_v4(),
                "lines": [
                    { "productId": Uuid::new_v4(), "quantity": 1 },
                    { "productId": product_id, "quantity": 1 }
                ]
            }),
        )
        .await;

    assert_eq!(
        body["lines"],
        json!([{ "productId": product_id, "quantity": 1 }])
    );
}

#[tokio::test]
async fn test_create_with_no_known_products_still_persists() {
    let ctx = TestContext::new().await;

    let (body, location) = ctx
        .create(
            "/v1/orders",
            &json!({
                "customerId": Uuid::new_v4(),
                "lines": [{ "productId": Uuid::new_v4(), "quantity": 1 }]
            }),
        )
        .await;

    assert_eq!(body["lines"], json!([]));
    assert_eq!(ctx.store.order_count().await, 1);
    assert_eq!(ctx.get(&location).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_get_order() {
    let ctx = TestContext::new().await;
    let product_id = create_product(&ctx, "1000.00").await;

    let (created, location) = ctx
        .create(
            "/v1/orders",
            &json!({
                "customerId": Uuid::new_v4(),
                "lines": [{ "productId": product_id, "quantity": 1 }]
            }),
        )
        .await;

    let resp = ctx.get(&location).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert_eq!(body["id"], created["id"]);
    assert_eq!(body["customerId"], created["customerId"]);
    assert_eq!(body["lines"], created["lines"]);
    assert_eq!(body["createdAt"], body["updatedAt"]);
}

#[tokio::test]
async fn test_get_unknown_order_returns_not_found() {
    let ctx = TestContext::new().await;

    let resp = ctx.get(&format!("/v1/orders/{}", Uuid::new_v4())).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_with_line_total_overflow_is_bad_request() {
    let ctx = TestContext::new().await;
    let product_id = create_product(&ctx, "79228162514264337593543950335").await;

    let resp = ctx
        .client
        .post(ctx.url("/v1/orders"))
        .json(&json!({
            "customerId": Uuid::new_v4(),
            "lines": [{ "productId": product_id, "quantity": 2 }]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(ctx.store.order_count().await, 0);
}

#[tokio::test]
async fn test_create_with_order_total_overflow_stores_nothing() {
    let ctx = TestContext::new().await;
    let product_id = create_product(&ctx, "79228162514264337593543950335").await;

    let resp = ctx
        .client
        .post(ctx.url("/v1/orders"))
        .json(&json!({
            "customerId": Uuid::new_v4(),
            "lines": [
                { "productId": product_id, "quantity": 1 },
                { "productId": product_id, "quantity": 1 }
            ]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(ctx.store.order_count().await, 0);
}
