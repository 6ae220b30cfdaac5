mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::{json, Value};

use common::TestApp;

/// Creates one cashier and two products; returns `(cashier_id, [product_ids])`.
async fn seed(app: &TestApp) -> (i64, [i64; 2]) {
    let (_, cashier) = app.post("/api/cashiers", json!({ "name": "Ana" })).await;
    let (_, kopi) = app
        .post(
            "/api/products",
            json!({ "name": "Kopi", "unit_price": 1000, "code": "K-01" }),
        )
        .await;
    let (_, roti) = app
        .post(
            "/api/products",
            json!({ "name": "Roti", "unit_price": 2500, "code": "R-01" }),
        )
        .await;

    (
        cashier["id"].as_i64().unwrap(),
        [kopi["id"].as_i64().unwrap(), roti["id"].as_i64().unwrap()],
    )
}

fn only_error(body: &Value) -> &str {
    let object = body.as_object().expect("error body is an object");
    assert_eq!(object.len(), 1, "error body has extra keys: {body}");
    object["error"].as_str().expect("error is a string")
}

#[tokio::test]
async fn health_reports_database_and_migrations() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["message"], "Database connected");
    assert_eq!(body["migrations"]["applied"], body["migrations"]["total"]);
}

#[tokio::test]
async fn health_fails_when_pool_is_closed() {
    let app = TestApp::new().await;
    app.db.close().await;

    let (status, body) = app.get("/api/health").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(only_error(&body), "Database connection failed");
}

#[tokio::test]
async fn create_cashier_returns_201_with_id() {
    let app = TestApp::new().await;

    let (status, body) = app.post("/api/cashiers", json!({ "name": "Budi" })).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Budi");
    assert!(body["id"].as_i64().is_some());

    let (status, list) = app.get("/api/cashiers").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([body]));
}

#[tokio::test]
async fn create_cashier_without_name_is_rejected() {
    let app = TestApp::new().await;

    let (status, body) = app.post("/api/cashiers", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(only_error(&body), "name is required");
    assert_eq!(app.count("cashiers").await, 0);
}

#[tokio::test]
async fn create_product_requires_every_field() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post("/api/products", json!({ "name": "Kopi", "code": "K-01" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(only_error(&body), "unit_price is required");

    let (status, body) = app
        .post(
            "/api/products",
            json!({ "name": "Kopi", "unit_price": 1000, "code": "K-01" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["unit_price"], 1000);
    assert_eq!(body["code"], "K-01");
    assert_eq!(app.count("products").await, 1);
}

#[tokio::test]
async fn malformed_json_is_a_json_400() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/cashiers")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!only_error(&body).is_empty());
}

#[tokio::test]
async fn create_transaction_returns_joined_detail() {
    let app = TestApp::new().await;
    let (cashier_id, [kopi, _]) = seed(&app).await;

    let (status, body) = app
        .post(
            "/api/transactions",
            json!({
                "sales_number": "INV-001",
                "cashier_id": cashier_id,
                "customer_name": "Siti",
                "customer_phone": "0812",
                "subtotal": 2000,
                "discount": 200,
                "total": 1800,
                "cart": [
                    { "product_id": kopi, "quantity": 2, "unit_price": 1000, "discount_percentage": 10 }
                ]
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    let transaction = &body["transaction"];
    assert_eq!(transaction["sales_number"], "INV-001");
    assert_eq!(transaction["cashier_name"], "Ana");
    assert_eq!(transaction["customer_name"], "Siti");
    assert_eq!(transaction["total_amount"], 1800);

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 2);
    assert_eq!(items[0]["unit_price"], 1000);
    assert_eq!(items[0]["discount_percentage"], 10.0);
    assert_eq!(items[0]["subtotal"], 2000);
    assert_eq!(items[0]["product_name"], "Kopi");

    let id = transaction["id"].as_i64().unwrap();
    let (status, fetched) = app.get(&format!("/api/transactions/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, body);
}

#[tokio::test]
async fn transaction_without_cart_is_rejected() {
    let app = TestApp::new().await;
    let (cashier_id, _) = seed(&app).await;

    let (status, body) = app
        .post(
            "/api/transactions",
            json!({ "sales_number": "INV-002", "cashier_id": cashier_id, "customer_name": "Siti" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(only_error(&body), "cart is required");

    let (status, body) = app
        .post(
            "/api/transactions",
            json!({ "sales_number": "INV-002", "cashier_id": cashier_id, "customer_name": "Siti", "cart": [] }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(only_error(&body), "cart must contain at least one item");
    assert_eq!(app.count("transactions").await, 0);
}

#[tokio::test]
async fn unrepresentable_amounts_are_rejected() {
    let app = TestApp::new().await;
    let (cashier_id, [kopi, _]) = seed(&app).await;

    let (status, body) = app
        .post(
            "/api/transactions",
            json!({
                "sales_number": "INV-004",
                "cashier_id": cashier_id,
                "customer_name": "Siti",
                "discount": 5000,
                "cart": [{ "product_id": kopi, "quantity": 1, "unit_price": 1000 }]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        only_error(&body),
        format!("total must be between 0 and {}", i64::MAX)
    );

    let (status, body) = app
        .post(
            "/api/transactions",
            json!({
                "sales_number": "INV-005",
                "cashier_id": cashier_id,
                "customer_name": "Siti",
                "cart": [{ "product_id": kopi, "quantity": 1, "unit_price": 1000, "discount_percentage": 12.345 }]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        only_error(&body),
        "cart[0].discount_percentage must have at most 2 decimal places"
    );
    assert_eq!(app.count("transactions").await, 0);
}

#[tokio::test]
async fn failed_transaction_leaves_nothing_behind() {
    let app = TestApp::new().await;
    let (cashier_id, [kopi, roti]) = seed(&app).await;

    let (status, body) = app
        .post(
            "/api/transactions",
            json!({
                "sales_number": "INV-003",
                "cashier_id": cashier_id,
                "customer_name": "Siti",
                "customer_phone": "0812",
                "cart": [
                    { "product_id": kopi, "quantity": 1, "unit_price": 1000 },
                    { "product_id": 9999, "quantity": 1, "unit_price": 1000 },
                    { "product_id": roti, "quantity": 1, "unit_price": 2500 }
                ]
            }),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(only_error(&body), "Internal server error");
    assert_eq!(app.count("transactions").await, 0);
    assert_eq!(app.count("transaction_items").await, 0);
    assert_eq!(app.count("customers").await, 0);
}

#[tokio::test]
async fn walk_in_transactions_are_listed_newest_first() {
    let app = TestApp::new().await;
    let (cashier_id, [kopi, roti]) = seed(&app).await;

    for (sales_number, product) in [("INV-010", kopi), ("INV-011", roti)] {
        let (status, _) = app
            .post(
                "/api/transactions",
                json!({
                    "sales_number": sales_number,
                    "cashier_id": cashier_id,
                    "customer_name": "Anyone",
                    "cart": [{ "product_id": product, "quantity": 1, "unit_price": 1000 }]
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, list) = app.get("/api/transactions").await;
    assert_eq!(status, StatusCode::OK);

    let rows = list.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["sales_number"], "INV-011");
    assert_eq!(rows[1]["sales_number"], "INV-010");
    assert!(rows[0]["customer_id"].is_null());
    assert_eq!(rows[0]["customer_name"], "Walk-in Customer");

    let (_, customers) = app.get("/api/customers").await;
    assert_eq!(customers, json!([]));
}

#[tokio::test]
async fn missing_transaction_is_404() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/transactions/4242").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(only_error(&body), "Transaction not found");

    let (status, body) = app.get("/api/transactions/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    only_error(&body);
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(only_error(&body), "Not found");
}
