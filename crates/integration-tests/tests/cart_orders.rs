//! Cart and order placement tests.
//!
//! Order placement carries the one real atomicity contract in the system:
//! the order insert and the cart clear must both happen or neither.

use axum::http::StatusCode;
use serde_json::json;

use clementine_integration_tests::TestApp;

async fn customer(app: &TestApp) -> String {
    app.signup("shopper@example.com", "correct-horse").await;
    app.login_token("shopper@example.com", "correct-horse").await
}

#[tokio::test]
async fn cart_routes_require_authentication() {
    let app = TestApp::spawn().await;

    let (status, _) = app.get("/cart", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .post_json("/cart/add", None, json!({ "product_id": 1 }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get("/cart", Some("not-a-real-token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn add_to_cart_validates_payload_and_product() {
    let app = TestApp::spawn().await;
    let token = customer(&app).await;

    let (status, body) = app
        .post_json("/cart/add", Some(&token), json!({ "quantity": 2 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Product ID is required");

    let (status, body) = app
        .post_json("/cart/add", Some(&token), json!({ "product_id": 9999 }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found");
}

#[tokio::test]
async fn add_to_cart_defaults_quantity_to_one() {
    let app = TestApp::spawn().await;
    let token = customer(&app).await;
    let mug = app.add_product("Mug", 100).await;

    let (status, body) = app
        .post_json("/cart/add", Some(&token), json!({ "product_id": mug }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Product added to cart successfully");

    let (_, cart) = app.get("/cart", Some(&token)).await;
    assert_eq!(cart["cart"][0]["quantity"], 1);
}

#[tokio::test]
async fn repeated_add_overwrites_quantity_instead_of_accumulating() {
    let app = TestApp::spawn().await;
    let token = customer(&app).await;
    let mug = app.add_product("Mug", 100).await;

    app.post_json(
        "/cart/add",
        Some(&token),
        json!({ "product_id": mug, "quantity": 2 }),
    )
    .await;
    app.post_json(
        "/cart/add",
        Some(&token),
        json!({ "product_id": mug, "quantity": 5 }),
    )
    .await;

    assert_eq!(app.count_rows("cart_lines").await, 1);

    let (_, cart) = app.get("/cart", Some(&token)).await;
    let lines = cart["cart"].as_array().expect("cart is an array");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["quantity"], 5);
}

#[tokio::test]
async fn get_cart_computes_line_and_grand_totals() {
    let app = TestApp::spawn().await;
    let token = customer(&app).await;
    let mug = app.add_product("Mug", 10).await;
    let teapot = app.add_product("Teapot", 5).await;

    let (_, empty) = app.get("/cart", Some(&token)).await;
    assert_eq!(empty["message"], "Cart is empty");

    app.post_json(
        "/cart/add",
        Some(&token),
        json!({ "product_id": mug, "quantity": 2 }),
    )
    .await;
    app.post_json(
        "/cart/add",
        Some(&token),
        json!({ "product_id": teapot, "quantity": 1 }),
    )
    .await;

    let (status, cart) = app.get("/cart", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let lines = cart["cart"].as_array().expect("cart is an array");
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["product_name"], "Mug");
    assert_eq!(lines[0]["total"], 20);
    assert_eq!(lines[1]["total"], 5);
    assert_eq!(cart["grand_total"], 25);
}

#[tokio::test]
async fn place_order_totals_snapshot_and_clears_cart() {
    let app = TestApp::spawn().await;
    let token = customer(&app).await;
    let mug = app.add_product("Mug", 10).await;
    let teapot = app.add_product("Teapot", 5).await;

    app.post_json(
        "/cart/add",
        Some(&token),
        json!({ "product_id": mug, "quantity": 2 }),
    )
    .await;
    app.post_json(
        "/cart/add",
        Some(&token),
        json!({ "product_id": teapot, "quantity": 1 }),
    )
    .await;

    let (status, body) = app.request("POST", "/order", Some(&token), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Order placed successfully");
    assert_eq!(body["order"]["total_price"], 25);
    assert_eq!(body["order"]["payment_status"], "Pending");
    assert_eq!(body["order"]["cart_items"].as_array().map(Vec::len), Some(2));

    // The cart is cleared in the same transaction
    assert_eq!(app.count_rows("cart_lines").await, 0);
    let (_, cart) = app.get("/cart", Some(&token)).await;
    assert_eq!(cart["message"], "Cart is empty");
}

#[tokio::test]
async fn order_snapshot_is_immune_to_later_product_edits() {
    let app = TestApp::spawn().await;
    let token = customer(&app).await;
    let mug = app.add_product("Mug", 10).await;

    app.post_json(
        "/cart/add",
        Some(&token),
        json!({ "product_id": mug, "quantity": 2 }),
    )
    .await;
    app.request("POST", "/order", Some(&token), None).await;

    // Edit the product price, then delete it entirely
    let (status, _) = app
        .request_multipart(
            "PUT",
            &format!("/product/update/{mug}"),
            None,
            &[("product_price", "9999")],
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    app.delete(&format!("/product/delete/{mug}"), None).await;

    let (status, orders) = app.get("/order", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let orders = orders.as_array().expect("orders is an array");
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["total_price"], 20);
    assert_eq!(orders[0]["items"][0]["product_price"], 10);
    assert_eq!(orders[0]["items"][0]["product_name"], "Mug");
}

#[tokio::test]
async fn place_order_with_empty_cart_creates_nothing() {
    let app = TestApp::spawn().await;
    let token = customer(&app).await;

    let (status, body) = app.request("POST", "/order", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Cart is empty");
    assert_eq!(app.count_rows("orders").await, 0);
}

#[tokio::test]
async fn get_orders_includes_owner_fields() {
    let app = TestApp::spawn().await;
    let token = customer(&app).await;

    let (status, body) = app.get("/order", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "No Order Found Have One Please.");

    // Give the owner a name and address, then place an order
    let (_, users) = app.get("/users", None).await;
    let id = users[0]["id"].as_i64().expect("user id");
    app.request_multipart(
        "PUT",
        &format!("/user/{id}"),
        None,
        &[("full_name", "Shopper One"), ("address", "7 Cart Lane")],
        None,
    )
    .await;

    let mug = app.add_product("Mug", 10).await;
    app.post_json("/cart/add", Some(&token), json!({ "product_id": mug }))
        .await;
    app.request("POST", "/order", Some(&token), None).await;

    let (_, orders) = app.get("/order", Some(&token)).await;
    let orders = orders.as_array().expect("orders is an array");
    assert_eq!(orders[0]["full_name"], "Shopper One");
    assert_eq!(orders[0]["address"], "7 Cart Lane");
    assert_eq!(orders[0]["payment_status"], "Pending");
}

#[tokio::test]
async fn update_order_status_sets_success() {
    let app = TestApp::spawn().await;
    let token = customer(&app).await;
    let mug = app.add_product("Mug", 10).await;
    app.post_json("/cart/add", Some(&token), json!({ "product_id": mug }))
        .await;
    let (_, body) = app.request("POST", "/order", Some(&token), None).await;
    let order_id = body["order"]["order_id"].as_i64().expect("order id");

    let (status, body) = app
        .put(&format!("/order/status/{order_id}"), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Order status updated");

    let (_, orders) = app.get("/order", Some(&token)).await;
    assert_eq!(orders[0]["payment_status"], "success");

    let (status, body) = app.put("/order/status/9999", Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Order not found");
}

#[tokio::test]
async fn deleted_product_leaves_cart_reads_working() {
    let app = TestApp::spawn().await;
    let token = customer(&app).await;
    let mug = app.add_product("Mug", 10).await;
    let teapot = app.add_product("Teapot", 5).await;

    app.post_json(
        "/cart/add",
        Some(&token),
        json!({ "product_id": mug, "quantity": 3 }),
    )
    .await;
    app.post_json(
        "/cart/add",
        Some(&token),
        json!({ "product_id": teapot, "quantity": 1 }),
    )
    .await;

    // Deleting a carted product does not throw and leaves the line behind
    let (status, _) = app.delete(&format!("/product/delete/{mug}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.count_rows("cart_lines").await, 2);

    // Cart reads omit the dangling line
    let (status, cart) = app.get("/cart", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let lines = cart["cart"].as_array().expect("cart is an array");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["product_name"], "Teapot");
    assert_eq!(cart["grand_total"], 5);

    // Order placement skips the dangling line too
    let (status, body) = app.request("POST", "/order", Some(&token), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["order"]["total_price"], 5);
    assert_eq!(body["order"]["cart_items"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn cart_of_only_dangling_lines_still_orders_empty_snapshot() {
    let app = TestApp::spawn().await;
    let token = customer(&app).await;
    let mug = app.add_product("Mug", 10).await;

    app.post_json("/cart/add", Some(&token), json!({ "product_id": mug }))
        .await;
    app.delete(&format!("/product/delete/{mug}"), None).await;

    // The cart still holds a raw line, so placement proceeds with an empty
    // snapshot and zero total, and the cart is cleared.
    let (status, body) = app.request("POST", "/order", Some(&token), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["order"]["total_price"], 0);
    assert_eq!(body["order"]["cart_items"].as_array().map(Vec::len), Some(0));
    assert_eq!(app.count_rows("cart_lines").await, 0);
}
