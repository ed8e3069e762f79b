//! Product catalog tests.

use axum::http::StatusCode;

use clementine_integration_tests::TestApp;

#[tokio::test]
async fn add_product_validates_required_fields() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .request_multipart("POST", "/product/add", None, &[("product_name", "Mug")], None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Product name and price are required");

    let (status, _) = app
        .request_multipart(
            "POST",
            "/product/add",
            None,
            &[("product_price", "100")],
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(app.count_rows("products").await, 0);
}

#[tokio::test]
async fn add_product_rejects_non_numeric_price() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .request_multipart(
            "POST",
            "/product/add",
            None,
            &[("product_name", "Mug"), ("product_price", "cheap")],
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "product_price must be an integer");
    assert_eq!(app.count_rows("products").await, 0);
}

#[tokio::test]
async fn add_product_rejects_duplicate_name() {
    let app = TestApp::spawn().await;
    app.add_product("Mug", 100).await;

    let (status, _) = app
        .request_multipart(
            "POST",
            "/product/add",
            None,
            &[("product_name", "Mug"), ("product_price", "200")],
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(app.count_rows("products").await, 1);
}

#[tokio::test]
async fn get_product_returns_entry_or_404() {
    let app = TestApp::spawn().await;
    let id = app.add_product("Mug", 100).await;

    let (status, body) = app.get(&format!("/product/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);
    assert_eq!(body["product_name"], "Mug");
    assert_eq!(body["product_price"], 100);
    assert!(body["product_image"].is_null());

    // Timestamp is rendered as `YYYY-MM-DD HH:MM:SS`
    let created_at = body["created_at"].as_str().expect("created_at is a string");
    assert_eq!(created_at.len(), 19);
    assert_eq!(&created_at[4..5], "-");
    assert_eq!(&created_at[10..11], " ");
    assert_eq!(&created_at[13..14], ":");

    let (status, body) = app.get("/product/9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found");
}

#[tokio::test]
async fn list_products_returns_full_catalog() {
    let app = TestApp::spawn().await;
    app.add_product("Mug", 100).await;
    app.add_product("Teapot", 250).await;

    let (status, body) = app.get("/product", None).await;
    assert_eq!(status, StatusCode::OK);
    let products = body.as_array().expect("list body is an array");
    assert_eq!(products.len(), 2);
    assert_eq!(products[0]["product_name"], "Mug");
    assert_eq!(products[1]["product_name"], "Teapot");
}

#[tokio::test]
async fn update_product_applies_partial_fields() {
    let app = TestApp::spawn().await;
    let id = app.add_product("Mug", 100).await;

    let (status, body) = app
        .request_multipart(
            "PUT",
            &format!("/product/update/{id}"),
            None,
            &[("product_price", "150")],
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product updated successfully");

    let (_, body) = app.get(&format!("/product/{id}"), None).await;
    assert_eq!(body["product_name"], "Mug");
    assert_eq!(body["product_price"], 150);

    let (status, body) = app
        .request_multipart("PUT", "/product/update/9999", None, &[], None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found");
}

#[tokio::test]
async fn product_image_upload_replaces_and_deletes_old_file() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .request_multipart(
            "POST",
            "/product/add",
            None,
            &[("product_name", "Mug"), ("product_price", "100")],
            Some(("product_image", "mug-v1.png", b"first")),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().expect("add returns id");
    assert!(app.upload_path().join("mug-v1.png").exists());

    let (_, body) = app.get(&format!("/product/{id}"), None).await;
    assert_eq!(
        body["product_image"],
        "http://testserver/static/uploads/mug-v1.png"
    );

    let (status, _) = app
        .request_multipart(
            "PUT",
            &format!("/product/update/{id}"),
            None,
            &[],
            Some(("product_image", "mug-v2.png", b"second")),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    assert!(!app.upload_path().join("mug-v1.png").exists());
    assert!(app.upload_path().join("mug-v2.png").exists());
}

#[tokio::test]
async fn delete_product_removes_row_or_404() {
    let app = TestApp::spawn().await;
    let id = app.add_product("Mug", 100).await;

    let (status, body) = app.delete(&format!("/product/delete/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product deleted successfully");

    let (status, _) = app.get(&format!("/product/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.delete(&format!("/product/delete/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found");
}
