//! Integration test harness for Clementine.
//!
//! Builds the full application router against an in-memory `SQLite` database
//! and drives it in-process with `tower::ServiceExt::oneshot` - no running
//! server or external database required.
//!
//! # Example
//!
//! ```rust,ignore
//! let app = TestApp::spawn().await;
//! let (status, body) = app.post_json("/signup", None, json!({ ... })).await;
//! assert_eq!(status, StatusCode::CREATED);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use clementine_api::config::ClementineConfig;
use clementine_api::state::AppState;
use clementine_core::Role;

/// Maximum response body size tests will read.
const BODY_LIMIT: usize = 1024 * 1024;

/// Multipart boundary used by the body builder.
const BOUNDARY: &str = "clementine-test-boundary";

/// A fully wired application over an in-memory database.
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    // Holds the temporary upload directory until the test is done.
    upload_dir: tempfile::TempDir,
}

impl TestApp {
    /// Build a fresh application: new in-memory database, migrated schema,
    /// temporary upload directory.
    pub async fn spawn() -> Self {
        let upload_dir = tempfile::tempdir().expect("create temp upload dir");

        let config = ClementineConfig {
            database_url: secrecy::SecretString::from("sqlite::memory:"),
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            base_url: "http://testserver".to_string(),
            jwt_secret: secrecy::SecretString::from("kX9mP2vQ7wR4zT6yU8aB3cD5eF1gH0jL"),
            token_ttl_hours: 24,
            upload_dir: upload_dir.path().to_path_buf(),
        };

        // A single connection keeps every query on the same in-memory
        // database; timeouts are disabled so it is never dropped mid-test.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("connect to in-memory sqlite");

        clementine_api::db::MIGRATOR
            .run(&pool)
            .await
            .expect("run migrations");

        let state = AppState::new(config, pool.clone());
        let router = clementine_api::app(state);

        Self {
            router,
            pool,
            upload_dir,
        }
    }

    /// Filesystem path of the temporary upload directory.
    #[must_use]
    pub fn upload_path(&self) -> &std::path::Path {
        self.upload_dir.path()
    }

    /// Send a request and return status plus parsed JSON body (or `Null` for
    /// non-JSON bodies).
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    /// Send a multipart request with text fields and an optional file part.
    pub async fn request_multipart(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        fields: &[(&str, &str)],
        file: Option<(&str, &str, &[u8])>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri).header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = builder
            .body(Body::from(multipart_body(fields, file)))
            .unwrap();

        self.send(request).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request("GET", uri, token, None).await
    }

    pub async fn post_json(
        &self,
        uri: &str,
        token: Option<&str>,
        body: Value,
    ) -> (StatusCode, Value) {
        self.request("POST", uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request("PUT", uri, token, None).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request("DELETE", uri, token, None).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router never fails");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), BODY_LIMIT)
            .await
            .expect("read response body");
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, json)
    }

    // =========================================================================
    // Domain helpers
    // =========================================================================

    /// Sign up an account and assert success.
    pub async fn signup(&self, email: &str, password: &str) {
        let (status, _) = self
            .post_json(
                "/signup",
                None,
                serde_json::json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "signup failed for {email}");
    }

    /// Log in and return the bearer token.
    pub async fn login_token(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .post_json(
                "/login",
                None,
                serde_json::json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed for {email}");
        body["access_token"].as_str().unwrap().to_string()
    }

    /// Sign up an account, promote it to admin directly in the database, and
    /// return a bearer token for it.
    pub async fn admin_token(&self, email: &str, password: &str) -> String {
        self.signup(email, password).await;
        clementine_api::db::users::UserRepository::new(&self.pool)
            .set_role(email, Role::Admin)
            .await
            .expect("promote to admin");
        self.login_token(email, password).await
    }

    /// Create a product through the API and return its ID.
    pub async fn add_product(&self, name: &str, price: i64) -> i64 {
        let (status, body) = self
            .request_multipart(
                "POST",
                "/product/add",
                None,
                &[("product_name", name), ("product_price", &price.to_string())],
                None,
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "add_product failed for {name}");
        body["id"].as_i64().unwrap()
    }

    /// Count rows of a table directly in the database.
    pub async fn count_rows(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pool)
            .await
            .expect("count query")
    }
}

/// Build a `multipart/form-data` body with the shared boundary.
#[must_use]
pub fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    if let Some((name, file_name, bytes)) = file {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
