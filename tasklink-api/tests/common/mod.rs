/// Common test utilities for integration tests
///
/// Every test gets its own migrated in-memory database and a router built on
/// top of it, so tests are independent and need no external services.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use sqlx::SqlitePool;
use tasklink_api::app::{build_router, AppState};
use tasklink_api::config::Config;
use tasklink_shared::db::migrations::run_migrations;
use tasklink_shared::db::pool::{create_pool, DatabaseConfig};
use tower::ServiceExt;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: SqlitePool,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a new test context with a fresh database
    pub async fn new() -> anyhow::Result<Self> {
        Self::with_database(DatabaseConfig::in_memory()).await
    }

    /// Creates a test context over the given database
    pub async fn with_database(config: DatabaseConfig) -> anyhow::Result<Self> {
        let db = create_pool(config).await?;
        run_migrations(&db).await?;

        let app = build_router(AppState::new(db.clone(), Config::default()));

        Ok(TestContext { db, app })
    }

    /// Sends a request with an optional JSON body and returns status and parsed body
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        self.send_request(request).await
    }

    /// Sends a prebuilt request
    ///
    /// JSON bodies are parsed; any other body (error messages are plain text)
    /// comes back as a `Value::String` holding the raw text.
    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let (status, content_type, text) = self.send_raw(request).await;

        let body = if text.is_empty() {
            Value::Null
        } else if content_type.starts_with("application/json") {
            serde_json::from_str(&text)
                .unwrap_or_else(|_| panic!("Expected JSON body, got {}: {}", status, text))
        } else {
            Value::String(text)
        };

        (status, body)
    }

    /// Sends a prebuilt request and returns status, content type and raw body
    pub async fn send_raw(&self, request: Request<Body>) -> (StatusCode, String, String) {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Router should not fail");

        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");

        (status, content_type, String::from_utf8_lossy(&bytes).into_owned())
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send("GET", uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send("PUT", uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send("DELETE", uri, None).await
    }

    /// Creates a user through the API, panicking on failure
    pub async fn create_user(&self, id: &str, name: &str, email: &str) -> Value {
        let (status, body) = self
            .post(
                "/users",
                serde_json::json!({
                    "id": id,
                    "name": name,
                    "email": email,
                    "password": "Abcdef1!"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create_user failed: {}", body);
        body
    }

    /// Creates a task through the API, panicking on failure
    pub async fn create_task(&self, id: &str, title: &str, description: &str) -> Value {
        let (status, body) = self
            .post(
                "/tasks",
                serde_json::json!({
                    "id": id,
                    "title": title,
                    "description": description
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create_task failed: {}", body);
        body["user"].clone()
    }
}
