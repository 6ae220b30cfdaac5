use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use tally_api::{router, AppState};
use tally_db::{Database, DbConfig};

/// Router backed by a fresh in-memory database.
pub struct TestApp {
    router: Router,
    pub db: Database,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = Database::new(DbConfig::in_memory())
            .await
            .expect("failed to create test database");

        TestApp {
            router: router(AppState::new(db.clone())),
            db,
        }
    }

    /// Sends a request and returns the status with the decoded JSON body
    /// (`Value::Null` for an empty body).
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
            }
            None => Body::empty(),
        };

        let request = builder.body(body).expect("failed to build request");
        self.send(request).await
    }

    /// Sends a raw request.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("failed to read response body")
            .to_bytes();

        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body is not JSON")
        };

        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    /// Row count of `table`.
    pub async fn count(&self, table: &str) -> i64 {
        let sql = format!("SELECT COUNT(*) FROM {table}");
        sqlx::query_scalar(&sql)
            .fetch_one(self.db.pool())
            .await
            .expect("count query failed")
    }
}
