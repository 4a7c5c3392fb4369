#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use tenantry::router::init_router;
use tenantry::state::AppState;
use tenantry_auth::{Identity, issue_token};
use tenantry_config::{CorsConfig, JwtConfig};
use tenantry_db::{MemoryStore, UserStore};
use tenantry_models::NewUser;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret-key";
pub const TOKEN_HEADER: &str = "x-auth-token";

pub struct TestApp {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(
            store.clone(),
            JwtConfig::new(TEST_SECRET, 3600),
            CorsConfig::default(),
        )
        .unwrap();

        Self { state, store }
    }

    pub fn router(&self) -> Router {
        init_router(self.state.clone())
    }

    /// Stores a user and returns its id.
    pub async fn create_user(&self, email: &str, role: &str) -> String {
        self.store
            .insert_user(NewUser {
                name: "Test User".to_string(),
                email: email.to_string(),
                role: role.to_string(),
            })
            .await
            .unwrap()
            .id
            .to_string()
    }

    pub fn token(&self, user_id: &str, role: &str) -> String {
        self.token_at(user_id, role, Utc::now())
    }

    pub fn token_at(&self, user_id: &str, role: &str, issued_at: DateTime<Utc>) -> String {
        issue_token(
            &Identity::new(user_id, role),
            issued_at,
            self.state.jwt_config(),
        )
        .unwrap()
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn msg(&self) -> &str {
        self.body["msg"].as_str().unwrap_or_default()
    }

    pub fn rotated_token(&self) -> Option<&str> {
        self.headers
            .get(TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
    }
}

pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(TOKEN_HEADER, token);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(TOKEN_HEADER, token);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn acme_account() -> Value {
    serde_json::json!({
        "companyName": "Acme",
        "adminName": "Jo",
        "adminEmail": "jo@acme.com",
        "adminContactNo": 555,
        "features": ["x"]
    })
}
