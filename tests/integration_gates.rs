mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{Router, http::StatusCode, routing};
use chrono::{Duration, Utc};
use common::{TestApp, get, send};
use tenantry::middleware::{Authenticated, Protected};
use tenantry_auth::{Identity, issue_token, verify_token};
use tenantry_config::JwtConfig;
use tenantry_models::roles::{self, RoleSet};

/// Router with one token-only route and one ADMIN route, both counting
/// how often their handler runs.
fn counting_router(app: &TestApp, hits: Arc<AtomicUsize>) -> Router {
    let open_hits = hits.clone();
    let admin_hits = hits;

    Protected::new(&app.state)
        .route(
            "/open",
            routing::get(move |caller: Authenticated| {
                let hits = open_hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    caller.user_id().to_string()
                }
            }),
        )
        .route_with_roles(
            "/admin",
            routing::get(move || {
                let hits = admin_hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    "admin"
                }
            }),
            RoleSet::single(roles::ADMIN),
        )
        .into_router()
        .with_state(app.state.clone())
}

#[tokio::test]
async fn test_missing_token_is_rejected_before_handler() {
    let app = TestApp::new();
    let hits = Arc::new(AtomicUsize::new(0));

    let res = send(counting_router(&app, hits.clone()), get("/open", None)).await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.msg(), "No token, authorization denied");
    assert!(res.rotated_token().is_none());
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_empty_token_is_treated_as_missing() {
    let app = TestApp::new();
    let hits = Arc::new(AtomicUsize::new(0));

    let res = send(counting_router(&app, hits.clone()), get("/open", Some(""))).await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.msg(), "No token, authorization denied");
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let app = TestApp::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let foreign = issue_token(
        &Identity::new("u1", roles::USER),
        Utc::now(),
        &JwtConfig::new("some-other-secret", 3600),
    )
    .unwrap();

    let res = send(counting_router(&app, hits.clone()), get("/open", Some(&foreign))).await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.msg(), "Token is not valid");
    assert!(res.rotated_token().is_none());
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = TestApp::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let expired = app.token_at("u1", roles::USER, Utc::now() - Duration::hours(2));

    let res = send(counting_router(&app, hits.clone()), get("/open", Some(&expired))).await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.msg(), "Token is not valid");
    assert!(res.rotated_token().is_none());
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_malformed_token_is_rejected() {
    let app = TestApp::new();
    let hits = Arc::new(AtomicUsize::new(0));

    let res = send(
        counting_router(&app, hits.clone()),
        get("/open", Some("definitely-not-a-jwt")),
    )
    .await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.msg(), "Token is not valid");
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_valid_token_is_rotated() {
    let app = TestApp::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let issued_at = Utc::now() - Duration::minutes(10);
    let token = app.token_at("u1", roles::USER, issued_at);

    let res = send(counting_router(&app, hits.clone()), get("/open", Some(&token))).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    let rotated = res.rotated_token().expect("rotated token header");
    assert_ne!(rotated, token);

    let claims = verify_token(rotated, app.state.jwt_config()).unwrap();
    assert_eq!(claims.identity(), Identity::new("u1", roles::USER));
    assert!(claims.exp > issued_at.timestamp());
    // Full lifetime from the moment of rotation
    assert!(claims.exp >= Utc::now().timestamp() + 3600 - 5);
}

#[tokio::test]
async fn test_rotated_token_is_accepted_on_next_request() {
    let app = TestApp::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let token = app.token("u1", roles::USER);

    let first = send(counting_router(&app, hits.clone()), get("/open", Some(&token))).await;
    let rotated = first.rotated_token().unwrap().to_string();

    let second = send(counting_router(&app, hits.clone()), get("/open", Some(&rotated))).await;

    assert_eq!(second.status, StatusCode::OK);
    assert!(second.rotated_token().is_some());
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_handler_sees_token_identity() {
    let app = TestApp::new();
    let token = app.token("subject-42", roles::USER);

    let response = {
        use tower::ServiceExt;
        counting_router(&app, Arc::new(AtomicUsize::new(0)))
            .oneshot(get("/open", Some(&token)))
            .await
            .unwrap()
    };
    let bytes = http_body_util::BodyExt::collect(response.into_body())
        .await
        .unwrap()
        .to_bytes();

    assert_eq!(&bytes[..], b"subject-42");
}

#[tokio::test]
async fn test_role_gate_admits_stored_admin() {
    let app = TestApp::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let user_id = app.create_user("admin@example.com", roles::ADMIN).await;
    let token = app.token(&user_id, roles::ADMIN);

    let res = send(counting_router(&app, hits.clone()), get("/admin", Some(&token))).await;

    assert_eq!(res.status, StatusCode::OK);
    assert!(res.rotated_token().is_some());
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_role_gate_rejects_stored_user_with_401() {
    let app = TestApp::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let user_id = app.create_user("user@example.com", roles::USER).await;
    let token = app.token(&user_id, roles::USER);

    let res = send(counting_router(&app, hits.clone()), get("/admin", Some(&token))).await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.msg(), "Unauthorized");
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_role_gate_trusts_stored_role_over_token_role() {
    let app = TestApp::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let user_id = app.create_user("demoted@example.com", roles::USER).await;
    // Issued while the user was still an admin
    let token = app.token(&user_id, roles::ADMIN);

    let res = send(counting_router(&app, hits.clone()), get("/admin", Some(&token))).await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_role_gate_rejects_unknown_user_with_400() {
    let app = TestApp::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let token = app.token(&uuid::Uuid::new_v4().to_string(), roles::ADMIN);

    let res = send(counting_router(&app, hits.clone()), get("/admin", Some(&token))).await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.msg(), "User not found");
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_role_gate_rejection_still_carries_rotated_token() {
    let app = TestApp::new();
    let user_id = app.create_user("user@example.com", roles::USER).await;
    let token = app.token(&user_id, roles::USER);

    let res = send(
        counting_router(&app, Arc::new(AtomicUsize::new(0))),
        get("/admin", Some(&token)),
    )
    .await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert!(res.rotated_token().is_some());
}

#[tokio::test]
async fn test_role_gate_is_not_reached_without_token() {
    let app = TestApp::new();
    let hits = Arc::new(AtomicUsize::new(0));

    let res = send(counting_router(&app, hits.clone()), get("/admin", None)).await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.msg(), "No token, authorization denied");
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}
