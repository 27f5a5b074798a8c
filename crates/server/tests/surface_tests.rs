//! Router-level checks that never reach the database.
//!
//! The pool is lazy and points nowhere; every request here is answered
//! before a connection would be needed.
//! Run with: `cargo test -p server --features server --test surface_tests`

#![cfg(feature = "server")]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware, Router,
};
use tower::ServiceExt;

fn app() -> Router {
    if std::env::var("JWT_SECRET").map_or(true, |s| s.is_empty()) {
        std::env::set_var("JWT_SECRET", "surface-test-secret");
    }
    let pool = server::db::pool_for("postgres://nobody@127.0.0.1:1/unused").unwrap();
    server::openapi::api_router(pool.clone()).layer(middleware::from_fn_with_state(
        pool,
        server::auth::middleware::auth_middleware,
    ))
}

async fn send(req: Request<Body>) -> (StatusCode, String) {
    let response = app().oneshot(req).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8_lossy(&body).to_string())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn docs_page_is_served() {
    let (status, body) = send(get("/docs")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<html") || body.contains("<!doctype") || body.contains("<!DOCTYPE"));
}

#[tokio::test]
async fn triage_listing_needs_a_session() {
    let (status, body) = send(get("/api/issues")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("\"kind\":\"Unauthorized\""));
}

#[tokio::test]
async fn forged_bearer_token_is_not_a_session() {
    let req = Request::builder()
        .uri("/api/auth/me")
        .header("authorization", "Bearer not-a-real-token")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn signed_out_membership_is_false() {
    let (status, body) = send(get("/api/membership/ngo")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"member":false}"#);
}

#[tokio::test]
async fn image_upload_is_refused_while_storage_is_off() {
    let payload = serde_json::json!({
        "file_name": "street.jpg",
        "content_type": "image/jpeg",
        "data": "/9j/",
    });
    let req = Request::builder()
        .method("POST")
        .uri("/api/issues/images")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let (status, body) = send(req).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("Image uploads are disabled"));
}
