use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{get, get_authed, post_json, post_json_with_headers, test_app};

fn registration(email: &str) -> serde_json::Value {
    json!({ "name": "Sita Sharma", "email": email, "password": "namaste123" })
}

#[tokio::test]
async fn register_returns_user_and_sets_cookies() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let (status, headers, body) =
        post_json_with_headers(&app, "/api/auth/register", &registration("sita@example.com")).await;

    assert_eq!(status, StatusCode::CREATED, "{:?}", body);
    assert_eq!(body["user"]["name"], "Sita Sharma");
    assert_eq!(body["user"]["email"], "sita@example.com");
    assert!(body["access_token"].as_str().is_some_and(|t| !t.is_empty()));

    let cookies: Vec<&str> = headers
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();
    assert!(cookies.iter().any(|c| c.starts_with("ms_access=")));
    assert!(cookies.iter().any(|c| c.starts_with("ms_refresh=")));
}

#[tokio::test]
async fn register_duplicate_email_conflicts() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let (first, _) = post_json(&app, "/api/auth/register", &registration("dup@example.com")).await;
    assert_eq!(first, StatusCode::CREATED);

    let (second, body) = post_json(&app, "/api/auth/register", &registration("dup@example.com")).await;
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "Conflict");
}

#[tokio::test]
async fn register_short_password_is_rejected() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let body = json!({ "name": "Ram", "email": "ram@example.com", "password": "123" });
    let (status, resp) = post_json(&app, "/api/auth/register", &body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp["field_errors"]["password"].is_string());
}

#[tokio::test]
async fn login_with_registered_credentials() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    post_json(&app, "/api/auth/register", &registration("hari@example.com")).await;

    let body = json!({ "email": "hari@example.com", "password": "namaste123" });
    let (status, resp) = post_json(&app, "/api/auth/login", &body).await;

    assert_eq!(status, StatusCode::OK, "{:?}", resp);
    assert_eq!(resp["user"]["email"], "hari@example.com");
}

#[tokio::test]
async fn login_wrong_password_is_unauthorized() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    post_json(&app, "/api/auth/register", &registration("gita@example.com")).await;

    let body = json!({ "email": "gita@example.com", "password": "wrong-password" });
    let (status, resp) = post_json(&app, "/api/auth/login", &body).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp["message"], "Invalid email or password");
}

#[tokio::test]
async fn login_unknown_email_gets_the_same_message() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let body = json!({ "email": "nobody@example.com", "password": "namaste123" });
    let (status, resp) = post_json(&app, "/api/auth/login", &body).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp["message"], "Invalid email or password");
}

#[tokio::test]
async fn me_reflects_the_bearer_token() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let (_, registered) =
        post_json(&app, "/api/auth/register", &registration("maya@example.com")).await;
    let token = registered["access_token"].as_str().unwrap();

    let (status, me) = get_authed(&app, "/api/auth/me", token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "maya@example.com");
    assert_eq!(me["id"], registered["user"]["id"]);
}

#[tokio::test]
async fn me_without_token_is_unauthorized() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let (status, _) = get(&app, "/api/auth/me").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_succeeds_signed_out() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let (status, body) = post_json(&app, "/api/auth/logout", &json!({})).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, serde_json::Value::Null);
}
