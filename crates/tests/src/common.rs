use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    middleware, Router,
};
use serde_json::Value;
use shared_types::NewNgo;
use sqlx::{Pool, Postgres};
use tokio::sync::Mutex;
use tower::ServiceExt;
use uuid::Uuid;

/// Global mutex ensuring tests run sequentially against the shared database.
/// Each test acquires this lock before truncating, preventing concurrent
/// tests from interfering with each other's data.
static TEST_MUTEX: std::sync::LazyLock<Mutex<()>> = std::sync::LazyLock::new(|| Mutex::new(()));

pub type TestApp = (Router, Pool<Postgres>, tokio::sync::MutexGuard<'static, ()>);

/// Build the REST router backed by a real Postgres pool, with every table
/// emptied. Returns `None` (and the test passes vacuously) when no database
/// is configured.
///
/// The returned `MutexGuard` must be held for the duration of the test.
pub async fn test_app() -> Option<TestApp> {
    let guard = TEST_MUTEX.lock().await;

    let _ = dotenvy::dotenv();

    let Some(database_url) = std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
    else {
        eprintln!("skipping: TEST_DATABASE_URL or DATABASE_URL not set");
        return None;
    };

    if std::env::var("JWT_SECRET").map_or(true, |s| s.is_empty()) {
        std::env::set_var("JWT_SECRET", "integration-test-secret");
    }

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    server::db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    sqlx::query(
        "TRUNCATE issues, donations, volunteers, contact_messages, refresh_tokens, users, ngos, accounts CASCADE",
    )
    .execute(&pool)
    .await
    .expect("Failed to truncate");

    // Same layering as the app server: the permissive auth middleware sits
    // outside the API so extractors see claims from a Bearer token.
    let router = server::openapi::api_router(pool.clone()).layer(middleware::from_fn_with_state(
        pool.clone(),
        server::auth::middleware::auth_middleware,
    ));

    Some((router, pool, guard))
}

/// Create a citizen account directly and return an access token for it.
pub async fn seed_user(pool: &Pool<Postgres>, name: &str, email: &str) -> (Uuid, String) {
    let hash = server::auth::password::hash_password("password123").expect("hash");
    let mut tx = pool.begin().await.expect("begin");
    let account = server::repo::account::create(&mut *tx, email, &hash)
        .await
        .expect("Failed to seed account");
    server::repo::user::create(&mut *tx, account.id, name, email)
        .await
        .expect("Failed to seed user profile");
    tx.commit().await.expect("commit");

    let token = server::auth::jwt::create_access_token(account.id, email)
        .expect("Failed to create test JWT");
    (account.id, token)
}

/// Enroll an NGO the way the operator tool does and return an access token.
pub async fn seed_ngo(pool: &Pool<Postgres>, org_name: &str, email: &str) -> (Uuid, String) {
    let ngo = NewNgo {
        org_name: org_name.to_string(),
        email: email.to_string(),
        password: "password123".to_string(),
        description: Some(format!("{} serves the valley", org_name)),
        ..Default::default()
    };
    let hash = server::auth::password::hash_password(&ngo.password).expect("hash");
    let mut tx = pool.begin().await.expect("begin");
    let account = server::repo::account::create(&mut *tx, email, &hash)
        .await
        .expect("Failed to seed account");
    server::repo::ngo::create(&mut *tx, account.id, &ngo)
        .await
        .expect("Failed to seed NGO profile");
    tx.commit().await.expect("commit");

    let token = server::auth::jwt::create_access_token(account.id, email)
        .expect("Failed to create test JWT");
    (account.id, token)
}

fn request(method: &str, uri: &str, body: Option<&Value>, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, request("GET", uri, None, None)).await
}

pub async fn get_authed(app: &Router, uri: &str, token: &str) -> (StatusCode, Value) {
    send(app, request("GET", uri, None, Some(token))).await
}

pub async fn post_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    send(app, request("POST", uri, Some(body), None)).await
}

pub async fn post_json_authed(
    app: &Router,
    uri: &str,
    body: &Value,
    token: &str,
) -> (StatusCode, Value) {
    send(app, request("POST", uri, Some(body), Some(token))).await
}

pub async fn patch_json_authed(
    app: &Router,
    uri: &str,
    body: &Value,
    token: &str,
) -> (StatusCode, Value) {
    send(app, request("PATCH", uri, Some(body), Some(token))).await
}

/// POST JSON and keep the response headers (for cookie assertions).
pub async fn post_json_with_headers(
    app: &Router,
    uri: &str,
    body: &Value,
) -> (StatusCode, HeaderMap, Value) {
    let response = app
        .clone()
        .oneshot(request("POST", uri, Some(body), None))
        .await
        .expect("Failed to send request");

    let status = response.status();
    let headers = response.headers().clone();
    let body = read_json(response.into_body()).await;
    (status, headers, body)
}

/// Send a request through the router and parse the response.
async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(req)
        .await
        .expect("Failed to send request");

    let status = response.status();
    (status, read_json(response.into_body()).await)
}

async fn read_json(body: Body) -> Value {
    let body_bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");

    if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&body_bytes).to_string(),
        ))
    }
}

/// Report an issue anonymously and return its id.
pub async fn create_test_issue(app: &Router, title: &str) -> String {
    let body = serde_json::json!({
        "title": title,
        "category": "sanitation",
        "location": "Kalimati",
        "description": "Garbage has not been collected for two weeks",
    });
    let (status, response) = post_json(app, "/api/issues", &body).await;
    assert_eq!(status, StatusCode::CREATED, "Issue create failed: {:?}", response);
    response["id"].as_str().expect("issue id").to_string()
}

/// Move an issue with an NGO token, asserting success.
pub async fn apply_action(app: &Router, token: &str, id: &str, action: &str) -> Value {
    let uri = format!("/api/issues/{}/status", id);
    let (status, response) =
        patch_json_authed(app, &uri, &serde_json::json!({ "action": action }), token).await;
    assert_eq!(status, StatusCode::OK, "{} failed: {:?}", action, response);
    response
}
