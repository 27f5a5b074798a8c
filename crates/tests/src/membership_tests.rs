use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{get, get_authed, seed_ngo, seed_user, test_app};

#[tokio::test]
async fn citizen_is_a_user_but_not_an_ngo() {
    let Some((app, pool, _guard)) = test_app().await else { return };
    let (_, token) = seed_user(&pool, "Bikash", "bikash@example.com").await;

    let (status, user) = get_authed(&app, "/api/membership/user", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["member"], true);

    let (_, ngo) = get_authed(&app, "/api/membership/ngo", &token).await;
    assert_eq!(ngo["member"], false);
}

#[tokio::test]
async fn partner_is_an_ngo_member() {
    let Some((app, pool, _guard)) = test_app().await else { return };
    let (_, token) = seed_ngo(&pool, "Clean Valley", "team@cleanvalley.org").await;

    let (_, ngo) = get_authed(&app, "/api/membership/ngo", &token).await;
    assert_eq!(ngo["member"], true);

    let (_, user) = get_authed(&app, "/api/membership/user", &token).await;
    assert_eq!(user["member"], false);
}

#[tokio::test]
async fn ngo_lookup_ignores_email_case() {
    let Some((app, pool, _guard)) = test_app().await else { return };
    let (id, _) = seed_ngo(&pool, "Food Bank", "Hello@FoodBank.org").await;
    let token = server::auth::jwt::create_access_token(id, "hello@foodbank.org").unwrap();

    let (_, ngo) = get_authed(&app, "/api/membership/ngo", &token).await;
    assert_eq!(ngo["member"], true);
}

#[tokio::test]
async fn signed_out_is_never_a_member() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let (status, body) = get(&app, "/api/membership/ngo").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["member"], false);
}

#[tokio::test]
async fn unknown_role_is_a_bad_request() {
    let Some((app, pool, _guard)) = test_app().await else { return };
    let (_, token) = seed_user(&pool, "Asha", "asha@example.com").await;

    let (status, _) = get_authed(&app, "/api/membership/admin", &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
