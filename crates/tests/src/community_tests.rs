use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{get, post_json, seed_ngo, test_app};

#[tokio::test]
async fn volunteer_application_is_accepted() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let body = json!({
        "name": "Pema Lama",
        "email": "pema@example.com",
        "phone": "9811111111",
        "interests": ["Education"],
        "availability": ["Weekend Mornings"],
    });
    let (status, created) = post_json(&app, "/api/volunteers", &body).await;
    assert_eq!(status, StatusCode::CREATED, "{:?}", created);
    assert_eq!(created["name"], "Pema Lama");
}

#[tokio::test]
async fn volunteer_with_unknown_interest_is_rejected() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let body = json!({
        "name": "Pema Lama",
        "email": "pema@example.com",
        "phone": "9811111111",
        "interests": ["Juggling"],
    });
    let (status, resp) = post_json(&app, "/api/volunteers", &body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp["field_errors"]["interests"].is_string());
}

#[tokio::test]
async fn contact_message_is_accepted() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let body = json!({
        "name": "Anil",
        "email": "anil@example.com",
        "subject": "Partnership",
        "message": "We run a shelter in Pokhara and would like to join.",
    });
    let (status, created) = post_json(&app, "/api/contact", &body).await;
    assert_eq!(status, StatusCode::CREATED, "{:?}", created);
    assert_eq!(created["subject"], "Partnership");
}

#[tokio::test]
async fn contact_without_message_is_rejected() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let body = json!({
        "name": "Anil",
        "email": "anil@example.com",
        "subject": "Hello",
        "message": "",
    });
    let (status, resp) = post_json(&app, "/api/contact", &body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp["field_errors"]["message"].is_string());
}

#[tokio::test]
async fn partners_are_listed_alphabetically() {
    let Some((app, pool, _guard)) = test_app().await else { return };
    seed_ngo(&pool, "Sunrise Shelter", "info@sunrise.org").await;
    seed_ngo(&pool, "Annapurna Aid", "hello@annapurna.org").await;

    let (status, list) = get(&app, "/api/ngos").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["org_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Annapurna Aid", "Sunrise Shelter"]);
}
