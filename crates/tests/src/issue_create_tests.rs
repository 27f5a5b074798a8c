use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{get_authed, post_json, post_json_authed, seed_ngo, seed_user, test_app};

#[tokio::test]
async fn anonymous_report_is_new_and_anonymous() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let body = json!({
        "title": "Broken streetlight",
        "category": "infrastructure",
        "location": "New Baneshwor",
        "description": "The light at the junction has been out for a week",
    });
    let (status, issue) = post_json(&app, "/api/issues", &body).await;

    assert_eq!(status, StatusCode::CREATED, "{:?}", issue);
    assert_eq!(issue["status"], "new");
    assert_eq!(issue["reporter_id"], "anonymous");
    assert_eq!(issue["reporter_email"], "anonymous");
    assert_eq!(issue["image_urls"], json!([]));
    assert!(issue.get("handled_by").is_none());
}

#[tokio::test]
async fn signed_in_report_records_the_reporter() {
    let Some((app, pool, _guard)) = test_app().await else { return };
    let (user_id, token) = seed_user(&pool, "Nabin", "nabin@example.com").await;

    let body = json!({
        "title": "Water leak",
        "category": "water",
        "location": "Patan",
        "description": "Pipe burst near the temple",
        "contact_phone": "9800000000",
        "image_urls": ["https://img.example.com/issues/1.jpg"],
    });
    let (status, issue) = post_json_authed(&app, "/api/issues", &body, &token).await;

    assert_eq!(status, StatusCode::CREATED, "{:?}", issue);
    assert_eq!(issue["reporter_id"], user_id.to_string());
    assert_eq!(issue["reporter_email"], "nabin@example.com");
    assert_eq!(issue["contact_phone"], "9800000000");
    assert_eq!(issue["image_urls"][0], "https://img.example.com/issues/1.jpg");
}

#[tokio::test]
async fn report_missing_title_is_rejected() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let body = json!({
        "title": "   ",
        "category": "other",
        "location": "Bhaktapur",
        "description": "Something",
    });
    let (status, resp) = post_json(&app, "/api/issues", &body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp["field_errors"]["title"].is_string());
}

#[tokio::test]
async fn report_with_six_images_is_rejected() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let urls: Vec<String> = (0..6).map(|i| format!("https://img.example.com/{}.jpg", i)).collect();
    let body = json!({
        "title": "Landslide debris",
        "category": "safety",
        "location": "Dhulikhel",
        "description": "Road blocked",
        "image_urls": urls,
    });
    let (status, _) = post_json(&app, "/api/issues", &body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn ngo_can_fetch_a_single_issue() {
    let Some((app, pool, _guard)) = test_app().await else { return };
    let (_, token) = seed_ngo(&pool, "Clean Valley", "team@cleanvalley.org").await;
    let id = crate::common::create_test_issue(&app, "Overflowing bins").await;

    let (status, issue) = get_authed(&app, &format!("/api/issues/{}", id), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(issue["title"], "Overflowing bins");
    assert_eq!(issue["category"], "sanitation");
    assert_eq!(issue["location"], "Kalimati");
    assert_eq!(issue["description"], "Garbage has not been collected for two weeks");
}

#[tokio::test]
async fn fetching_a_missing_issue_is_not_found() {
    let Some((app, pool, _guard)) = test_app().await else { return };
    let (_, token) = seed_ngo(&pool, "Clean Valley", "team@cleanvalley.org").await;

    let uri = format!("/api/issues/{}", uuid::Uuid::new_v4());
    let (status, _) = get_authed(&app, &uri, &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn upload_without_storage_is_refused() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let body = json!({
        "file_name": "photo.png",
        "content_type": "image/png",
        "data": "AQID",
    });
    let (status, _) = post_json(&app, "/api/issues/images", &body).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}
