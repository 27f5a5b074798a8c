use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{get, post_json, test_app};

fn donation(direction: &str, quantity: i32) -> serde_json::Value {
    json!({
        "food_type": "cooked",
        "quantity": quantity,
        "location": "Thamel",
        "pickup_at": "2026-03-01T18:30",
        "description": "Dal bhat for twenty",
        "direction": direction,
    })
}

#[tokio::test]
async fn give_donation_is_recorded() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let (status, created) = post_json(&app, "/api/donations", &donation("give", 20)).await;
    assert_eq!(status, StatusCode::CREATED, "{:?}", created);
    assert_eq!(created["direction"], "give");
    assert_eq!(created["quantity"], 20);
    assert_eq!(created["pickup_at"], "2026-03-01T18:30");

    let (status, list) = get(&app, "/api/donations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["id"], created["id"]);
}

#[tokio::test]
async fn both_directions_are_listed() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    post_json(&app, "/api/donations", &donation("give", 10)).await;
    post_json(&app, "/api/donations", &donation("receive", 4)).await;

    let (_, list) = get(&app, "/api/donations").await;
    let mut directions: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["direction"].as_str().unwrap())
        .collect();
    directions.sort();
    assert_eq!(directions, vec!["give", "receive"]);
}

#[tokio::test]
async fn zero_quantity_is_rejected() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let (status, resp) = post_json(&app, "/api/donations", &donation("give", 0)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp["field_errors"]["quantity"].is_string());

    let (_, list) = get(&app, "/api/donations").await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn garbled_pickup_time_is_rejected() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let mut body = donation("receive", 3);
    body["pickup_at"] = json!("tomorrow evening");
    let (status, resp) = post_json(&app, "/api/donations", &body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp["field_errors"]["pickup_at"].is_string());
}

#[tokio::test]
async fn donation_is_stamped_with_submission_time() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    // Storage keeps microseconds, so allow for rounding at either edge.
    let slack = chrono::Duration::milliseconds(1);
    let before = chrono::Utc::now() - slack;
    let (status, created) = post_json(&app, "/api/donations", &donation("give", 5)).await;
    let after = chrono::Utc::now() + slack;
    assert_eq!(status, StatusCode::CREATED, "{:?}", created);

    let stamped = chrono::DateTime::parse_from_rfc3339(created["created_at"].as_str().unwrap())
        .unwrap()
        .with_timezone(&chrono::Utc);
    assert!(stamped >= before && stamped <= after, "{stamped} not in [{before}, {after}]");
}
