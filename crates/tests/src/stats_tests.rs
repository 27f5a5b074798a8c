use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{apply_action, create_test_issue, get, post_json, seed_ngo, test_app};

#[tokio::test]
async fn empty_database_reports_zeroes() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let (status, stats) = get(&app, "/api/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        stats,
        json!({ "issues_resolved": 0, "servings_donated": 0, "volunteers": 0, "ngo_partners": 0 })
    );
}

#[tokio::test]
async fn stats_follow_activity() {
    let Some((app, pool, _guard)) = test_app().await else { return };
    let (_, token) = seed_ngo(&pool, "Clean Valley", "team@cleanvalley.org").await;

    let id = create_test_issue(&app, "Resolved one").await;
    create_test_issue(&app, "Still open").await;
    apply_action(&app, &token, &id, "start_working").await;
    apply_action(&app, &token, &id, "mark_resolved").await;

    for (direction, quantity) in [("give", 12), ("give", 8), ("receive", 50)] {
        let body = json!({
            "food_type": "grains",
            "quantity": quantity,
            "location": "Kirtipur",
            "pickup_at": "2026-04-10T09:00",
            "direction": direction,
        });
        let (status, _) = post_json(&app, "/api/donations", &body).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let volunteer = json!({
        "name": "Pema Lama",
        "email": "pema@example.com",
        "phone": "9811111111",
    });
    post_json(&app, "/api/volunteers", &volunteer).await;

    let (_, stats) = get(&app, "/api/stats").await;
    assert_eq!(stats["issues_resolved"], 1);
    assert_eq!(stats["servings_donated"], 20);
    assert_eq!(stats["volunteers"], 1);
    assert_eq!(stats["ngo_partners"], 1);
}
