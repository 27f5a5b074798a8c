use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{
    apply_action, create_test_issue, get, get_authed, patch_json_authed, seed_ngo, seed_user,
    test_app,
};

fn titles(list: &serde_json::Value) -> Vec<&str> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|i| i["title"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn listing_requires_sign_in() {
    let Some((app, _pool, _guard)) = test_app().await else { return };

    let (status, _) = get(&app, "/api/issues").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn citizens_cannot_list_issues() {
    let Some((app, pool, _guard)) = test_app().await else { return };
    let (_, token) = seed_user(&pool, "Kiran", "kiran@example.com").await;

    let (status, _) = get_authed(&app, "/api/issues", &token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn ngo_sees_issues_newest_first() {
    let Some((app, pool, _guard)) = test_app().await else { return };
    let (_, token) = seed_ngo(&pool, "Clean Valley", "team@cleanvalley.org").await;

    create_test_issue(&app, "First").await;
    create_test_issue(&app, "Second").await;
    create_test_issue(&app, "Third").await;

    let (status, list) = get_authed(&app, "/api/issues", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&list), vec!["Third", "Second", "First"]);
}

#[tokio::test]
async fn status_filter_returns_a_matching_subset() {
    let Some((app, pool, _guard)) = test_app().await else { return };
    let (_, token) = seed_ngo(&pool, "Clean Valley", "team@cleanvalley.org").await;

    let waiting = create_test_issue(&app, "Waiting").await;
    let working = create_test_issue(&app, "Working").await;
    let done = create_test_issue(&app, "Done").await;
    apply_action(&app, &token, &working, "start_working").await;
    apply_action(&app, &token, &done, "start_working").await;
    apply_action(&app, &token, &done, "mark_resolved").await;

    let (_, all) = get_authed(&app, "/api/issues?status=all", &token).await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    for (filter, expected_id) in [("new", &waiting), ("in-progress", &working), ("resolved", &done)] {
        let (status, list) =
            get_authed(&app, &format!("/api/issues?status={}", filter), &token).await;
        assert_eq!(status, StatusCode::OK, "filter {}", filter);
        let items = list.as_array().unwrap();
        assert_eq!(items.len(), 1, "filter {}", filter);
        assert_eq!(items[0]["id"], expected_id.as_str());
        assert_eq!(items[0]["status"], filter);
    }
}

#[tokio::test]
async fn unknown_filter_is_a_bad_request() {
    let Some((app, pool, _guard)) = test_app().await else { return };
    let (_, token) = seed_ngo(&pool, "Clean Valley", "team@cleanvalley.org").await;

    let (status, _) = get_authed(&app, "/api/issues?status=closed", &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn full_lifecycle_records_the_handler() {
    let Some((app, pool, _guard)) = test_app().await else { return };
    let (ngo_id, token) = seed_ngo(&pool, "Clean Valley", "team@cleanvalley.org").await;
    let id = create_test_issue(&app, "Garbage pile").await;

    let started = apply_action(&app, &token, &id, "start_working").await;
    assert_eq!(started["status"], "in-progress");
    assert_eq!(started["handled_by"]["ngo_id"], ngo_id.to_string());
    assert_eq!(started["handled_by"]["ngo_name"], "Clean Valley");
    assert_eq!(started["handled_by"]["ngo_email"], "team@cleanvalley.org");
    assert!(started["updated_at"].is_string());

    let resolved = apply_action(&app, &token, &id, "mark_resolved").await;
    assert_eq!(resolved["status"], "resolved");

    let reopened = apply_action(&app, &token, &id, "reopen").await;
    assert_eq!(reopened["status"], "in-progress");
}

#[tokio::test]
async fn resolving_a_new_issue_conflicts() {
    let Some((app, pool, _guard)) = test_app().await else { return };
    let (_, token) = seed_ngo(&pool, "Clean Valley", "team@cleanvalley.org").await;
    let id = create_test_issue(&app, "Skipped step").await;

    let uri = format!("/api/issues/{}/status", id);
    let (status, body) =
        patch_json_authed(&app, &uri, &json!({ "action": "mark_resolved" }), &token).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "Conflict");

    let (_, still) = get_authed(&app, &format!("/api/issues/{}", id), &token).await;
    assert_eq!(still["status"], "new");
}

#[tokio::test]
async fn repeating_an_action_conflicts() {
    let Some((app, pool, _guard)) = test_app().await else { return };
    let (_, first) = seed_ngo(&pool, "Clean Valley", "team@cleanvalley.org").await;
    let (_, second) = seed_ngo(&pool, "Food Bank", "hello@foodbank.org").await;
    let id = create_test_issue(&app, "Contested").await;

    apply_action(&app, &first, &id, "start_working").await;

    let uri = format!("/api/issues/{}/status", id);
    let (status, _) =
        patch_json_authed(&app, &uri, &json!({ "action": "start_working" }), &second).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, issue) = get_authed(&app, &format!("/api/issues/{}", id), &first).await;
    assert_eq!(issue["handled_by"]["ngo_name"], "Clean Valley");
}

#[tokio::test]
async fn citizens_cannot_triage() {
    let Some((app, pool, _guard)) = test_app().await else { return };
    let (_, token) = seed_user(&pool, "Kiran", "kiran@example.com").await;
    let id = create_test_issue(&app, "Not yours").await;

    let uri = format!("/api/issues/{}/status", id);
    let (status, _) =
        patch_json_authed(&app, &uri, &json!({ "action": "start_working" }), &token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn triaging_a_missing_issue_is_not_found() {
    let Some((app, pool, _guard)) = test_app().await else { return };
    let (_, token) = seed_ngo(&pool, "Clean Valley", "team@cleanvalley.org").await;

    let uri = format!("/api/issues/{}/status", uuid::Uuid::new_v4());
    let (status, _) =
        patch_json_authed(&app, &uri, &json!({ "action": "start_working" }), &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn legacy_pending_rows_read_as_new() {
    let Some((app, pool, _guard)) = test_app().await else { return };
    let (_, token) = seed_ngo(&pool, "Clean Valley", "team@cleanvalley.org").await;
    let id = create_test_issue(&app, "Imported").await;

    sqlx::query("UPDATE issues SET status = 'pending' WHERE id = $1::uuid")
        .bind(&id)
        .execute(&pool)
        .await
        .unwrap();

    let (_, list) = get_authed(&app, "/api/issues?status=new", &token).await;
    assert_eq!(list[0]["status"], "new");

    let started = apply_action(&app, &token, &id, "start_working").await;
    assert_eq!(started["status"], "in-progress");
}
