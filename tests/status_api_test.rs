mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::*;

async fn seed_base(app: &axum::Router) {
    seed_status(app, "New", "#3b82f6").await;
    seed_status(app, "Interviewing", "#f59e0b").await;
    seed_position(app, "Engineer", None).await;
}

#[tokio::test]
async fn status_uniqueness_covers_name_and_color() {
    let (app, _uploads) = test_app();
    seed_base(&app).await;

    let resp = send_json(
        &app,
        "POST",
        "/api/statuses",
        Some(json!({ "name": "NEW", "color": "#123456" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "Status name already exists");

    let resp = send_json(
        &app,
        "POST",
        "/api/statuses",
        Some(json!({ "name": "Offered", "color": "#3b82f6" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await["error"],
        "Status color already exists. Please choose a different color"
    );

    let resp = send_json(
        &app,
        "POST",
        "/api/statuses",
        Some(json!({ "name": "Offered", "color": "not-a-color" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("hex color"));
}

// A status rename rewrites every live referencing candidate and records a
// synthetic history entry attributed to the actor performing the rename.
#[tokio::test]
async fn rename_cascades_with_history_entries() {
    let (app, _uploads) = test_app();
    seed_base(&app).await;

    create_candidate(&app, "c1", "14155550701", "Engineer", "Interviewing", "0").await;
    create_candidate(&app, "c2", "14155550702", "Engineer", "New", "0").await;
    let c1 = candidate_id_by_tag(&app, "c1").await;

    let id = status_id_by_name(&app, "Interviewing").await;
    let resp = send_json(
        &app,
        "PUT",
        &format!("/api/statuses/{}", id),
        Some(json!({ "name": "Screening", "color": "#f59e0b" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["updatedCandidates"], 1);

    let resp = send_json(&app, "GET", &format!("/api/candidates/{}/history", c1), None).await;
    let history = body_json(resp).await;
    let history = history.as_array().unwrap().clone();
    // Seed entry plus the rename entry, newest first.
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["oldStatus"], "Interviewing");
    assert_eq!(history[0]["newStatus"], "Screening");
    assert_eq!(history[0]["changedBy"], "Admin");

    let resp = send_json(&app, "GET", "/api/candidates", None).await;
    let list = body_json(resp).await;
    let renamed = list
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["email"] == "c1@example.com")
        .unwrap()
        .clone();
    assert_eq!(renamed["status"], "Screening");
}

// Soft-deleting a status still referenced by one live candidate fails
// and leaves the status active.
#[tokio::test]
async fn soft_delete_is_blocked_by_live_references() {
    let (app, _uploads) = test_app();
    seed_base(&app).await;
    seed_status(&app, "Rejected", "#ef4444").await;

    create_candidate(&app, "r1", "14155550801", "Engineer", "Rejected", "0").await;

    let id = status_id_by_name(&app, "Rejected").await;
    let resp = send_json(&app, "DELETE", &format!("/api/statuses/{}/soft", id), None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["blockingCandidates"], 1);

    let resp = send_json(&app, "GET", "/api/statuses", None).await;
    let list = body_json(resp).await;
    let status = list
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["name"] == "Rejected")
        .unwrap()
        .clone();
    assert_eq!(status["isDeleted"], 0);
}

#[tokio::test]
async fn permanent_delete_cascades_to_referencing_candidates() {
    let (app, _uploads) = test_app();
    seed_base(&app).await;
    seed_status(&app, "Archived", "#6b7280").await;

    create_candidate(&app, "a1", "14155550901", "Engineer", "Archived", "0").await;
    create_candidate(&app, "keep", "14155550902", "Engineer", "New", "0").await;

    let id = status_id_by_name(&app, "Archived").await;
    let resp = send_json(&app, "DELETE", &format!("/api/statuses/{}", id), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["deletedCandidates"], 1);

    let resp = send_json(&app, "GET", "/api/candidates", None).await;
    let list = body_json(resp).await;
    let list = list.as_array().unwrap().clone();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["email"], "keep@example.com");
}

#[tokio::test]
async fn dashboard_stats_count_live_candidates() {
    let (app, _uploads) = test_app();
    seed_base(&app).await;

    create_candidate(&app, "c1", "14155551001", "Engineer", "New", "0").await;
    create_candidate(&app, "c2", "14155551002", "Engineer", "New", "2").await;
    create_candidate(&app, "c3", "14155551003", "Engineer", "Interviewing", "1").await;

    let resp = send_json(&app, "GET", "/api/dashboard/stats", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let stats = body_json(resp).await;
    assert_eq!(stats["totalCandidates"], 3);
    assert_eq!(stats["byFlag"]["active"], 1);
    assert_eq!(stats["byFlag"]["onHold"], 1);
    assert_eq!(stats["byFlag"]["rejected"], 1);

    let by_status = stats["byStatus"].as_array().unwrap();
    let new_count = by_status.iter().find(|s| s["name"] == "New").unwrap();
    assert_eq!(new_count["count"], 2);
    assert_eq!(new_count["color"], "#3b82f6");
}
