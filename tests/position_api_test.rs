mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::*;

async fn seed_base(app: &axum::Router) {
    seed_status(app, "New", "#3b82f6").await;
    seed_status(app, "Hired", "#22c55e").await;
    seed_position(app, "Engineer", None).await;
}

#[tokio::test]
async fn position_crud_and_duplicate_name() {
    let (app, _uploads) = test_app();
    seed_base(&app).await;

    // Case-insensitive duplicate among live positions.
    let resp = send_json(
        &app,
        "POST",
        "/api/positions",
        Some(json!({ "name": "engineer", "department": "Engineering" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "Position name already exists");

    // Department is required on create.
    let resp = send_json(
        &app,
        "POST",
        "/api/positions",
        Some(json!({ "name": "Product Manager" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "Department is required");

    // Criteria must be 1..=1000.
    let resp = send_json(
        &app,
        "POST",
        "/api/positions",
        Some(json!({ "name": "Product Manager", "department": "Product", "criteria": "0" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await["error"],
        "Vacancies must be a positive number"
    );
}

// Renaming a position while three live candidates reference it rewrites
// all three and reports updatedCandidates = 3.
#[tokio::test]
async fn rename_cascades_to_referencing_candidates() {
    let (app, _uploads) = test_app();
    seed_base(&app).await;

    for (tag, phone) in [
        ("c1", "14155550301"),
        ("c2", "14155550302"),
        ("c3", "14155550303"),
    ] {
        let resp = create_candidate(&app, tag, phone, "Engineer", "New", "0").await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let id = position_id_by_name(&app, "Engineer").await;
    let resp = send_json(
        &app,
        "PUT",
        &format!("/api/positions/{}", id),
        Some(json!({ "name": "Software Engineer", "department": "Engineering" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["updatedCandidates"], 3);

    let resp = send_json(&app, "GET", "/api/candidates", None).await;
    let list = body_json(resp).await;
    for candidate in list.as_array().unwrap() {
        assert_eq!(candidate["position"], "Software Engineer");
    }
}

#[tokio::test]
async fn criteria_cannot_drop_below_the_hired_count() {
    let (app, _uploads) = test_app();
    seed_base(&app).await;
    seed_position(&app, "Backend Engineer", Some(3)).await;

    create_candidate(&app, "h1", "14155550401", "Backend Engineer", "Hired", "0").await;
    create_candidate(&app, "h2", "14155550402", "Backend Engineer", "Hired", "0").await;

    let id = position_id_by_name(&app, "Backend Engineer").await;
    let resp = send_json(
        &app,
        "PUT",
        &format!("/api/positions/{}", id),
        Some(json!({ "name": "Backend Engineer", "department": "Engineering", "criteria": "1" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("at least 2"));

    // Matching the hired count exactly is fine.
    let resp = send_json(
        &app,
        "PUT",
        &format!("/api/positions/{}", id),
        Some(json!({ "name": "Backend Engineer", "department": "Engineering", "criteria": "2" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn soft_delete_is_blocked_by_live_references() {
    let (app, _uploads) = test_app();
    seed_base(&app).await;

    create_candidate(&app, "c1", "14155550501", "Engineer", "New", "0").await;

    let id = position_id_by_name(&app, "Engineer").await;
    let resp = send_json(&app, "DELETE", &format!("/api/positions/{}/soft", id), None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["blockingCandidates"], 1);

    // The position is untouched.
    let resp = send_json(&app, "GET", "/api/positions", None).await;
    let list = body_json(resp).await;
    let position = list
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["name"] == "Engineer")
        .unwrap()
        .clone();
    assert_eq!(position["isDeleted"], 0);

    // A position with zero references soft-deletes and restores cleanly.
    seed_position(&app, "Product Manager", None).await;
    let pm_id = position_id_by_name(&app, "Product Manager").await;
    let resp = send_json(&app, "DELETE", &format!("/api/positions/{}/soft", pm_id), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = send_json(&app, "POST", &format!("/api/positions/{}/restore", pm_id), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

// Permanently deleting a position referenced by exactly K live
// candidates erases exactly K and reports the count.
#[tokio::test]
async fn permanent_delete_cascades_and_reports_the_count() {
    let (app, _uploads) = test_app();
    seed_base(&app).await;
    seed_position(&app, "Data Analyst", None).await;

    create_candidate(&app, "d1", "14155550601", "Data Analyst", "New", "0").await;
    create_candidate(&app, "d2", "14155550602", "Data Analyst", "New", "0").await;
    create_candidate(&app, "keep", "14155550603", "Engineer", "New", "0").await;

    let id = position_id_by_name(&app, "Data Analyst").await;
    let resp = send_json(&app, "DELETE", &format!("/api/positions/{}", id), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["deletedCandidates"], 2);

    // Only the unrelated candidate remains anywhere (active or trash).
    let resp = send_json(&app, "GET", "/api/candidates", None).await;
    let list = body_json(resp).await;
    let list = list.as_array().unwrap().clone();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["position"], "Engineer");

    let resp = send_json(&app, "GET", "/api/trash/candidates", None).await;
    assert!(body_json(resp).await.as_array().unwrap().is_empty());
}
