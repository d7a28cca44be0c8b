#![allow(dead_code)]

use std::env;
use std::sync::{Arc, Once};

use axum::body::{to_bytes, Body};
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::Value as JsonValue;
use tower::ServiceExt;

use ats_backend::middleware::auth::Claims;
use ats_backend::routes::app_router;
use ats_backend::store::memory::MemoryStore;
use ats_backend::store::resume::LocalResumeStore;
use ats_backend::AppState;

static INIT: Once = Once::new();

pub const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

pub fn init() {
    INIT.call_once(|| {
        env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
        env::set_var("JWT_SECRET", "test_secret_key");
        env::set_var("API_RPS", "1000");
        ats_backend::config::init_config().expect("init config");
    });
}

/// Fresh app over an empty in-memory store; résumés land in a tempdir
/// that lives as long as the returned guard.
pub fn test_app() -> (Router, tempfile::TempDir) {
    init();
    let uploads = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(MemoryStore::new());
    let resumes = Arc::new(LocalResumeStore::new(uploads.path()));
    let state = AppState::new(store, resumes);
    (app_router(state, 1000), uploads)
}

pub fn bearer_token() -> String {
    init();
    let exp = (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp() as usize;
    let claims = Claims {
        sub: "tester".to_string(),
        exp,
        name: Some("Admin".to_string()),
        role: Some("admin".to_string()),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(
            ats_backend::config::get_config().jwt_secret.as_bytes(),
        ),
    )
    .expect("sign token");
    format!("Bearer {}", token)
}

pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<JsonValue>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", bearer_token());
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let req = builder.body(body).expect("request");
    app.clone().oneshot(req).await.expect("response")
}

pub async fn body_json(resp: Response<Body>) -> JsonValue {
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

pub fn pdf_bytes() -> Vec<u8> {
    let mut data = b"%PDF-1.4\n".to_vec();
    data.resize(2048, b' ');
    data
}

/// Minimal multipart encoder for the candidate form.
pub fn multipart_body(fields: &[(&str, &str)], cv: Option<&[u8]>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some(data) = cv {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"cvFile\"; filename=\"resume.pdf\"\r\nContent-Type: application/pdf\r\n\r\n",
                BOUNDARY
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub async fn send_multipart(app: &Router, method: &str, uri: &str, body: Vec<u8>) -> Response<Body> {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", bearer_token())
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .expect("request");
    app.clone().oneshot(req).await.expect("response")
}

pub async fn seed_status(app: &Router, name: &str, color: &str) {
    let resp = send_json(
        app,
        "POST",
        "/api/statuses",
        Some(serde_json::json!({ "name": name, "color": color })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED, "seed status {}", name);
}

pub async fn seed_position(app: &Router, name: &str, criteria: Option<u32>) {
    let mut payload = serde_json::json!({
        "name": name,
        "department": "Engineering",
        "description": "",
    });
    if let Some(c) = criteria {
        payload["criteria"] = serde_json::json!(c.to_string());
    }
    let resp = send_json(app, "POST", "/api/positions", Some(payload)).await;
    assert_eq!(resp.status(), StatusCode::CREATED, "seed position {}", name);
}

/// Candidate form with unique contact fields derived from `tag`.
pub fn candidate_fields<'a>(
    tag: &'a str,
    phone: &'a str,
    position: &'a str,
    status: &'a str,
    status_flag: &'a str,
) -> Vec<(String, String)> {
    vec![
        ("name".to_string(), format!("Candidate {}", tag)),
        ("email".to_string(), format!("{}@example.com", tag)),
        ("phone".to_string(), phone.to_string()),
        ("linkedin".to_string(), String::new()),
        ("position".to_string(), position.to_string()),
        ("status".to_string(), status.to_string()),
        ("statusFlag".to_string(), status_flag.to_string()),
        ("experience-years".to_string(), "3".to_string()),
        ("experience-months".to_string(), "4".to_string()),
        ("current-salary".to_string(), "80000".to_string()),
        ("expected-salary".to_string(), "95000".to_string()),
        ("notice-period".to_string(), "30".to_string()),
        ("reference".to_string(), String::new()),
        ("comments".to_string(), String::new()),
    ]
}

pub async fn create_candidate(
    app: &Router,
    tag: &str,
    phone: &str,
    position: &str,
    status: &str,
    status_flag: &str,
) -> Response<Body> {
    let fields = candidate_fields(tag, phone, position, status, status_flag);
    let refs: Vec<(&str, &str)> = fields
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    let body = multipart_body(&refs, Some(&pdf_bytes()));
    send_multipart(app, "POST", "/api/candidates", body).await
}

pub async fn position_id_by_name(app: &Router, name: &str) -> String {
    let resp = send_json(app, "GET", "/api/positions", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let list = body_json(resp).await;
    list.as_array()
        .expect("position array")
        .iter()
        .find(|p| p["name"] == name)
        .unwrap_or_else(|| panic!("position {} not found", name))["id"]
        .as_str()
        .expect("id")
        .to_string()
}

pub async fn status_id_by_name(app: &Router, name: &str) -> String {
    let resp = send_json(app, "GET", "/api/statuses", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let list = body_json(resp).await;
    list.as_array()
        .expect("status array")
        .iter()
        .find(|s| s["name"] == name)
        .unwrap_or_else(|| panic!("status {} not found", name))["id"]
        .as_str()
        .expect("id")
        .to_string()
}

/// Id of the (unique) candidate whose email carries `tag`.
pub async fn candidate_id_by_tag(app: &Router, tag: &str) -> String {
    let resp = send_json(app, "GET", "/api/candidates", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let list = body_json(resp).await;
    let email = format!("{}@example.com", tag);
    list.as_array()
        .expect("candidate array")
        .iter()
        .find(|c| c["email"] == email.as_str())
        .unwrap_or_else(|| panic!("candidate {} not found", tag))["id"]
        .as_str()
        .expect("id")
        .to_string()
}
