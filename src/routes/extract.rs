use std::sync::OnceLock;

use axum::{extract::Multipart, Json};
use regex::Regex;
use serde_json::json;
use tokio::fs;

use crate::dto::candidate_dto::ExtractedCv;
use crate::error::{Error, Result};

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").expect("email regex")
    })
}

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\+?\d[\d\s\-()]{8,}\d").expect("phone regex"))
}

fn linkedin_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:https?://)?(?:[a-z]{2,3}\.)?linkedin\.com/in/[A-Za-z0-9\-_%.]+")
            .expect("linkedin regex")
    })
}

async fn pdf_to_text(path: &str) -> String {
    let output = tokio::process::Command::new("pdftotext")
        .arg("-layout")
        .arg(path)
        .arg("-")
        .output()
        .await;

    match output {
        Ok(out) => String::from_utf8_lossy(&out.stdout).to_string(),
        Err(e) => {
            tracing::error!(error = %e, "failed to run pdftotext");
            String::new()
        }
    }
}

/// Pattern-scans extracted CV text. Everything here is a heuristic; blank
/// fields are acceptable output.
fn scan_text(text: &str) -> ExtractedCv {
    let mut parsed = ExtractedCv::default();

    if let Some(m) = email_regex().find(text) {
        parsed.email = m.as_str().to_string();
    }
    if let Some(m) = phone_regex().find(text) {
        parsed.phone = m.as_str().split_whitespace().collect::<Vec<_>>().join(" ");
    }
    if let Some(m) = linkedin_regex().find(text) {
        let url = m.as_str();
        parsed.linkedin = if url.starts_with("http") {
            url.to_string()
        } else {
            format!("https://{}", url)
        };
    }

    // First non-empty line is the usual resume headline.
    if let Some(line) = text.lines().map(str::trim).find(|l| !l.is_empty()) {
        parsed.name = line.chars().take(100).collect();
    }

    parsed
}

#[utoipa::path(
    post,
    path = "/api/extract-pdf",
    responses(
        (status = 200, description = "Best-effort contact fields from an uploaded CV", body = ExtractedCv),
        (status = 400, description = "No file uploaded")
    )
)]
#[axum::debug_handler]
pub async fn extract_pdf(mut multipart: Multipart) -> Result<Json<serde_json::Value>> {
    let mut file_bytes = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            let data = field.bytes().await?;
            if !data.is_empty() {
                file_bytes = Some(data);
            }
            break;
        }
    }

    let Some(data) = file_bytes else {
        return Err(Error::BadRequest("No file uploaded".to_string()));
    };

    let tmp_path = std::env::temp_dir().join(format!("cv-{}.pdf", uuid::Uuid::new_v4()));
    let tmp = tmp_path.to_string_lossy().to_string();

    let parsed = match fs::write(&tmp_path, &data).await {
        Ok(()) => {
            let text = pdf_to_text(&tmp).await;
            let _ = fs::remove_file(&tmp_path).await;
            scan_text(&text)
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to stage CV for extraction");
            ExtractedCv::default()
        }
    };

    Ok(Json(json!({ "parsed": parsed })))
}
