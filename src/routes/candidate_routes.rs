use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use crate::dto::candidate_dto::{CandidateFilters, CandidateForm, UpdateStatusPayload};
use crate::dto::{ActionResponse, SuccessResponse};
use crate::error::Result;
use crate::middleware::auth::Claims;
use crate::AppState;

async fn extract_candidate_form(mut multipart: Multipart) -> Result<CandidateForm> {
    let mut form = CandidateForm::default();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "name" => form.name = field.text().await.unwrap_or_default(),
            "email" => form.email = field.text().await.unwrap_or_default(),
            "phone" | "phoneNumber" => form.phone = field.text().await.unwrap_or_default(),
            "linkedin" => form.linkedin = field.text().await.unwrap_or_default(),
            "position" => form.position = field.text().await.unwrap_or_default(),
            "status" => form.status = field.text().await.unwrap_or_default(),
            "statusFlag" => form.status_flag = field.text().await.unwrap_or_default(),
            "experience-years" => {
                form.experience_years = field.text().await.unwrap_or_default()
            }
            "experience-months" => {
                form.experience_months = field.text().await.unwrap_or_default()
            }
            "current-salary" | "currentSalary" => {
                form.current_salary = field.text().await.unwrap_or_default()
            }
            "expected-salary" | "expectedSalary" => {
                form.expected_salary = field.text().await.unwrap_or_default()
            }
            "notice-period" | "noticePeriod" => {
                form.notice_period = field.text().await.unwrap_or_default()
            }
            "reference" => form.reference = field.text().await.unwrap_or_default(),
            "comments" => form.comments = field.text().await.unwrap_or_default(),
            "cvFile" => {
                let file_name = field.file_name().unwrap_or("cv.pdf").to_string();
                let data = field.bytes().await?;
                if !data.is_empty() {
                    form.cv_file = Some((file_name, data));
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

#[utoipa::path(
    get,
    path = "/api/candidates",
    responses(
        (status = 200, description = "Active candidates matching the filters"),
        (status = 401, description = "Unauthenticated")
    )
)]
#[axum::debug_handler]
pub async fn list_candidates(
    State(state): State<AppState>,
    Query(filters): Query<CandidateFilters>,
) -> Result<Json<serde_json::Value>> {
    let candidates = state.candidate_service.list_filtered(&filters).await?;
    Ok(Json(serde_json::to_value(candidates)?))
}

#[utoipa::path(
    post,
    path = "/api/candidates",
    responses(
        (status = 200, description = "Candidate added", body = ActionResponse),
        (status = 400, description = "Validation or conflict failure"),
        (status = 404, description = "Referenced position/status not found")
    )
)]
#[axum::debug_handler]
pub async fn create_candidate(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    multipart: Multipart,
) -> Result<Json<ActionResponse>> {
    let form = extract_candidate_form(multipart).await?;
    state.candidate_service.create(form, &claims.actor()).await?;
    Ok(Json(ActionResponse::ok("Candidate added successfully")))
}

#[utoipa::path(
    put,
    path = "/api/candidates/{id}",
    params(("id" = String, Path, description = "Candidate ID")),
    responses(
        (status = 200, description = "Candidate updated", body = ActionResponse),
        (status = 400, description = "Validation or conflict failure"),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn update_candidate(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<ActionResponse>> {
    let form = extract_candidate_form(multipart).await?;
    state
        .candidate_service
        .update(&id, form, &claims.actor())
        .await?;
    Ok(Json(ActionResponse::ok("Candidate updated successfully")))
}

#[utoipa::path(
    post,
    path = "/api/candidates/{id}/status",
    params(("id" = String, Path, description = "Candidate ID")),
    request_body = UpdateStatusPayload,
    responses(
        (status = 200, description = "Status updated", body = ActionResponse),
        (status = 400, description = "Backward progression or limit conflict"),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn update_candidate_status(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<Json<ActionResponse>> {
    payload.validate()?;
    state
        .candidate_service
        .update_status(&id, &payload.status, &claims.actor())
        .await?;
    Ok(Json(ActionResponse::ok("Status updated successfully")))
}

#[axum::debug_handler]
pub async fn get_candidate_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let history = state.history.history(&id).await?;
    Ok(Json(serde_json::to_value(history)?))
}

#[axum::debug_handler]
pub async fn soft_delete_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    state.candidate_service.soft_delete(&id).await?;
    Ok(Json(SuccessResponse::ok()))
}

#[axum::debug_handler]
pub async fn restore_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    state.candidate_service.restore(&id).await?;
    Ok(Json(SuccessResponse::ok()))
}

#[utoipa::path(
    delete,
    path = "/api/candidates/{id}",
    params(("id" = String, Path, description = "Candidate ID")),
    responses(
        (status = 200, description = "Candidate erased", body = SuccessResponse),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<SuccessResponse>)> {
    state.candidate_service.delete_permanent(&id).await?;
    Ok((StatusCode::OK, Json(SuccessResponse::ok())))
}
